//! Redstore: a predictable single-writer state container
//!
//! A store holds one state value. The only way to change it is to dispatch
//! an action; a pure reducer computes the next state from the current state
//! and the action, and every subscribed listener is notified afterwards.
//!
//! # Core Concepts
//!
//! - **Reducer**: Pure function `(Option<&S>, &A) -> S` via [`Reducer`]
//! - **Action**: Typed message with an action type via the [`Action`] trait
//! - **Store**: Single-writer dispatch engine with reentrancy guards
//! - **Middleware**: Composable interceptors around dispatch
//! - **Enhancer**: Wraps store creation; [`apply_middleware`] is one
//!
//! # Example
//!
//! ```rust
//! use redstore::{create_store, Reducer};
//! use serde_json::{json, Value};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let reducer = Reducer::new(|state: Option<&i64>, action: &Value| {
//!     let state = state.copied().unwrap_or(0);
//!     match action["type"].as_str() {
//!         Some("INC") => state + 1,
//!         Some("DEC") => state - 1,
//!         _ => state,
//!     }
//! });
//!
//! let store = create_store(reducer, None).unwrap();
//!
//! let notified = Rc::new(Cell::new(0));
//! let seen = notified.clone();
//! let unsubscribe = store.subscribe(move || seen.set(seen.get() + 1)).unwrap();
//!
//! store.dispatch(json!({ "type": "INC" })).unwrap();
//! store.dispatch(json!({ "type": "INC" })).unwrap();
//! unsubscribe.unsubscribe().unwrap();
//! store.dispatch(json!({ "type": "DEC" })).unwrap();
//!
//! assert_eq!(store.get_state().unwrap(), 1);
//! assert_eq!(notified.get(), 2);
//! ```

pub mod combine;
pub mod core;
pub mod middleware;
pub mod store;

mod macros;

// Re-export commonly used types
pub use combine::combine_reducers;
pub use core::{Action, Reducer};
pub use middleware::{apply_middleware, compose, from_fn, Middleware, MiddlewareApi};
pub use store::{
    compose_enhancers, create_store, create_store_with, Dispatch, Enhancer, Store, StoreError,
    Unsubscribe,
};
