//! Core store types.
//!
//! This module contains the pure building blocks the store engine is made of:
//! - Actions via the `Action` trait
//! - Reducers as pure transition functions
//! - The reserved INIT/REPLACE action types and the unknown-action probe
//! - The copy-on-write listener registry
//!
//! Nothing here performs a dispatch; the engine in [`crate::store`] drives
//! these pieces.

mod action;
pub mod action_types;
mod listeners;
mod reducer;

pub use action::Action;
pub(crate) use action::json_kind;
pub use action_types::{action_types, probe_unknown_action, ActionTypes};
pub use listeners::{Listener, ListenerId, ListenerRegistry, Snapshot};
pub use reducer::Reducer;
