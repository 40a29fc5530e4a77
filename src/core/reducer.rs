//! Reducers: pure state transition functions.
//!
//! A reducer computes the next state from the current state and an action.
//! It must be deterministic, must not mutate anything it does not own, and
//! must return a state for every action, including actions it does not
//! recognise.

use std::fmt;
use std::rc::Rc;

/// Pure function `(state, action) -> state` driving a store.
///
/// The state argument is `None` only when the store has no state yet, which
/// happens for the INIT action of a store created without preloaded state.
/// Reducers use that case to produce their initial state.
///
/// Cloning a reducer is cheap; clones share the same function.
///
/// # Example
///
/// ```rust
/// use redstore::core::Reducer;
/// use serde_json::{json, Value};
///
/// let counter = Reducer::new(|state: Option<&i64>, action: &Value| {
///     let state = state.copied().unwrap_or(0);
///     match action["type"].as_str() {
///         Some("INC") => state + 1,
///         _ => state,
///     }
/// });
///
/// assert_eq!(counter.reduce(None, &json!({ "type": "INC" })), 1);
/// assert_eq!(counter.reduce(Some(&4), &json!({ "type": "NOOP" })), 4);
/// ```
pub struct Reducer<S, A> {
    transition: Rc<dyn Fn(Option<&S>, &A) -> S>,
}

impl<S, A> Reducer<S, A> {
    /// Create a reducer from a pure transition function.
    pub fn new<F>(transition: F) -> Self
    where
        F: Fn(Option<&S>, &A) -> S + 'static,
    {
        Reducer {
            transition: Rc::new(transition),
        }
    }

    /// Compute the next state.
    pub fn reduce(&self, state: Option<&S>, action: &A) -> S {
        (self.transition)(state, action)
    }

    /// Whether both reducers wrap the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transition, &other.transition)
    }
}

impl<S, A> Clone for Reducer<S, A> {
    fn clone(&self) -> Self {
        Self {
            transition: Rc::clone(&self.transition),
        }
    }
}

impl<S, A> fmt::Debug for Reducer<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer").finish_non_exhaustive()
    }
}
