//! Reserved action types used by the store itself.
//!
//! The store dispatches INIT when it is created and REPLACE when its reducer
//! is swapped. Both carry a random suffix so they never collide with an
//! application action type. Reducers must treat them like any unknown action
//! and return their current state (or their initial state when they have
//! none yet).

use std::sync::OnceLock;
use uuid::Uuid;

const PREFIX: &str = "@@redstore";

/// The reserved INIT and REPLACE action types.
///
/// Generated once per process and stable for its lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTypes {
    /// Dispatched once when a store is created
    pub init: String,
    /// Dispatched after `replace_reducer` swaps the reducer
    pub replace: String,
}

impl ActionTypes {
    fn generate() -> Self {
        Self {
            init: format!("{PREFIX}/INIT{}", random_suffix()),
            replace: format!("{PREFIX}/REPLACE{}", random_suffix()),
        }
    }

    /// Whether `action_type` is one of the reserved types.
    pub fn is_reserved(&self, action_type: &str) -> bool {
        action_type == self.init || action_type == self.replace
    }
}

/// The process-wide reserved action types.
///
/// # Example
///
/// ```rust
/// use redstore::core::action_types;
///
/// let types = action_types();
/// assert!(types.init.starts_with("@@redstore/INIT"));
/// assert_eq!(types, action_types());
/// ```
pub fn action_types() -> &'static ActionTypes {
    static TYPES: OnceLock<ActionTypes> = OnceLock::new();
    TYPES.get_or_init(ActionTypes::generate)
}

/// A fresh action type no reducer is expected to handle.
///
/// Dispatching it must leave state unchanged; a reducer that returns no
/// state for it does not handle unknown actions correctly.
pub fn probe_unknown_action() -> String {
    format!("{PREFIX}/PROBE_UNKNOWN_ACTION{}", random_suffix())
}

/// Six random base-16 characters joined with dots, e.g. `3.f.0.a.9.c`.
fn random_suffix() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    raw.chars()
        .take(6)
        .map(String::from)
        .collect::<Vec<_>>()
        .join(".")
}
