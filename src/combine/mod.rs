//! Combining slice reducers over JSON object state.
//!
//! Each slice reducer owns one key of a JSON object. The combined reducer
//! hands every slice reducer its own previous value and the action, and
//! assembles the results into the next object.
//!
//! Slice reducers are checked up front with the reserved INIT action and an
//! unknown-action probe. Every reducer that returns `null` for either is
//! reported, not just the first.
//!
//! # Example
//!
//! ```rust
//! use redstore::combine::combine_reducers;
//! use redstore::core::Reducer;
//! use redstore::store::create_store;
//! use serde_json::{json, Value};
//!
//! let count = Reducer::new(|state: Option<&Value>, action: &Value| {
//!     let count = state.and_then(Value::as_i64).unwrap_or(0);
//!     match action["type"].as_str() {
//!         Some("INC") => json!(count + 1),
//!         _ => json!(count),
//!     }
//! });
//! let label = Reducer::new(|state: Option<&Value>, _action: &Value| {
//!     state.cloned().unwrap_or_else(|| json!("untitled"))
//! });
//!
//! let reducer = combine_reducers([("count", count), ("label", label)]).unwrap();
//! let store = create_store(reducer, None).unwrap();
//! store.dispatch(json!({ "type": "INC" })).unwrap();
//!
//! assert_eq!(store.get_state().unwrap(), json!({ "count": 1, "label": "untitled" }));
//! ```

pub mod error;

pub use error::ShapeViolation;

use crate::core::{action_types, json_kind, probe_unknown_action, Action, Reducer};
use crate::store::StoreError;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Slices<A> = BTreeMap<String, Reducer<Value, A>>;

/// Combine named slice reducers into one reducer over a JSON object.
///
/// A later slice with the same name replaces an earlier one. Fails with
/// [`StoreError::InvalidReducerShape`] listing every slice reducer that
/// returns `null` for INIT or for an unknown action.
pub fn combine_reducers<A, K, I>(slices: I) -> Result<Reducer<Value, A>, StoreError>
where
    A: Action + 'static,
    K: Into<String>,
    I: IntoIterator<Item = (K, Reducer<Value, A>)>,
{
    let slices: Slices<A> = slices
        .into_iter()
        .map(|(key, reducer)| (key.into(), reducer))
        .collect();

    if let Validation::Failure(violations) = assert_reducer_shape(&slices) {
        return Err(StoreError::InvalidReducerShape(
            violations.iter().cloned().collect(),
        ));
    }
    if slices.is_empty() {
        log::warn!("combine_reducers received no slice reducers; state will always be {{}}");
    }

    let warned_keys = RefCell::new(BTreeSet::new());
    Ok(Reducer::new(move |state: Option<&Value>, action: &A| {
        warn_unexpected_shape(state, &slices, action, &warned_keys);
        reduce_slices(&slices, state, action)
    }))
}

/// Check every slice, accumulating ALL violations.
fn assert_reducer_shape<A: Action>(slices: &Slices<A>) -> Validation<(), NonEmptyVec<ShapeViolation>> {
    let checks: Vec<Validation<(), NonEmptyVec<ShapeViolation>>> = slices
        .iter()
        .map(|(key, reducer)| check_slice(key, reducer))
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn check_slice<A: Action>(
    key: &str,
    reducer: &Reducer<Value, A>,
) -> Validation<(), NonEmptyVec<ShapeViolation>> {
    let init = A::reserved(&action_types().init);
    if reducer.reduce(None, &init).is_null() {
        return Validation::fail(ShapeViolation::NullOnInit {
            key: key.to_string(),
        });
    }

    let probe = A::reserved(&probe_unknown_action());
    if reducer.reduce(None, &probe).is_null() {
        return Validation::fail(ShapeViolation::NullOnProbe {
            key: key.to_string(),
        });
    }

    Validation::success(())
}

fn reduce_slices<A>(slices: &Slices<A>, state: Option<&Value>, action: &A) -> Value {
    let previous = state.and_then(Value::as_object);
    let mut has_changed = false;
    let mut next = Map::new();

    for (key, reducer) in slices {
        let previous_slice = previous.and_then(|object| object.get(key));
        let next_slice = reducer.reduce(previous_slice, action);
        has_changed |= previous_slice != Some(&next_slice);
        next.insert(key.clone(), next_slice);
    }
    has_changed |= previous.map_or(true, |object| object.len() != slices.len());

    match state {
        Some(state) if !has_changed => state.clone(),
        _ => Value::Object(next),
    }
}

/// Warn about state keys no slice owns, once per key.
fn warn_unexpected_shape<A: Action>(
    state: Option<&Value>,
    slices: &Slices<A>,
    action: &A,
    warned_keys: &RefCell<BTreeSet<String>>,
) {
    let Some(state) = state else {
        return;
    };
    if slices.is_empty() {
        return;
    }

    let source = if action.action_type() == Some(action_types().init.as_str()) {
        "preloaded state"
    } else {
        "previous state received by the reducer"
    };
    let Some(object) = state.as_object() else {
        log::warn!(
            "The {source} is a JSON {}; expected an object with keys {:?}",
            json_kind(state),
            slices.keys().collect::<Vec<_>>()
        );
        return;
    };
    if action.action_type() == Some(action_types().replace.as_str()) {
        return;
    }

    let mut warned_keys = warned_keys.borrow_mut();
    for key in object.keys() {
        if !slices.contains_key(key) && warned_keys.insert(key.clone()) {
            log::warn!(
                "Unexpected key \"{key}\" found in {source}; expected one of {:?}. \
                 Unexpected keys are dropped",
                slices.keys().collect::<Vec<_>>()
            );
        }
    }
}
