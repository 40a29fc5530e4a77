//! Store enhancers.
//!
//! An enhancer wraps the store constructor: it receives a [`StoreCreator`]
//! and returns another one that builds a store with extra capabilities.
//! [`apply_middleware`](crate::middleware::apply_middleware) is the built-in
//! enhancer.

use super::{create_store, Store, StoreError};
use crate::core::{Action, Reducer};

/// Builds a store from a reducer and an optional preloaded state.
pub type StoreCreator<S, A> =
    Box<dyn FnOnce(Reducer<S, A>, Option<S>) -> Result<Store<S, A>, StoreError>>;

/// Turns a store constructor into an enhanced one.
pub type Enhancer<S, A> = Box<dyn FnOnce(StoreCreator<S, A>) -> StoreCreator<S, A>>;

/// Create a store through an enhancer.
///
/// The enhancer receives the plain [`create_store`] and is fully in charge
/// of building the store.
///
/// # Example
///
/// ```rust
/// use redstore::core::Reducer;
/// use redstore::middleware::{apply_middleware, from_fn};
/// use redstore::store::create_store_with;
/// use serde_json::{json, Value};
///
/// let reducer = Reducer::new(|state: Option<&i64>, action: &Value| {
///     state.copied().unwrap_or(0) + action["by"].as_i64().unwrap_or(0)
/// });
///
/// // Middleware that doubles every "by" amount before it reaches the reducer.
/// let doubler = from_fn(|_api, next, mut action: Value| {
///     if let Some(by) = action["by"].as_i64() {
///         action["by"] = json!(by * 2);
///     }
///     next(action)
/// });
///
/// let store = create_store_with(reducer, None, apply_middleware(vec![doubler])).unwrap();
/// store.dispatch(json!({ "type": "ADD", "by": 3 })).unwrap();
/// assert_eq!(store.get_state().unwrap(), 6);
/// ```
pub fn create_store_with<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
    enhancer: Enhancer<S, A>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    let create: StoreCreator<S, A> = Box::new(create_store::<S, A>);
    enhancer(create)(reducer, preloaded_state)
}

/// Chain enhancers into one. The first enhancer is the outermost.
pub fn compose_enhancers<S, A>(enhancers: Vec<Enhancer<S, A>>) -> Enhancer<S, A>
where
    S: 'static,
    A: 'static,
{
    Box::new(move |create| {
        enhancers
            .into_iter()
            .rev()
            .fold(create, |create, enhancer| enhancer(create))
    })
}
