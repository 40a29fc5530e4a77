//! Middleware: composable interceptors around dispatch.
//!
//! A middleware is set up once per store with a [`MiddlewareApi`] and
//! returns a [`ChainLink`]: a function from the next dispatch in the chain to
//! a new dispatch. [`apply_middleware`] composes the links so that the first
//! middleware is the outermost layer:
//!
//! ```text
//! dispatch(action)
//!   -> m1 (before next) -> m2 (before next) -> store dispatch -> reducer
//!   <- m1 (after next)  <- m2 (after next)  <-
//! ```
//!
//! Each middleware can inspect or rewrite the action, call `next` zero or
//! more times, dispatch new actions from the top of the chain through the
//! api, and read the state.

mod compose;
mod logger;

pub use compose::{compose, compose_with, Unary};
pub use logger::Logger;

use crate::core::{Action, Reducer};
use crate::store::{Dispatch, Enhancer, Store, StoreCore, StoreCreator, StoreError};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Wraps the next dispatch in the chain.
pub type ChainLink<A> = Unary<Dispatch<A>>;

/// What a middleware can reach of the store it is applied to.
///
/// `dispatch` always goes through the complete middleware chain. Calling it
/// while the middleware chain is still being set up fails with
/// [`StoreError::DispatchDuringMiddlewareSetup`].
///
/// The api only holds weak references, so chain links capturing it never
/// keep the store alive. Once the last store handle is gone both operations
/// fail with [`StoreError::StoreReleased`].
pub struct MiddlewareApi<S, A> {
    store: Weak<StoreCore<S, A>>,
    dispatch: Rc<RefCell<Option<Weak<dyn Fn(A) -> Result<A, StoreError>>>>>,
}

impl<S: Clone + 'static, A: Action + 'static> MiddlewareApi<S, A> {
    pub fn get_state(&self) -> Result<S, StoreError> {
        self.store
            .upgrade()
            .ok_or(StoreError::StoreReleased)?
            .get_state()
    }

    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        let dispatch = self
            .dispatch
            .borrow()
            .as_ref()
            .ok_or(StoreError::DispatchDuringMiddlewareSetup)?
            .upgrade()
            .ok_or(StoreError::StoreReleased)?;
        dispatch(action)
    }
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: Weak::clone(&self.store),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

/// A dispatch interceptor.
///
/// Closures of shape `Fn(&MiddlewareApi<S, A>) -> Result<ChainLink<A>, StoreError>`
/// implement this trait; [`from_fn`] covers the common single-handler case.
pub trait Middleware<S, A> {
    /// Set up against `api` and return the link wrapping the next dispatch.
    fn wrap(&self, api: &MiddlewareApi<S, A>) -> Result<ChainLink<A>, StoreError>;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(&MiddlewareApi<S, A>) -> Result<ChainLink<A>, StoreError>,
{
    fn wrap(&self, api: &MiddlewareApi<S, A>) -> Result<ChainLink<A>, StoreError> {
        self(api)
    }
}

struct FnMiddleware<F> {
    handler: Rc<F>,
}

impl<S, A, F> Middleware<S, A> for FnMiddleware<F>
where
    S: Clone + 'static,
    A: Action + 'static,
    F: Fn(&MiddlewareApi<S, A>, &Dispatch<A>, A) -> Result<A, StoreError> + 'static,
{
    fn wrap(&self, api: &MiddlewareApi<S, A>) -> Result<ChainLink<A>, StoreError> {
        let handler = Rc::clone(&self.handler);
        let api = api.clone();
        Ok(Box::new(move |next: Dispatch<A>| -> Dispatch<A> {
            let handler = Rc::clone(&handler);
            let api = api.clone();
            Rc::new(move |action| handler(&api, &next, action))
        }))
    }
}

/// Build a middleware from one handler `(api, next, action) -> result`.
///
/// # Example
///
/// ```rust
/// use redstore::middleware::from_fn;
/// use serde_json::Value;
///
/// // Drop actions typed "IGNORED" without reaching the reducer.
/// let filter = from_fn::<i64, Value, _>(|_api, next, action| {
///     if action["type"] == "IGNORED" {
///         return Ok(action);
///     }
///     next(action)
/// });
/// ```
pub fn from_fn<S, A, F>(handler: F) -> Box<dyn Middleware<S, A>>
where
    S: Clone + 'static,
    A: Action + 'static,
    F: Fn(&MiddlewareApi<S, A>, &Dispatch<A>, A) -> Result<A, StoreError> + 'static,
{
    Box::new(FnMiddleware {
        handler: Rc::new(handler),
    })
}

/// Enhancer that runs every dispatch through `middlewares`.
///
/// The first middleware is outermost: it sees the action first and the
/// result last. The innermost `next` is the dispatch of the store the
/// enhanced constructor builds.
pub fn apply_middleware<S, A>(middlewares: Vec<Box<dyn Middleware<S, A>>>) -> Enhancer<S, A>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    Box::new(move |create: StoreCreator<S, A>| -> StoreCreator<S, A> {
        Box::new(move |reducer, preloaded_state| {
            build_with_middleware(create, &middlewares, reducer, preloaded_state)
        })
    })
}

fn build_with_middleware<S, A>(
    create: StoreCreator<S, A>,
    middlewares: &[Box<dyn Middleware<S, A>>],
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    let store = create(reducer, preloaded_state)?;

    let api = MiddlewareApi {
        store: store.downgrade(),
        dispatch: Rc::new(RefCell::new(None)),
    };

    let chain = middlewares
        .iter()
        .map(|middleware| middleware.wrap(&api))
        .collect::<Result<Vec<_>, _>>()?;
    let dispatch = compose(chain)(store.dispatcher());

    *api.dispatch.borrow_mut() = Some(Rc::downgrade(&dispatch));
    log::debug!("applied {} middleware(s)", middlewares.len());
    Ok(store.with_dispatch(dispatch))
}
