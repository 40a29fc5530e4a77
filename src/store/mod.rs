//! The store engine.
//!
//! A [`Store`] owns one state value, the reducer that produces it, the
//! listener registry and the dispatch phase. State changes only through
//! [`Store::dispatch`], which runs the reducer and then notifies every
//! listener registered when the notification pass began.
//!
//! The engine is single-threaded. The only hazard it guards against is
//! reentrancy: while the reducer runs, reading state, subscribing,
//! unsubscribing, replacing the reducer and dispatching all fail
//! immediately.

pub mod enhancer;
pub mod error;
pub mod observable;
mod subscription;

pub use enhancer::{compose_enhancers, create_store_with, Enhancer, StoreCreator};
pub use error::StoreError;
pub use observable::{observer_fn, FnObserver, Observable, Observer, StoreObservable, Subscription};
pub use subscription::Unsubscribe;

use crate::core::{action_types, Action, Listener, ListenerId, ListenerRegistry, Reducer};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use subscription::ListenerHost;

/// A dispatch function: takes an action, returns it (or a replacement
/// chosen by middleware) once it has been handled.
pub type Dispatch<A> = Rc<dyn Fn(A) -> Result<A, StoreError>>;

/// Phase of the dispatch state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchPhase {
    /// No reducer is running; every operation is permitted.
    Idle,
    /// A reducer is running; every store operation fails.
    Dispatching,
}

/// Holds the phase at `Dispatching` until dropped, including during unwinding.
struct DispatchGuard<'a> {
    phase: &'a Cell<DispatchPhase>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(phase: &'a Cell<DispatchPhase>) -> Self {
        phase.set(DispatchPhase::Dispatching);
        Self { phase }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(DispatchPhase::Idle);
    }
}

pub(crate) struct StoreCore<S, A> {
    state: RefCell<S>,
    reducer: RefCell<Reducer<S, A>>,
    listeners: RefCell<ListenerRegistry>,
    phase: Cell<DispatchPhase>,
}

impl<S: Clone + 'static, A: Action + 'static> StoreCore<S, A> {
    /// Runs the reducer on the reserved INIT action to establish state.
    fn new(reducer: Reducer<S, A>, preloaded_state: Option<S>) -> Self {
        let init = A::reserved(&action_types().init);
        let state = reducer.reduce(preloaded_state.as_ref(), &init);
        Self {
            state: RefCell::new(state),
            reducer: RefCell::new(reducer),
            listeners: RefCell::new(ListenerRegistry::new()),
            phase: Cell::new(DispatchPhase::Idle),
        }
    }

    fn is_dispatching(&self) -> bool {
        self.phase.get() == DispatchPhase::Dispatching
    }

    pub(crate) fn get_state(&self) -> Result<S, StoreError> {
        if self.is_dispatching() {
            return Err(StoreError::ReentrantGetState);
        }
        Ok(self.state.borrow().clone())
    }

    fn subscribe(&self, listener: Listener) -> Result<ListenerId, StoreError> {
        if self.is_dispatching() {
            return Err(StoreError::ReentrantSubscribe);
        }
        Ok(self.listeners.borrow_mut().insert(listener))
    }

    fn dispatch(&self, action: A) -> Result<A, StoreError> {
        if !action.is_plain_record() {
            return Err(StoreError::NotPlainRecord {
                kind: action.kind(),
            });
        }
        if action.action_type().is_none() {
            return Err(StoreError::MissingActionType);
        }
        if self.is_dispatching() {
            return Err(StoreError::ReentrantDispatch);
        }

        // State is committed only when the reducer returns normally.
        let next = {
            let _dispatching = DispatchGuard::enter(&self.phase);
            let reducer = self.reducer.borrow().clone();
            let state = self.state.borrow();
            reducer.reduce(Some(&*state), &action)
        };
        *self.state.borrow_mut() = next;

        let snapshot = self.listeners.borrow().snapshot();
        log::trace!(
            "dispatched {:?}, notifying {} listener(s)",
            action.action_type(),
            snapshot.len()
        );
        snapshot.notify();

        Ok(action)
    }

    fn replace_reducer(&self, next: Reducer<S, A>) -> Result<(), StoreError> {
        if self.is_dispatching() {
            return Err(StoreError::ReentrantReplaceReducer);
        }
        *self.reducer.borrow_mut() = next;
        log::debug!("reducer replaced");
        self.dispatch(A::reserved(&action_types().replace))
            .map(|_| ())
    }
}

impl<S, A> ListenerHost for StoreCore<S, A> {
    fn is_dispatching(&self) -> bool {
        self.phase.get() == DispatchPhase::Dispatching
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id)
    }
}

/// Handle to a store.
///
/// Clones share the same state, reducer and listeners. The dispatch function
/// is per handle: enhancers such as
/// [`apply_middleware`](crate::middleware::apply_middleware) return a handle
/// whose dispatch runs through their middleware chain.
///
/// # Example
///
/// ```rust
/// use redstore::core::Reducer;
/// use redstore::store::create_store;
/// use serde_json::{json, Value};
///
/// let reducer = Reducer::new(|state: Option<&i64>, action: &Value| {
///     let state = state.copied().unwrap_or(0);
///     if action["type"] == "INC" { state + 1 } else { state }
/// });
///
/// let store = create_store(reducer, None).unwrap();
/// for _ in 0..3 {
///     store.dispatch(json!({ "type": "INC" })).unwrap();
/// }
/// assert_eq!(store.get_state().unwrap(), 3);
/// ```
pub struct Store<S, A> {
    core: Rc<StoreCore<S, A>>,
    dispatch: Dispatch<A>,
}

/// Create a store.
///
/// The reducer is immediately run with the reserved INIT action and the
/// preloaded state (if any) to establish the initial state.
pub fn create_store<S, A>(
    reducer: Reducer<S, A>,
    preloaded_state: Option<S>,
) -> Result<Store<S, A>, StoreError>
where
    S: Clone + 'static,
    A: Action + 'static,
{
    let core = Rc::new(StoreCore::new(reducer, preloaded_state));
    let raw = Rc::clone(&core);
    log::debug!("store created");
    Ok(Store {
        core,
        dispatch: Rc::new(move |action| raw.dispatch(action)),
    })
}

impl<S: Clone + 'static, A: Action + 'static> Store<S, A> {
    /// Dispatch an action through this handle's dispatch function.
    ///
    /// Without middleware this runs the reducer, commits its result,
    /// notifies listeners and returns the action.
    pub fn dispatch(&self, action: A) -> Result<A, StoreError> {
        (self.dispatch)(action)
    }

    /// The current state.
    pub fn get_state(&self) -> Result<S, StoreError> {
        self.core.get_state()
    }

    /// Register a listener called after every successful dispatch.
    ///
    /// A listener added during a notification pass is first called on the
    /// next dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Result<Unsubscribe, StoreError>
    where
        F: Fn() + 'static,
    {
        let id = self.core.subscribe(Rc::new(listener))?;
        let host: Weak<dyn ListenerHost> = Rc::downgrade(&self.core) as Weak<dyn ListenerHost>;
        Ok(Unsubscribe::new(host, id))
    }

    /// Swap the reducer and dispatch the reserved REPLACE action.
    pub fn replace_reducer(&self, next: Reducer<S, A>) -> Result<(), StoreError> {
        self.core.replace_reducer(next)
    }

    /// Observable view of this store's state.
    pub fn observable(&self) -> StoreObservable<S, A> {
        StoreObservable::new(self.clone())
    }

    /// This handle's dispatch function.
    pub fn dispatcher(&self) -> Dispatch<A> {
        Rc::clone(&self.dispatch)
    }

    /// Same store, dispatching through `dispatch`.
    pub fn with_dispatch(mut self, dispatch: Dispatch<A>) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Current phase of the dispatch state machine.
    pub fn phase(&self) -> DispatchPhase {
        self.core.phase.get()
    }

    /// Whether a reducer is running right now.
    pub fn is_dispatching(&self) -> bool {
        self.core.is_dispatching()
    }

    /// Number of listeners that the next dispatch will notify.
    pub fn listener_count(&self) -> usize {
        self.core.listeners.borrow().len()
    }

    pub(crate) fn downgrade(&self) -> Weak<StoreCore<S, A>> {
        Rc::downgrade(&self.core)
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("phase", &self.core.phase.get())
            .field("listeners", &self.core.listeners.borrow())
            .finish_non_exhaustive()
    }
}
