//! Observable view of a store.
//!
//! Reactive consumers subscribe an [`Observer`] and receive the current
//! state immediately and after every dispatch. Any type exposing state this
//! way implements [`Observable`], which lets such consumers accept a store
//! without knowing its action type.

use super::{Store, StoreError, Unsubscribe};
use crate::core::Action;
use std::rc::Rc;

/// Receives state values from an [`Observable`].
///
/// `next` is optional: the default implementation ignores the value.
pub trait Observer<S> {
    fn next(&self, _state: &S) {}
}

/// Observer backed by a closure. See [`observer_fn`].
pub struct FnObserver<F>(F);

impl<S, F> Observer<S> for FnObserver<F>
where
    F: Fn(&S),
{
    fn next(&self, state: &S) {
        (self.0)(state)
    }
}

/// Wrap a closure as an observer.
pub fn observer_fn<S, F>(next: F) -> FnObserver<F>
where
    F: Fn(&S),
{
    FnObserver(next)
}

/// A source of state values.
pub trait Observable<S> {
    fn subscribe(&self, observer: Rc<dyn Observer<S>>) -> Result<Subscription, StoreError>;
}

/// Active observer registration.
#[derive(Debug)]
pub struct Subscription {
    unsubscribe: Unsubscribe,
}

impl Subscription {
    /// Stop delivering values. Safe to call more than once.
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        self.unsubscribe.unsubscribe()
    }
}

/// The observable returned by [`Store::observable`].
///
/// # Example
///
/// ```rust
/// use redstore::core::Reducer;
/// use redstore::store::{create_store, observer_fn, Observable};
/// use serde_json::{json, Value};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let reducer = Reducer::new(|state: Option<&i64>, action: &Value| {
///     let state = state.copied().unwrap_or(0);
///     if action["type"] == "INC" { state + 1 } else { state }
/// });
/// let store = create_store(reducer, None).unwrap();
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let subscription = store
///     .observable()
///     .subscribe(Rc::new(observer_fn(move |state: &i64| sink.borrow_mut().push(*state))))
///     .unwrap();
///
/// store.dispatch(json!({ "type": "INC" })).unwrap();
/// subscription.unsubscribe().unwrap();
/// store.dispatch(json!({ "type": "INC" })).unwrap();
///
/// assert_eq!(*seen.borrow(), vec![0, 1]);
/// ```
pub struct StoreObservable<S, A> {
    store: Store<S, A>,
}

impl<S, A> StoreObservable<S, A> {
    pub(crate) fn new(store: Store<S, A>) -> Self {
        Self { store }
    }
}

impl<S: Clone + 'static, A: Action + 'static> Observable<S> for StoreObservable<S, A> {
    fn subscribe(&self, observer: Rc<dyn Observer<S>>) -> Result<Subscription, StoreError> {
        observer.next(&self.store.get_state()?);

        let core = self.store.downgrade();
        let unsubscribe = self.store.subscribe(move || {
            let Some(core) = core.upgrade() else {
                return;
            };
            if let Ok(state) = core.get_state() {
                observer.next(&state);
            }
        })?;

        Ok(Subscription { unsubscribe })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Reducer;
    use crate::store::create_store;
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};

    fn counter() -> Reducer<i64, Value> {
        Reducer::new(|state: Option<&i64>, action: &Value| {
            let state = state.copied().unwrap_or(0);
            match action.action_type() {
                Some("INC") => state + 1,
                _ => state,
            }
        })
    }

    struct Recorder {
        values: RefCell<Vec<i64>>,
    }

    impl Observer<i64> for Recorder {
        fn next(&self, state: &i64) {
            self.values.borrow_mut().push(*state);
        }
    }

    struct Silent;

    impl Observer<i64> for Silent {}

    #[test]
    fn observer_receives_current_state_immediately() {
        let store = create_store(counter(), Some(7)).unwrap();
        let recorder = Rc::new(Recorder {
            values: RefCell::new(Vec::new()),
        });

        store.observable().subscribe(recorder.clone()).unwrap();

        assert_eq!(*recorder.values.borrow(), vec![7]);
    }

    #[test]
    fn observer_receives_every_new_state() {
        let store = create_store(counter(), None).unwrap();
        let recorder = Rc::new(Recorder {
            values: RefCell::new(Vec::new()),
        });
        store.observable().subscribe(recorder.clone()).unwrap();

        store.dispatch(json!({ "type": "INC" })).unwrap();
        store.dispatch(json!({ "type": "INC" })).unwrap();

        assert_eq!(*recorder.values.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let store = create_store(counter(), None).unwrap();
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        let subscription = store
            .observable()
            .subscribe(Rc::new(observer_fn(move |_: &i64| sink.set(sink.get() + 1))))
            .unwrap();

        subscription.unsubscribe().unwrap();
        subscription.unsubscribe().unwrap();
        store.dispatch(json!({ "type": "INC" })).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn observer_without_next_is_accepted() {
        let store = create_store(counter(), None).unwrap();
        store.observable().subscribe(Rc::new(Silent)).unwrap();
        store.dispatch(json!({ "type": "INC" })).unwrap();
        assert_eq!(store.listener_count(), 1);
    }
}
