//! Property-based tests for the store, middleware and composition.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use redstore::core::{probe_unknown_action, Action, Reducer};
use redstore::middleware::{apply_middleware, compose, from_fn, Middleware, Unary};
use redstore::store::{create_store, create_store_with, Unsubscribe};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn counter() -> Reducer<i64, Value> {
    Reducer::new(|state: Option<&i64>, action: &Value| {
        let state = state.copied().unwrap_or(0);
        match action.action_type() {
            Some("ADD") => state + action["by"].as_i64().unwrap_or(0),
            Some("RESET") => 0,
            _ => state,
        }
    })
}

fn step(state: i64, action: &Value) -> i64 {
    match action["type"].as_str() {
        Some("ADD") => state + action["by"].as_i64().unwrap_or(0),
        Some("RESET") => 0,
        _ => state,
    }
}

prop_compose! {
    fn arbitrary_action()(variant in 0..3u8, by in -100i64..100) -> Value {
        match variant {
            0 => json!({ "type": "ADD", "by": by }),
            1 => json!({ "type": "RESET" }),
            _ => json!({ "type": "NOOP" }),
        }
    }
}

proptest! {
    #[test]
    fn state_is_fold_of_reducer(
        preloaded in proptest::option::of(-1000i64..1000),
        actions in prop::collection::vec(arbitrary_action(), 0..30),
    ) {
        let store = create_store(counter(), preloaded).unwrap();
        let mut expected = preloaded.unwrap_or(0);

        for action in actions {
            expected = step(expected, &action);
            let returned = store.dispatch(action.clone()).unwrap();
            prop_assert_eq!(returned, action);
            prop_assert_eq!(store.get_state().unwrap(), expected);
        }
    }

    #[test]
    fn unknown_action_leaves_state_unchanged(
        actions in prop::collection::vec(arbitrary_action(), 0..10),
    ) {
        let store = create_store(counter(), None).unwrap();
        for action in actions {
            store.dispatch(action).unwrap();
        }

        let before = store.get_state().unwrap();
        store.dispatch(Value::reserved(&probe_unknown_action())).unwrap();
        prop_assert_eq!(store.get_state().unwrap(), before);
    }

    #[test]
    fn listeners_run_in_subscription_order(count in 1usize..12, dispatches in 1usize..5) {
        let store = create_store(counter(), None).unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));

        for index in 0..count {
            let calls = Rc::clone(&calls);
            store.subscribe(move || calls.borrow_mut().push(index)).unwrap();
        }
        for _ in 0..dispatches {
            store.dispatch(json!({ "type": "NOOP" })).unwrap();
        }

        let expected: Vec<usize> = (0..dispatches).flat_map(|_| 0..count).collect();
        prop_assert_eq!(calls.borrow().clone(), expected);
    }

    #[test]
    fn unsubscribe_is_idempotent(count in 1usize..8, target in 0usize..8, repeats in 1usize..4) {
        let target = target % count;
        let store = create_store(counter(), None).unwrap();
        let handles: Vec<Unsubscribe> = (0..count)
            .map(|_| store.subscribe(|| {}).unwrap())
            .collect();

        for _ in 0..repeats {
            handles[target].unsubscribe().unwrap();
        }

        prop_assert_eq!(store.listener_count(), count - 1);
        prop_assert!(!handles[target].is_subscribed());
    }

    #[test]
    fn notification_pass_uses_snapshot(count in 1usize..8) {
        let store = create_store(counter(), None).unwrap();
        let calls = Rc::new(RefCell::new(0usize));
        let handles: Rc<RefCell<Vec<Unsubscribe>>> = Rc::new(RefCell::new(Vec::new()));

        for index in 0..count {
            let calls = Rc::clone(&calls);
            let handles_in_listener = Rc::clone(&handles);
            let store_in_listener = store.clone();
            let handle = store
                .subscribe(move || {
                    *calls.borrow_mut() += 1;
                    // The first listener removes everyone else and adds a newcomer.
                    if index == 0 {
                        for handle in handles_in_listener.borrow().iter().skip(1) {
                            handle.unsubscribe().unwrap();
                        }
                        store_in_listener.subscribe(|| {}).unwrap();
                    }
                })
                .unwrap();
            handles.borrow_mut().push(handle);
        }

        store.dispatch(json!({ "type": "NOOP" })).unwrap();

        // Everyone registered at the start of the pass ran exactly once.
        prop_assert_eq!(*calls.borrow(), count);
        // The first listener plus its newcomer remain.
        prop_assert_eq!(store.listener_count(), 2);
    }

    #[test]
    fn compose_of_nothing_is_identity(value in any::<i64>()) {
        let identity = compose::<i64>(Vec::new());
        prop_assert_eq!(identity(value), value);
    }

    #[test]
    fn compose_of_one_is_that_function(value in -1000i64..1000) {
        let funcs: Vec<Unary<i64>> = vec![Box::new(|x| x * 3)];
        let single = compose(funcs);
        prop_assert_eq!(single(value), value * 3);
    }

    #[test]
    fn compose_applies_right_to_left(value in -1000i64..1000) {
        let funcs: Vec<Unary<i64>> = vec![
            Box::new(|x| x + 1),
            Box::new(|x| x * 2),
            Box::new(|x| x - 3),
        ];
        let composed = compose(funcs);
        prop_assert_eq!(composed(value), (value - 3) * 2 + 1);
    }

    #[test]
    fn middleware_wraps_like_an_onion(count in 1usize..6) {
        let trace = Rc::new(RefCell::new(Vec::new()));
        let middlewares: Vec<Box<dyn Middleware<i64, Value>>> = (0..count)
            .map(|index| {
                let trace = Rc::clone(&trace);
                from_fn(move |_api, next, action: Value| {
                    trace.borrow_mut().push(format!("enter {index}"));
                    let result = next(action);
                    trace.borrow_mut().push(format!("leave {index}"));
                    result
                })
            })
            .collect();

        let store = create_store_with(counter(), None, apply_middleware(middlewares)).unwrap();
        store.dispatch(json!({ "type": "ADD", "by": 1 })).unwrap();

        let expected: Vec<String> = (0..count)
            .map(|index| format!("enter {index}"))
            .chain((0..count).rev().map(|index| format!("leave {index}")))
            .collect();
        prop_assert_eq!(trace.borrow().clone(), expected);
        prop_assert_eq!(store.get_state().unwrap(), 1);
    }
}
