//! Counter
//!
//! This example demonstrates the basic store lifecycle.
//!
//! Key concepts:
//! - Typed actions declared with `action_enum!`
//! - Pure reducer producing the next state
//! - Listeners and unsubscribe handles
//! - Observing state and hot-swapping the reducer
//!
//! Run with: cargo run --example counter

use redstore::action_enum;
use redstore::core::Reducer;
use redstore::store::{create_store, observer_fn, Observable, StoreError};
use std::rc::Rc;

action_enum! {
    enum CounterAction {
        Increment,
        Decrement,
        Add(i64),
    }
}

fn counter() -> Reducer<i64, CounterAction> {
    Reducer::new(|state: Option<&i64>, action: &CounterAction| {
        let state = state.copied().unwrap_or(0);
        match action {
            CounterAction::Increment => state + 1,
            CounterAction::Decrement => state - 1,
            CounterAction::Add(by) => state + by,
            CounterAction::Reserved(_) => state,
        }
    })
}

// Same actions, but every step counts ten times.
fn fast_counter() -> Reducer<i64, CounterAction> {
    Reducer::new(|state: Option<&i64>, action: &CounterAction| {
        let state = state.copied().unwrap_or(0);
        match action {
            CounterAction::Increment => state + 10,
            CounterAction::Decrement => state - 10,
            CounterAction::Add(by) => state + by * 10,
            CounterAction::Reserved(_) => state,
        }
    })
}

fn main() -> Result<(), StoreError> {
    println!("=== Counter Store Example ===\n");

    let store = create_store(counter(), None)?;
    println!("Initial state: {}", store.get_state()?);

    let reader = store.clone();
    let unsubscribe = store.subscribe(move || {
        if let Ok(state) = reader.get_state() {
            println!("  listener: state is now {state}");
        }
    })?;

    println!("\nDispatching Increment, Increment, Add(5):");
    store.dispatch(CounterAction::Increment)?;
    store.dispatch(CounterAction::Increment)?;
    store.dispatch(CounterAction::Add(5))?;

    println!("\nUnsubscribing and dispatching Decrement:");
    unsubscribe.unsubscribe()?;
    store.dispatch(CounterAction::Decrement)?;
    println!("  (no listener output)");
    println!("State: {}", store.get_state()?);

    println!("\nObserving the store:");
    let subscription = store
        .observable()
        .subscribe(Rc::new(observer_fn(|state: &i64| {
            println!("  observer: {state}");
        })))?;

    println!("\nReplacing the reducer with a x10 counter:");
    store.replace_reducer(fast_counter())?;
    store.dispatch(CounterAction::Increment)?;
    subscription.unsubscribe()?;

    println!("\nFinal state: {}", store.get_state()?);
    println!("\n=== Example Complete ===");
    Ok(())
}
