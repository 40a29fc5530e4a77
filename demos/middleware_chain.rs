//! Middleware Chain
//!
//! This example demonstrates enhancing a store with middleware.
//!
//! Key concepts:
//! - Combining slice reducers over JSON state
//! - The built-in `Logger` middleware (set RUST_LOG=debug to see it)
//! - A validation middleware that short-circuits dispatch
//! - A middleware that re-dispatches through the full chain
//!
//! Run with: RUST_LOG=debug cargo run --example middleware_chain

use redstore::combine::combine_reducers;
use redstore::core::{Action, Reducer};
use redstore::middleware::{apply_middleware, from_fn, Logger, Middleware};
use redstore::store::{create_store_with, StoreError};
use serde_json::{json, Value};

fn balance() -> Reducer<Value, Value> {
    Reducer::new(|state: Option<&Value>, action: &Value| {
        let balance = state.and_then(Value::as_i64).unwrap_or(0);
        match action.action_type() {
            Some("DEPOSIT") => json!(balance + action["amount"].as_i64().unwrap_or(0)),
            Some("WITHDRAW") => json!(balance - action["amount"].as_i64().unwrap_or(0)),
            _ => json!(balance),
        }
    })
}

fn audit() -> Reducer<Value, Value> {
    Reducer::new(|state: Option<&Value>, action: &Value| {
        let mut audit = state.cloned().unwrap_or_else(|| json!([]));
        if action.action_type() == Some("AUDIT") {
            if let Some(entries) = audit.as_array_mut() {
                entries.push(action["note"].clone());
            }
        }
        audit
    })
}

fn main() -> Result<(), StoreError> {
    env_logger::init();

    println!("=== Middleware Chain Example ===\n");

    // Rejects withdrawals larger than the current balance.
    let guard = from_fn::<Value, Value, _>(|api, next, action| {
        if action.action_type() == Some("WITHDRAW") {
            let state = api.get_state()?;
            let available = state["balance"].as_i64().unwrap_or(0);
            let amount = action["amount"].as_i64().unwrap_or(0);
            if amount > available {
                return Err(StoreError::Rejected(format!(
                    "withdrawal of {amount} exceeds balance {available}"
                )));
            }
        }
        next(action)
    });

    // Records an audit entry for every successful money movement.
    let auditor = from_fn::<Value, Value, _>(|api, next, action| {
        let action = next(action)?;
        if matches!(action.action_type(), Some("DEPOSIT" | "WITHDRAW")) {
            api.dispatch(json!({
                "type": "AUDIT",
                "note": format!(
                    "{} {}",
                    action.action_type().unwrap_or_default(),
                    action["amount"]
                ),
            }))?;
        }
        Ok(action)
    });

    let middlewares: Vec<Box<dyn Middleware<Value, Value>>> =
        vec![Box::new(Logger::new()), guard, auditor];

    let reducer = combine_reducers([("balance", balance()), ("audit", audit())])?;
    let store = create_store_with(reducer, None, apply_middleware(middlewares))?;
    println!("Initial state: {}", store.get_state()?);

    println!("\nDeposit 100, withdraw 30:");
    store.dispatch(json!({ "type": "DEPOSIT", "amount": 100 }))?;
    store.dispatch(json!({ "type": "WITHDRAW", "amount": 30 }))?;
    println!("State: {}", store.get_state()?);

    println!("\nWithdraw 500:");
    match store.dispatch(json!({ "type": "WITHDRAW", "amount": 500 })) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(err) => println!("  rejected: {err}"),
    }

    println!("\nFinal state: {}", store.get_state()?);
    println!("\n=== Example Complete ===");
    Ok(())
}
