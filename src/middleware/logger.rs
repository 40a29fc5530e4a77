//! Logger - logs every action and the state it produced

use super::{ChainLink, Middleware, MiddlewareApi};
use crate::core::Action;
use crate::store::{Dispatch, StoreError};
use log::Level;
use std::fmt::Debug;
use std::rc::Rc;

/// Logs each dispatched action and the resulting state through the `log`
/// facade. Failed dispatches are logged at `warn`.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    level: Level,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
        }
    }

    /// Log at `level` instead of `debug`.
    pub fn with_level(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for Logger
where
    S: Clone + Debug + 'static,
    A: Action + 'static,
{
    fn wrap(&self, api: &MiddlewareApi<S, A>) -> Result<ChainLink<A>, StoreError> {
        let level = self.level;
        let api = api.clone();
        Ok(Box::new(move |next: Dispatch<A>| -> Dispatch<A> {
            let api = api.clone();
            Rc::new(move |action: A| {
                let action_type = action.action_type().unwrap_or("<missing>").to_string();
                log::log!(level, "action {action_type}");

                let result = next(action);
                match &result {
                    Ok(_) if log::log_enabled!(level) => {
                        if let Ok(state) = api.get_state() {
                            log::log!(level, "state after {action_type}: {state:?}");
                        }
                    }
                    Ok(_) => {}
                    Err(err) => log::warn!("action {action_type} failed: {err}"),
                }
                result
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Reducer;
    use crate::middleware::apply_middleware;
    use crate::store::create_store_with;
    use serde_json::{json, Value};

    fn counter() -> Reducer<i64, Value> {
        Reducer::new(|state: Option<&i64>, action: &Value| {
            let state = state.copied().unwrap_or(0);
            match action.action_type() {
                Some("INC") => state + 1,
                _ => state,
            }
        })
    }

    #[test]
    fn logger_defaults_to_debug() {
        assert_eq!(Logger::default().level(), Level::Debug);
        assert_eq!(Logger::with_level(Level::Info).level(), Level::Info);
    }

    #[test]
    fn logger_passes_actions_through() {
        let middlewares: Vec<Box<dyn Middleware<i64, Value>>> =
            vec![Box::new(Logger::with_level(Level::Trace))];
        let store = create_store_with(counter(), None, apply_middleware(middlewares)).unwrap();

        let action = json!({ "type": "INC" });
        assert_eq!(store.dispatch(action.clone()).unwrap(), action);
        assert_eq!(store.get_state().unwrap(), 1);
    }

    #[test]
    fn logger_returns_dispatch_errors() {
        let middlewares: Vec<Box<dyn Middleware<i64, Value>>> = vec![Box::new(Logger::new())];
        let store = create_store_with(counter(), None, apply_middleware(middlewares)).unwrap();

        assert_eq!(
            store.dispatch(json!({ "no_type": true })),
            Err(StoreError::MissingActionType)
        );
    }
}
