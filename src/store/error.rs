//! Store errors.

use crate::combine::ShapeViolation;
use thiserror::Error;

/// Errors returned by store, middleware and reducer-combination operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(
        "get_state() may not be called while the reducer is executing; \
         the reducer has already received the state as an argument"
    )]
    ReentrantGetState,

    #[error("subscribe() may not be called while the reducer is executing")]
    ReentrantSubscribe,

    #[error("A store listener may not be unsubscribed while the reducer is executing")]
    ReentrantUnsubscribe,

    #[error("Reducers may not dispatch actions")]
    ReentrantDispatch,

    #[error("replace_reducer() may not be called while the reducer is executing")]
    ReentrantReplaceReducer,

    #[error("Actions must be plain data records, got {kind}")]
    NotPlainRecord { kind: &'static str },

    #[error("Actions may not have a missing \"type\"")]
    MissingActionType,

    #[error(
        "Dispatching while constructing middleware is not allowed; \
         other middleware would not be applied to this dispatch"
    )]
    DispatchDuringMiddlewareSetup,

    #[error("The store behind this middleware api has been dropped")]
    StoreReleased,

    #[error("Action rejected by middleware: {0}")]
    Rejected(String),

    #[error("{} slice reducer check(s) failed", .0.len())]
    InvalidReducerShape(Vec<ShapeViolation>),
}
