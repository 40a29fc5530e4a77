//! The Action trait for messages fed to reducers.
//!
//! Every action carries a type. Typed action enums get it from the variant
//! name (see [`action_enum!`](crate::action_enum)); dynamically shaped JSON
//! actions read it from their `"type"` field.

use serde_json::Value;
use std::fmt::Debug;

/// Trait for actions that can be dispatched to a store.
///
/// # Example
///
/// ```rust
/// use redstore::core::Action;
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     Reserved(String),
/// }
///
/// impl Action for CounterAction {
///     fn action_type(&self) -> Option<&str> {
///         match self {
///             Self::Increment => Some("Increment"),
///             Self::Reserved(action_type) => Some(action_type.as_str()),
///         }
///     }
///
///     fn reserved(action_type: &str) -> Self {
///         Self::Reserved(action_type.to_string())
///     }
/// }
///
/// assert_eq!(CounterAction::Increment.action_type(), Some("Increment"));
/// ```
pub trait Action: Debug {
    /// The action's type, or `None` when it has none.
    ///
    /// Actions without a type are rejected by dispatch.
    fn action_type(&self) -> Option<&str>;

    /// Whether this value is a plain data record.
    ///
    /// Statically typed actions always are. Default implementation
    /// returns `true`.
    fn is_plain_record(&self) -> bool {
        true
    }

    /// Short description of the value's shape for error messages.
    fn kind(&self) -> &'static str {
        "record"
    }

    /// Build an action carrying one of the store's reserved types.
    fn reserved(action_type: &str) -> Self
    where
        Self: Sized;
}

impl Action for Value {
    fn action_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    fn is_plain_record(&self) -> bool {
        self.is_object()
    }

    fn kind(&self) -> &'static str {
        json_kind(self)
    }

    fn reserved(action_type: &str) -> Self {
        serde_json::json!({ "type": action_type })
    }
}

/// Name of a JSON value's shape.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_action_type_reads_type_field() {
        let action = json!({ "type": "INC", "by": 2 });
        assert_eq!(action.action_type(), Some("INC"));
    }

    #[test]
    fn json_action_without_type_has_none() {
        assert_eq!(json!({ "payload": 1 }).action_type(), None);
        assert_eq!(json!({ "type": null }).action_type(), None);
    }

    #[test]
    fn only_json_objects_are_plain_records() {
        assert!(json!({ "type": "A" }).is_plain_record());
        assert!(!json!([1, 2]).is_plain_record());
        assert!(!json!("A").is_plain_record());
        assert!(!Value::Null.is_plain_record());
    }

    #[test]
    fn kind_names_json_shapes() {
        assert_eq!(json!(true).kind(), "boolean");
        assert_eq!(json!(1.5).kind(), "number");
        assert_eq!(json!([]).kind(), "array");
        assert_eq!(json!({}).kind(), "object");
    }

    #[test]
    fn reserved_builds_object_with_type() {
        let action = Value::reserved("@@redstore/INIT");
        assert!(action.is_plain_record());
        assert_eq!(action.action_type(), Some("@@redstore/INIT"));
    }
}
