use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::StoreError;

/// A scalar attribute value as it appears in filters, expressions and items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// Attribute name to value, the in-flight shape of a stored item.
pub type Attributes = HashMap<String, FieldValue>;

/// The type a piece of free text should be read as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueKind {
    #[default]
    Str,
    Int,
    Bool,
}

impl FieldValue {
    /// Reads free text as the given kind. Text is never guessed into a number
    /// or a boolean, since ids such as `42` are stored as strings.
    pub fn parse_as(raw: &str, kind: ValueKind) -> Result<Self, StoreError> {
        match kind {
            ValueKind::Str => Ok(FieldValue::Str(raw.to_string())),
            ValueKind::Int => raw
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| StoreError::BadInput(format!("'{raw}' is not an integer"))),
            ValueKind::Bool => match raw {
                "true" => Ok(FieldValue::Bool(true)),
                "false" => Ok(FieldValue::Bool(false)),
                _ => Err(StoreError::BadInput(format!(
                    "'{raw}' is not a boolean, expected true or false"
                ))),
            },
        }
    }

    /// Converts a JSON scalar. Objects, arrays, null and floats are rejected.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(FieldValue::Str(s.clone())),
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_i64().map(FieldValue::Int),
            _ => None,
        }
    }

    /// Orders two values of the same type. Values of different types are unordered.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Str(a), FieldValue::Str(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Short type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "BOOL",
            FieldValue::Int(_) => "N",
            FieldValue::Str(_) => "S",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_as_defaults_to_string() {
        assert_eq!(
            FieldValue::parse_as("42", ValueKind::default()),
            Ok(FieldValue::from("42"))
        );
        assert_eq!(
            FieldValue::parse_as("false", ValueKind::Str),
            Ok(FieldValue::from("false"))
        );
    }

    #[test]
    fn test_parse_as_typed() {
        assert_eq!(FieldValue::parse_as("-3", ValueKind::Int), Ok(FieldValue::Int(-3)));
        assert_eq!(
            FieldValue::parse_as("false", ValueKind::Bool),
            Ok(FieldValue::Bool(false))
        );
        assert!(matches!(
            FieldValue::parse_as("three", ValueKind::Int),
            Err(StoreError::BadInput(_))
        ));
        assert!(matches!(
            FieldValue::parse_as("yes", ValueKind::Bool),
            Err(StoreError::BadInput(_))
        ));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            FieldValue::from_json(&serde_json::json!("abc")),
            Some(FieldValue::from("abc"))
        );
        assert_eq!(
            FieldValue::from_json(&serde_json::json!(3)),
            Some(FieldValue::Int(3))
        );
        assert_eq!(FieldValue::from_json(&serde_json::json!(1.5)), None);
        assert_eq!(FieldValue::from_json(&serde_json::json!({"a": 1})), None);
        assert_eq!(FieldValue::from_json(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_compare_across_types_is_unordered() {
        assert_eq!(FieldValue::Int(1).compare(&FieldValue::from("1")), None);
        assert_eq!(
            FieldValue::Int(1).compare(&FieldValue::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            FieldValue::Bool(false).compare(&FieldValue::Bool(false)),
            Some(Ordering::Equal)
        );
        assert_eq!(FieldValue::Bool(false).compare(&FieldValue::Bool(true)), None);
    }

    #[test]
    fn test_untagged_json_shape() {
        let json = serde_json::to_string(&vec![
            FieldValue::from("a"),
            FieldValue::Int(2),
            FieldValue::Bool(false),
        ])
        .unwrap();
        assert_eq!(json, r#"["a",2,false]"#);
    }
}
