use std::collections::HashMap;

use super::{Attributes, FieldValue};

/// A keyed update: update expression, optional condition, and the name and
/// value maps both expressions draw from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub update_expression: String,
    pub condition_expression: Option<String>,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, FieldValue>,
}

impl UpdateRequest {
    /// Creates an unconditional update.
    pub fn new(update_expression: impl Into<String>) -> Self {
        Self {
            update_expression: update_expression.into(),
            ..Self::default()
        }
    }

    /// Attaches a condition the backend must verify at write time.
    pub fn with_condition(mut self, condition_expression: impl Into<String>) -> Self {
        self.condition_expression = Some(condition_expression.into());
        self
    }

    /// Binds a `#alias` to an attribute name.
    pub fn with_name(mut self, alias: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(alias.into(), name.into());
        self
    }

    /// Binds a `:placeholder` to a value.
    pub fn with_value(
        mut self,
        placeholder: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.values.insert(placeholder.into(), value.into());
        self
    }
}

/// New values of the attributes an update touched.
pub type UpdatedAttributes = Attributes;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = UpdateRequest::new("set credits = credits - :val")
            .with_condition("credits > :min")
            .with_value(":val", 1)
            .with_value(":min", 0)
            .with_name("#s", "sessionid");

        assert_eq!(request.update_expression, "set credits = credits - :val");
        assert_eq!(request.condition_expression.as_deref(), Some("credits > :min"));
        assert_eq!(request.values.get(":val"), Some(&FieldValue::Int(1)));
        assert_eq!(request.values.get(":min"), Some(&FieldValue::Int(0)));
        assert_eq!(request.names.get("#s").map(String::as_str), Some("sessionid"));
    }

    #[test]
    fn test_new_is_unconditional() {
        let request = UpdateRequest::new("set a = :b");
        assert!(request.condition_expression.is_none());
        assert!(request.names.is_empty());
        assert!(request.values.is_empty());
    }
}
