//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and the
//! core attribute model. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use userstore_core::storage::{Attributes, FieldValue, StoreError};
use userstore_core::user::{
    attributes_to_user, user_to_attributes, User, CREDITS_ATTR, SESSION_ATTR, USER_ID_ATTR,
};

pub type Item = HashMap<String, AttributeValue>;

/// Convert a FieldValue to a DynamoDB AttributeValue.
pub fn field_to_attribute(value: &FieldValue) -> AttributeValue {
    match value {
        FieldValue::Str(s) => AttributeValue::S(s.clone()),
        FieldValue::Int(n) => AttributeValue::N(n.to_string()),
        FieldValue::Bool(b) => AttributeValue::Bool(*b),
    }
}

/// Convert a DynamoDB AttributeValue to a FieldValue. `NULL` reads as absent.
pub fn attribute_to_field(
    name: &str,
    value: &AttributeValue,
) -> Result<Option<FieldValue>, StoreError> {
    match value {
        AttributeValue::S(s) => Ok(Some(FieldValue::Str(s.clone()))),
        AttributeValue::N(n) => n.parse::<i64>().map(|n| Some(FieldValue::Int(n))).map_err(|e| {
            StoreError::InvalidData(format!("'{name}' is not an integer ({n}): {e}"))
        }),
        AttributeValue::Bool(b) => Ok(Some(FieldValue::Bool(*b))),
        AttributeValue::Null(_) => Ok(None),
        other => Err(StoreError::InvalidData(format!(
            "'{name}' has an unsupported type: {:?}",
            other
        ))),
    }
}

/// Convert a User to a DynamoDB item.
pub fn user_to_item(user: &User) -> Item {
    values_to_item(&user_to_attributes(user))
}

/// Convert a DynamoDB item to a User.
///
/// Only the user attributes are read; other attributes on the item are ignored.
pub fn item_to_user(item: &Item) -> Result<User, StoreError> {
    let mut attributes = Attributes::new();
    for name in [USER_ID_ATTR, SESSION_ATTR, CREDITS_ATTR] {
        if let Some(value) = item.get(name) {
            if let Some(field) = attribute_to_field(name, value)? {
                attributes.insert(name.to_string(), field);
            }
        }
    }
    attributes_to_user(&attributes)
}

/// Convert a name/value map (expression values, updated attributes) to DynamoDB form.
pub fn values_to_item(values: &HashMap<String, FieldValue>) -> Item {
    values
        .iter()
        .map(|(name, value)| (name.clone(), field_to_attribute(value)))
        .collect()
}

/// Convert the attributes returned by an update back to the core model.
pub fn item_to_values(item: &Item) -> Result<Attributes, StoreError> {
    let mut attributes = Attributes::new();
    for (name, value) in item {
        if let Some(field) = attribute_to_field(name, value)? {
            attributes.insert(name.clone(), field);
        }
    }
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_to_item() {
        let user = User::new("u1").with_session("abc123").with_credits(3);
        let item = user_to_item(&user);

        assert_eq!(item.get("user-id"), Some(&AttributeValue::S("u1".to_string())));
        assert_eq!(
            item.get("sessionid"),
            Some(&AttributeValue::S("abc123".to_string()))
        );
        assert_eq!(item.get("credits"), Some(&AttributeValue::N("3".to_string())));
    }

    #[test]
    fn test_cleared_session_is_stored_as_false() {
        let item = user_to_item(&User::new("u1"));
        assert_eq!(item.get("sessionid"), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn test_item_to_user_round_trip() {
        let user = User::new("u1").with_session("abc123").with_credits(3);
        assert_eq!(item_to_user(&user_to_item(&user)).unwrap(), user);
    }

    #[test]
    fn test_item_to_user_ignores_foreign_attributes() {
        let mut item = user_to_item(&User::new("u1"));
        item.insert(
            "tags".to_string(),
            AttributeValue::Ss(vec!["a".to_string()]),
        );

        assert_eq!(item_to_user(&item).unwrap(), User::new("u1"));
    }

    #[test]
    fn test_null_session_reads_as_none() {
        let mut item = Item::new();
        item.insert("user-id".to_string(), AttributeValue::S("u1".to_string()));
        item.insert("sessionid".to_string(), AttributeValue::Null(true));
        item.insert("credits".to_string(), AttributeValue::N("0".to_string()));

        assert_eq!(item_to_user(&item).unwrap().sessionid, None);
    }

    #[test]
    fn test_fractional_credits_are_invalid() {
        let mut item = Item::new();
        item.insert("user-id".to_string(), AttributeValue::S("u1".to_string()));
        item.insert("credits".to_string(), AttributeValue::N("1.5".to_string()));

        assert!(matches!(
            item_to_user(&item),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_item_to_values() {
        let mut item = Item::new();
        item.insert("credits".to_string(), AttributeValue::N("4".to_string()));

        let values = item_to_values(&item).unwrap();
        assert_eq!(values.get("credits"), Some(&FieldValue::Int(4)));
    }
}
