//! Conversions between `User` and attribute maps.
//!
//! Pure functions shared by every backend; the DynamoDB backend only adds the
//! `FieldValue` <-> `AttributeValue` step on top of these.

use crate::storage::{Attributes, FieldValue, StoreError};

use super::{User, CREDITS_ATTR, SESSION_ATTR, USER_ID_ATTR};

/// Convert a User to an attribute map. A cleared session becomes `false`.
pub fn user_to_attributes(user: &User) -> Attributes {
    let mut item = Attributes::new();
    item.insert(
        USER_ID_ATTR.to_string(),
        FieldValue::Str(user.user_id.clone()),
    );
    item.insert(SESSION_ATTR.to_string(), session_value(user.sessionid.as_deref()));
    item.insert(CREDITS_ATTR.to_string(), FieldValue::Int(user.credits));
    item
}

/// Convert an attribute map to a User.
///
/// A missing `credits` attribute reads as 0; a missing or `false` session reads
/// as None.
pub fn attributes_to_user(item: &Attributes) -> Result<User, StoreError> {
    let user_id = match item.get(USER_ID_ATTR) {
        Some(FieldValue::Str(id)) => id.clone(),
        Some(other) => {
            return Err(StoreError::InvalidData(format!(
                "'{USER_ID_ATTR}' must be S, found {}",
                other.type_name()
            )))
        }
        None => {
            return Err(StoreError::InvalidData(format!(
                "missing required attribute '{USER_ID_ATTR}'"
            )))
        }
    };

    let sessionid = match item.get(SESSION_ATTR) {
        Some(FieldValue::Str(id)) if !id.is_empty() => Some(id.clone()),
        Some(FieldValue::Str(_)) | Some(FieldValue::Bool(false)) | None => None,
        Some(other) => {
            return Err(StoreError::InvalidData(format!(
                "'{SESSION_ATTR}' must be S or false, found {other}"
            )))
        }
    };

    let credits = match item.get(CREDITS_ATTR) {
        Some(FieldValue::Int(n)) => *n,
        None => 0,
        Some(other) => {
            return Err(StoreError::InvalidData(format!(
                "'{CREDITS_ATTR}' must be N, found {}",
                other.type_name()
            )))
        }
    };

    Ok(User {
        user_id,
        sessionid,
        credits,
    })
}

/// The stored form of a session: the id, or the `false` sentinel.
///
/// An empty id is stored as the sentinel, since it reads back as no session.
pub fn session_value(sessionid: Option<&str>) -> FieldValue {
    match sessionid {
        Some(id) if !id.is_empty() => FieldValue::Str(id.to_string()),
        _ => FieldValue::Bool(false),
    }
}
