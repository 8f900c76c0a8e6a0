//! Canned update requests issued by the user store.
//!
//! Pure functions, no I/O.

use crate::user::{session_value, CREDITS_ATTR, SESSION_ATTR};

use super::UpdateRequest;

/// `SET sessionid = :sid` with the given session id.
pub fn set_session(sessionid: &str) -> UpdateRequest {
    UpdateRequest::new(format!("set {SESSION_ATTR} = :sid"))
        .with_value(":sid", session_value(Some(sessionid)))
}

/// `SET sessionid = :sid` with the `false` sentinel.
pub fn clear_session() -> UpdateRequest {
    UpdateRequest::new(format!("set {SESSION_ATTR} = :sid")).with_value(":sid", session_value(None))
}

/// Server-side increment of the credit counter.
pub fn add_credit() -> UpdateRequest {
    UpdateRequest::new(format!("set {CREDITS_ATTR} = {CREDITS_ATTR} + :val")).with_value(":val", 1)
}

/// Server-side decrement of the credit counter, rejected unless `credits > 0`.
pub fn use_credit() -> UpdateRequest {
    UpdateRequest::new(format!("set {CREDITS_ATTR} = {CREDITS_ATTR} - :val"))
        .with_condition(format!("{CREDITS_ATTR} > :min"))
        .with_value(":val", 1)
        .with_value(":min", 0)
}
