use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_session, serialize_session};

/// Primary key attribute name.
pub const USER_ID_ATTR: &str = "user-id";
/// Session attribute name.
pub const SESSION_ATTR: &str = "sessionid";
/// Credit counter attribute name.
pub const CREDITS_ATTR: &str = "credits";

/// A user record, keyed by `user-id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "user-id")]
    pub user_id: String,
    /// Active login session. `None` once the user logged out.
    #[serde(
        default,
        deserialize_with = "deserialize_session",
        serialize_with = "serialize_session"
    )]
    pub sessionid: Option<String>,
    /// Never negative once written through the store.
    #[serde(default)]
    pub credits: i64,
}

impl User {
    /// Creates a user without a session and with no credits.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            sessionid: None,
            credits: 0,
        }
    }

    /// Sets the session id for this user.
    pub fn with_session(mut self, sessionid: impl Into<String>) -> Self {
        self.sessionid = Some(sessionid.into());
        self
    }

    /// Sets the credit balance (useful for seeding tests).
    pub fn with_credits(mut self, credits: i64) -> Self {
        self.credits = credits;
        self
    }

    /// Returns true if the user has an active session.
    pub fn is_logged_in(&self) -> bool {
        self.sessionid.is_some()
    }
}
