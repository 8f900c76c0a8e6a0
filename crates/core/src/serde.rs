//! Serde helpers for the `sessionid` attribute.
//!
//! A cleared session is stored as the falsy sentinel `false` rather than being
//! removed, so both `false` and `null` read back as `None`.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSession {
    Id(String),
    Flag(bool),
}

/// Deserialize a session id, treating `false`, `null` and empty strings as None.
pub fn deserialize_session<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawSession> = Option::deserialize(deserializer)?;
    match raw {
        Some(RawSession::Id(id)) if !id.is_empty() => Ok(Some(id)),
        Some(RawSession::Flag(true)) => Err(serde::de::Error::custom(
            "sessionid must be a string or false",
        )),
        _ => Ok(None),
    }
}

/// Serialize a session id, writing the `false` sentinel for None.
pub fn serialize_session<S>(session: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match session {
        Some(id) => serializer.serialize_str(id),
        None => serializer.serialize_bool(false),
    }
}
