//! Events accepted by the function-style entry point.

use serde::{Deserialize, Serialize};

use crate::storage::{FieldValue, Result, StoreError};

/// Raw invocation event: `{ "action": "get", "key": "...", "value": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// A validated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    /// Find every user whose `attribute` equals `value`.
    Get { attribute: String, value: FieldValue },
}

impl Event {
    pub fn get(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            action: "get".to_string(),
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    /// Validates the event. Only `get` with a key and a scalar value is supported.
    pub fn action(&self) -> Result<EventAction> {
        match self.action.as_str() {
            "get" => {
                let attribute = self
                    .key
                    .clone()
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| StoreError::BadEvent("'get' requires a key".to_string()))?;
                let value = self
                    .value
                    .as_ref()
                    .and_then(FieldValue::from_json)
                    .ok_or_else(|| {
                        StoreError::BadEvent("'get' requires a scalar value".to_string())
                    })?;
                Ok(EventAction::Get { attribute, value })
            }
            other => Err(StoreError::BadEvent(format!("unsupported action '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_event_from_json() {
        let event: Event =
            serde_json::from_str(r#"{"action": "get", "key": "sessionid", "value": "abc123"}"#)
                .unwrap();

        assert_eq!(
            event.action().unwrap(),
            EventAction::Get {
                attribute: "sessionid".to_string(),
                value: FieldValue::from("abc123"),
            }
        );
    }

    #[test]
    fn test_numeric_value() {
        let event = Event::get("credits", 3);
        assert_eq!(
            event.action().unwrap(),
            EventAction::Get {
                attribute: "credits".to_string(),
                value: FieldValue::Int(3),
            }
        );
    }

    #[test]
    fn test_unknown_action_is_bad_event() {
        let event: Event = serde_json::from_str(r#"{"action": "put"}"#).unwrap();
        let err = event.action().unwrap_err();
        assert_eq!(err, StoreError::BadEvent("unsupported action 'put'".to_string()));
        assert_eq!(err.to_string(), "bad event");
    }

    #[test]
    fn test_get_without_key_or_value_is_bad_event() {
        let no_key: Event = serde_json::from_str(r#"{"action": "get", "value": "x"}"#).unwrap();
        let no_value: Event = serde_json::from_str(r#"{"action": "get", "key": "k"}"#).unwrap();
        let object_value = Event::get("k", serde_json::json!({"nested": true}));

        assert!(matches!(no_key.action(), Err(StoreError::BadEvent(_))));
        assert!(matches!(no_value.action(), Err(StoreError::BadEvent(_))));
        assert!(matches!(object_value.action(), Err(StoreError::BadEvent(_))));
    }
}
