//! Function-style entry point: one JSON event in, one JSON answer out.

use serde_json::Value;

use userstore_core::event::{Event, EventAction};
use userstore_core::storage::{Result, StoreError, UserBackend};

use crate::UserStore;

/// Handles a parsed event. Only `get` is supported and maps to `find`.
pub async fn handle_event<B: UserBackend>(store: &UserStore<B>, event: &Event) -> Result<Value> {
    tracing::info!(action = %event.action, "Handling event");

    let action = event.action().inspect_err(|e| {
        if let StoreError::BadEvent(detail) = e {
            tracing::warn!(action = %event.action, detail, "Rejecting event");
        }
    })?;

    match action {
        EventAction::Get { attribute, value } => {
            let users = store.find(&attribute, value).await?;
            serde_json::to_value(users).map_err(|e| StoreError::InvalidData(e.to_string()))
        }
    }
}

/// Parses a raw JSON event and handles it. Unparseable input is a bad event.
pub async fn handle_raw_event<B: UserBackend>(store: &UserStore<B>, raw: &str) -> Result<Value> {
    let event: Event = serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting unparseable event");
        StoreError::BadEvent(e.to_string())
    })?;
    handle_event(store, &event).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;
    use userstore_core::user::User;

    fn store() -> UserStore<InMemoryBackend> {
        UserStore::new(InMemoryBackend::with_users([
            User::new("u1").with_session("abc123").with_credits(3),
            User::new("u2").with_credits(3),
        ]))
    }

    #[tokio::test]
    async fn test_get_event_finds_users() {
        let answer = handle_event(&store(), &Event::get("sessionid", "abc123"))
            .await
            .unwrap();

        assert_eq!(
            answer,
            serde_json::json!([{"user-id": "u1", "sessionid": "abc123", "credits": 3}])
        );
    }

    #[tokio::test]
    async fn test_raw_get_event_with_numeric_value() {
        let answer = handle_raw_event(&store(), r#"{"action": "get", "key": "credits", "value": 3}"#)
            .await
            .unwrap();

        assert_eq!(answer.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_unsupported_action() {
        let err = handle_raw_event(&store(), r#"{"action": "delete", "key": "user-id"}"#)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::BadEvent(_)));
        assert_eq!(err.to_string(), "bad event");
    }

    #[tokio::test]
    async fn test_malformed_event() {
        let err = handle_raw_event(&store(), "not json").await.unwrap_err();

        assert!(matches!(err, StoreError::BadEvent(_)));
        assert_eq!(err.to_string(), "bad event");
    }
}
