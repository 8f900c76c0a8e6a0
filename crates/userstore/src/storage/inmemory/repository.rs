//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use userstore_core::storage::expression::{
    apply_update, evaluate_condition, parse_condition, parse_update, ExpressionContext,
};
use userstore_core::storage::{
    Attributes, FieldValue, Result, StoreError, UpdateRequest, UpdatedAttributes, UserBackend,
};
use userstore_core::user::{attributes_to_user, user_to_attributes, User, USER_ID_ATTR};

/// In-memory user backend for testing and local runs.
///
/// Items are attribute maps keyed by `user-id` in a `BTreeMap` wrapped in
/// `Arc<RwLock<_>>`, so scans come back in key order and clones share state.
/// Updates are evaluated with the core expression engine and behave like
/// DynamoDB's: conditions are checked against the stored item, a missing item
/// is created by the update, and key attributes cannot be modified.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    items: Arc<RwLock<BTreeMap<String, Attributes>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend seeded with the given users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let items = users
            .into_iter()
            .map(|user| (user.user_id.clone(), user_to_attributes(&user)))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl UserBackend for InMemoryBackend {
    async fn scan(&self, attribute: &str, value: &FieldValue) -> Result<Vec<User>> {
        let items = self.items.read().await;
        items
            .values()
            .filter(|item| item.get(attribute) == Some(value))
            .map(attributes_to_user)
            .collect()
    }

    async fn get(&self, user_id: &str) -> Result<Option<User>> {
        let items = self.items.read().await;
        items.get(user_id).map(attributes_to_user).transpose()
    }

    async fn put(&self, user: &User) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(user.user_id.clone(), user_to_attributes(user));
        Ok(())
    }

    async fn update(&self, user_id: &str, request: &UpdateRequest) -> Result<UpdatedAttributes> {
        let assignments = parse_update(&request.update_expression)?;
        let condition = request
            .condition_expression
            .as_deref()
            .map(parse_condition)
            .transpose()?;
        let ctx = ExpressionContext::new(&request.names, &request.values);

        let mut items = self.items.write().await;
        let stored = items.get(user_id);

        if let Some(clauses) = &condition {
            let empty = Attributes::new();
            if !evaluate_condition(stored.unwrap_or(&empty), clauses, &ctx)? {
                return Err(StoreError::ConditionFailed);
            }
        }

        let mut item = stored.cloned().unwrap_or_else(|| {
            Attributes::from([(
                USER_ID_ATTR.to_string(),
                FieldValue::Str(user_id.to_string()),
            )])
        });
        let updated = apply_update(&mut item, &assignments, &ctx)?;

        if updated.contains_key(USER_ID_ATTR) {
            return Err(StoreError::InvalidExpression(format!(
                "cannot update attribute {USER_ID_ATTR}, it is part of the key"
            )));
        }
        // Reject writes that would leave an undecodable record behind.
        attributes_to_user(&item)?;

        items.insert(user_id.to_string(), item);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userstore_core::storage::updates;

    fn seeded() -> InMemoryBackend {
        InMemoryBackend::with_users([
            User::new("u1").with_session("abc123").with_credits(3),
            User::new("u2").with_credits(0),
        ])
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let backend = InMemoryBackend::new();
        let user = User::new("u1").with_session("s1");

        backend.put(&user).await.unwrap();

        assert_eq!(backend.get("u1").await.unwrap(), Some(user));
        assert_eq!(backend.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let backend = seeded();
        backend.put(&User::new("u1")).await.unwrap();

        let user = backend.get("u1").await.unwrap().unwrap();
        assert_eq!(user.credits, 0);
        assert_eq!(user.sessionid, None);
        assert_eq!(backend.len().await, 2);
    }

    #[tokio::test]
    async fn test_scan_matches_attribute() {
        let backend = seeded();

        let found = backend
            .scan("sessionid", &FieldValue::from("abc123"))
            .await
            .unwrap();
        assert_eq!(found, vec![User::new("u1").with_session("abc123").with_credits(3)]);

        let none = backend
            .scan("sessionid", &FieldValue::from("nope"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_scan_on_cleared_session_sentinel() {
        let backend = seeded();

        let logged_out = backend
            .scan("sessionid", &FieldValue::Bool(false))
            .await
            .unwrap();
        assert_eq!(logged_out.len(), 1);
        assert_eq!(logged_out[0].user_id, "u2");
    }

    #[tokio::test]
    async fn test_update_returns_new_values() {
        let backend = seeded();

        let updated = backend.update("u1", &updates::add_credit()).await.unwrap();

        assert_eq!(updated.get("credits"), Some(&FieldValue::Int(4)));
        assert_eq!(backend.get("u1").await.unwrap().unwrap().credits, 4);
    }

    #[tokio::test]
    async fn test_failed_condition_leaves_item_untouched() {
        let backend = seeded();

        let err = backend.update("u2", &updates::use_credit()).await.unwrap_err();

        assert_eq!(err, StoreError::ConditionFailed);
        assert_eq!(backend.get("u2").await.unwrap().unwrap().credits, 0);
    }

    #[tokio::test]
    async fn test_update_creates_missing_item() {
        let backend = InMemoryBackend::new();

        backend
            .update("u9", &updates::set_session("s9"))
            .await
            .unwrap();

        let user = backend.get("u9").await.unwrap().unwrap();
        assert_eq!(user.sessionid.as_deref(), Some("s9"));
        assert_eq!(user.credits, 0);
    }

    #[tokio::test]
    async fn test_increment_on_missing_item_fails() {
        let backend = InMemoryBackend::new();

        let result = backend.update("u9", &updates::add_credit()).await;

        assert!(matches!(result, Err(StoreError::InvalidExpression(_))));
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_key_cannot_be_updated() {
        let backend = seeded();
        let request = UpdateRequest::new("set #id = :id")
            .with_name("#id", "user-id")
            .with_value(":id", "u3");

        let result = backend.update("u1", &request).await;

        assert!(matches!(result, Err(StoreError::InvalidExpression(_))));
        assert!(backend.get("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_rejects_undecodable_record() {
        let backend = seeded();
        let request = UpdateRequest::new("set credits = :c").with_value(":c", "lots");

        let result = backend.update("u1", &request).await;

        assert!(matches!(result, Err(StoreError::InvalidData(_))));
        assert_eq!(backend.get("u1").await.unwrap().unwrap().credits, 3);
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let backend = InMemoryBackend::new();
        let clone = backend.clone();

        backend.put(&User::new("u1")).await.unwrap();

        assert!(clone.get("u1").await.unwrap().is_some());
    }
}
