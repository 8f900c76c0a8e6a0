use async_trait::async_trait;

use crate::user::User;

use super::{FieldValue, Result, UpdateRequest, UpdatedAttributes};

/// Document-store primitives the user store is built on.
///
/// Each method is exactly one request to the store.
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// Returns every record whose `attribute` equals `value`.
    async fn scan(&self, attribute: &str, value: &FieldValue) -> Result<Vec<User>>;

    /// Gets a record by its `user-id`.
    async fn get(&self, user_id: &str) -> Result<Option<User>>;

    /// Writes a record, replacing any record with the same key.
    async fn put(&self, user: &User) -> Result<()>;

    /// Applies a keyed update. An unmet condition is `StoreError::ConditionFailed`.
    async fn update(&self, user_id: &str, request: &UpdateRequest) -> Result<UpdatedAttributes>;
}
