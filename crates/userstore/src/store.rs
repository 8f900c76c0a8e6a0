//! The user store facade.
//!
//! Translates user-level operations (login, logout, credits) into scans,
//! keyed gets, puts and conditional updates against a `UserBackend`. Every
//! operation is one request to the backend, except `login` which issues two.

use serde::Serialize;
use userstore_core::storage::{
    updates, FieldValue, Result, StoreError, UpdateRequest, UpdatedAttributes, UserBackend,
};
use userstore_core::user::{session_from_cookie, User, SESSION_ATTR};

/// Acknowledgement of `create`. Serializes as `"success"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreateOutcome {
    #[serde(rename = "success")]
    Created,
}

/// What `login` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The user did not exist and was created with no credits.
    Created,
    /// The user existed; only its session changed.
    SessionUpdated(UpdatedAttributes),
}

/// Facade over one user table.
#[derive(Debug, Clone)]
pub struct UserStore<B> {
    backend: B,
}

impl<B: UserBackend> UserStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns every user whose `attribute` equals `value`.
    ///
    /// This is a full-table scan without pagination, meant for small result sets.
    pub async fn find(&self, attribute: &str, value: impl Into<FieldValue>) -> Result<Vec<User>> {
        let value = value.into();
        tracing::debug!(attribute, %value, "Getting users by attribute");

        let users = self.backend.scan(attribute, &value).await?;

        tracing::debug!(attribute, count = users.len(), "Scan finished");
        Ok(users)
    }

    /// Like `find`, but exactly one user must match.
    pub async fn find_one(&self, attribute: &str, value: impl Into<FieldValue>) -> Result<User> {
        let mut users = self.find(attribute, value).await?;
        if users.len() != 1 {
            return Err(StoreError::NotUnique { count: users.len() });
        }
        users
            .pop()
            .ok_or(StoreError::NotUnique { count: 0 })
    }

    /// Looks up a user by id.
    pub async fn exists(&self, user_id: &str) -> Result<Option<User>> {
        tracing::debug!(user_id, "Checking whether user exists");

        let user = self.backend.get(user_id).await?;

        tracing::debug!(user_id, exists = user.is_some(), "User lookup finished");
        Ok(user)
    }

    /// Applies a keyed, optionally conditioned update.
    pub async fn update(&self, user_id: &str, request: &UpdateRequest) -> Result<UpdatedAttributes> {
        tracing::debug!(
            user_id,
            update = %request.update_expression,
            condition = ?request.condition_expression,
            "Updating user"
        );

        let updated = self.backend.update(user_id, request).await?;

        tracing::debug!(user_id, "User successfully updated");
        Ok(updated)
    }

    /// Writes a new user with zero credits. An existing record with the same id
    /// is replaced.
    pub async fn create(&self, user: &User) -> Result<CreateOutcome> {
        let record = User {
            credits: 0,
            ..user.clone()
        };
        tracing::info!(user_id = %record.user_id, "Creating user");

        self.backend.put(&record).await?;
        Ok(CreateOutcome::Created)
    }

    /// Sets the session of a user.
    pub async fn set_session(&self, user_id: &str, sessionid: &str) -> Result<UpdatedAttributes> {
        tracing::debug!(user_id, "Setting user session");
        self.update(user_id, &updates::set_session(sessionid)).await
    }

    /// Clears the session of a user, whatever it was.
    pub async fn clear_session(&self, user_id: &str) -> Result<UpdatedAttributes> {
        tracing::debug!(user_id, "Clearing user session");
        self.update(user_id, &updates::clear_session()).await
    }

    /// Creates the user if it does not exist, otherwise only sets its session.
    ///
    /// The existence check and the create are two separate requests, so two
    /// concurrent logins for the same new user may both create it.
    pub async fn login(&self, user: &User) -> Result<LoginOutcome> {
        tracing::info!(user_id = %user.user_id, "Logging in user");

        if self.exists(&user.user_id).await?.is_some() {
            let request = match user.sessionid.as_deref() {
                Some(sessionid) => updates::set_session(sessionid),
                None => updates::clear_session(),
            };
            let updated = self.update(&user.user_id, &request).await?;
            return Ok(LoginOutcome::SessionUpdated(updated));
        }

        self.create(user).await?;
        Ok(LoginOutcome::Created)
    }

    pub async fn logout(&self, user: &User) -> Result<UpdatedAttributes> {
        tracing::info!(user_id = %user.user_id, "Logging out user");
        self.clear_session(&user.user_id).await
    }

    /// Adds one credit with a server-side increment.
    pub async fn add_credit(&self, user: &User) -> Result<UpdatedAttributes> {
        tracing::info!(user_id = %user.user_id, "Adding a credit for the user");
        self.update(&user.user_id, &updates::add_credit()).await
    }

    /// Spends one credit. The decrement is conditioned on `credits > 0` in the
    /// store, so the balance never goes negative.
    pub async fn use_credit(&self, user: &User) -> Result<UpdatedAttributes> {
        tracing::info!(user_id = %user.user_id, "Decrementing a credit from the user");

        match self.update(&user.user_id, &updates::use_credit()).await {
            Err(StoreError::ConditionFailed) => {
                tracing::warn!(user_id = %user.user_id, "User has no credits to spend");
                Err(StoreError::InsufficientCredits)
            }
            result => result,
        }
    }

    /// Returns the single user holding `sessionid`.
    pub async fn user_for_session(&self, sessionid: &str) -> Result<User> {
        tracing::debug!("Finding user for session");
        self.find_one(SESSION_ATTR, sessionid).await
    }

    /// Resolves the user behind the `sessionid` cookie of a raw `Cookie` header.
    pub async fn user_from_cookie(&self, header: Option<&str>) -> Result<User> {
        let sessionid = session_from_cookie(header)?;

        match self.user_for_session(&sessionid).await {
            Err(StoreError::NotUnique { count }) => {
                tracing::warn!(count, "Session cookie did not resolve to a single user");
                Err(StoreError::UnknownSession(sessionid))
            }
            result => result,
        }
    }
}
