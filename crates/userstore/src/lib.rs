//! User records, sessions and credits on top of a document store.
//!
//! [`UserStore`] is the facade; it runs over any [`UserBackend`], with
//! [`storage::DynamoDbBackend`] (feature `dynamodb`) for production and
//! [`storage::InMemoryBackend`] for tests and local runs.

pub mod config;
pub mod handler;
pub mod storage;
mod store;

pub use config::StoreConfig;
pub use store::{CreateOutcome, LoginOutcome, UserStore};
pub use userstore_core::event::Event;
pub use userstore_core::storage::{
    FieldValue, Result, StoreError, UpdateRequest, UpdatedAttributes, UserBackend, ValueKind,
};
pub use userstore_core::user::User;
