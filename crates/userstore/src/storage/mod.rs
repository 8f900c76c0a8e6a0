//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `UserBackend` trait
//! defined in `userstore_core::storage`.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always compiled; it backs the tests and can be
//! used for local runs that need no AWS access.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbBackend;

pub use inmemory::InMemoryBackend;
