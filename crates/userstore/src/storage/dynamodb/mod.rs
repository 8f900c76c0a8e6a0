//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `UserBackend`
//! using `aws-sdk-dynamodb`. Items live in a single table whose hash key is
//! the `user-id` string attribute.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbBackend;
