//! In-memory storage backend implementation.

mod repository;

pub use repository::InMemoryBackend;
