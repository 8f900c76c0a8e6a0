//! Core types for the user store: the `User` record, attribute values,
//! update/condition expressions, errors and the backend trait.
//!
//! Everything here is pure and free of AWS types; backends live in the
//! `userstore` crate.

pub mod event;
pub mod serde;
pub mod storage;
pub mod user;
