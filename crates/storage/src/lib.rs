//! Local key/value state for the quiz client: the generated card set and the
//! signed-in user, backed by memory or SQLite.

#![forbid(unsafe_code)]

pub mod cache;
pub mod repository;
pub mod sqlite;

pub use cache::LocalCache;
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
