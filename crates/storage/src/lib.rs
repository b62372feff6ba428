#![forbid(unsafe_code)]

pub mod repository;
pub mod session_store;
pub mod sqlite;

pub use repository::{InMemoryStore, LocalStore, Storage, StorageError};
pub use session_store::{SessionStore, StorageKey};
