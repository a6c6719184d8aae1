//! `bookstore-store` — the durable record store collaborator.
//!
//! The service layer talks to [`BookStore`] only; physical storage is this
//! crate's concern. The in-memory implementation backs tests and dev.

pub mod in_memory;
pub mod store;

pub use in_memory::InMemoryBookStore;
pub use store::{BookStore, StoreError, StoreResult};
