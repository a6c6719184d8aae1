//! `bookstore-inventory` — inventory management business logic.
//!
//! Orchestrates add/remove/update/query operations against the book store
//! collaborator, enforcing the cross-operation rules: merge-on-add,
//! delete-on-zero, and filter validation at the boundary.

pub mod filter;
pub mod service;

pub use filter::AttributeFilter;
pub use service::{InventoryService, ServiceError, ServiceResult};
