//! `bookstore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod page;

pub use error::{DomainError, DomainResult};
pub use page::{Page, PageRequest};
