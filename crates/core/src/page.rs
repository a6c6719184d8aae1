//! Pagination primitives shared by the store and service layers.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A bounded slice of query results plus the total matching count.
///
/// Pages are addressed by zero-based page index and page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_elements: u64) -> Self {
        Self {
            items,
            total_elements,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_elements: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_elements: self.total_elements,
        }
    }
}

/// Validated page request (zero-based index, non-zero size).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> DomainResult<Self> {
        if size == 0 {
            return Err(DomainError::validation(
                "page size must be greater than zero",
            ));
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }
}
