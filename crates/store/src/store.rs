use rust_decimal::Decimal;
use thiserror::Error;

use bookstore_catalog::{Book, Genre, Isbn};
use bookstore_core::{Page, PageRequest};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the store collaborator.
///
/// Opaque to callers: the service layer surfaces it without retry or
/// compensation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Keyed book store with predicate queries and pagination.
///
/// The store is the sole source of truth for "does a record with this ISBN
/// currently exist". Point lookups and writes are keyed by ISBN; the query
/// methods return one page of matches plus the total matching count.
pub trait BookStore: Send + Sync {
    fn get(&self, isbn: &Isbn) -> StoreResult<Option<Book>>;

    /// Insert or replace the record keyed by its ISBN, returning the stored
    /// record.
    fn put(&self, book: Book) -> StoreResult<Book>;

    fn delete(&self, book: &Book) -> StoreResult<()>;

    fn find_by_title(&self, title: &str, page: PageRequest) -> StoreResult<Page<Book>>;

    fn find_by_author(&self, author: &str, page: PageRequest) -> StoreResult<Page<Book>>;

    fn find_by_genre(&self, genre: Genre, page: PageRequest) -> StoreResult<Page<Book>>;

    /// Inclusive on both bounds.
    fn find_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        page: PageRequest,
    ) -> StoreResult<Page<Book>>;
}

impl<S> BookStore for std::sync::Arc<S>
where
    S: BookStore + ?Sized,
{
    fn get(&self, isbn: &Isbn) -> StoreResult<Option<Book>> {
        (**self).get(isbn)
    }

    fn put(&self, book: Book) -> StoreResult<Book> {
        (**self).put(book)
    }

    fn delete(&self, book: &Book) -> StoreResult<()> {
        (**self).delete(book)
    }

    fn find_by_title(&self, title: &str, page: PageRequest) -> StoreResult<Page<Book>> {
        (**self).find_by_title(title, page)
    }

    fn find_by_author(&self, author: &str, page: PageRequest) -> StoreResult<Page<Book>> {
        (**self).find_by_author(author, page)
    }

    fn find_by_genre(&self, genre: Genre, page: PageRequest) -> StoreResult<Page<Book>> {
        (**self).find_by_genre(genre, page)
    }

    fn find_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        page: PageRequest,
    ) -> StoreResult<Page<Book>> {
        (**self).find_by_price_range(min_price, max_price, page)
    }
}
