use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use thiserror::Error;

use bookstore_catalog::{Book, BookPatch, Isbn};
use bookstore_core::{DomainError, Page, PageRequest};
use bookstore_store::{BookStore, StoreError};

use crate::filter::AttributeFilter;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Inventory service failure.
///
/// Domain failures (validation, missing record, insufficient stock) are kept
/// distinct from store failures so the transport layer can map them to the
/// right responses. Store failures are surfaced as-is; this layer performs
/// no retry or compensation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Inventory management over a [`BookStore`] collaborator.
///
/// Mutating operations (add/remove/update) serialize through a single writer
/// lock: the read-check-write sequence for an ISBN never interleaves with
/// another mutation, so concurrent adds/removes of the same book cannot lose
/// updates. Read-only queries take no extra coordination.
#[derive(Debug)]
pub struct InventoryService<S> {
    store: S,
    write_serial: Mutex<()>,
}

impl<S: BookStore> InventoryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_serial: Mutex::new(()),
        }
    }

    /// Add a book to the inventory.
    ///
    /// If a record with the candidate's ISBN already exists, only its
    /// quantity is increased by the candidate's quantity; the existing
    /// descriptive attributes win (merge-on-add). Otherwise the candidate is
    /// persisted as-is.
    pub fn add_book(&self, candidate: Book) -> ServiceResult<Book> {
        let _guard = self
            .write_serial
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match self.store.get(candidate.isbn())? {
            Some(mut existing) => {
                // Both quantities are >= 0, so the merge cannot go negative;
                // it can still exceed the representable range, which
                // adjust_quantity rejects.
                existing.adjust_quantity(candidate.quantity())?;
                tracing::info!(isbn = %existing.isbn(), quantity = existing.quantity(), "merged stock on add");
                Ok(self.store.put(existing)?)
            }
            None => {
                tracing::info!(isbn = %candidate.isbn(), "added new book");
                Ok(self.store.put(candidate)?)
            }
        }
    }

    /// Remove `amount` copies of the book identified by `isbn`.
    ///
    /// Returns the remaining record, or `None` when the removal drove the
    /// quantity to exactly zero and the record was deleted.
    pub fn remove_book(&self, isbn: &str, amount: i64) -> ServiceResult<Option<Book>> {
        let isbn = Isbn::new(isbn)?;
        if amount <= 0 {
            return Err(DomainError::validation("amount to remove must be greater than zero").into());
        }

        let _guard = self
            .write_serial
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut book = self
            .store
            .get(&isbn)?
            .ok_or_else(|| DomainError::not_found(format!("book with ISBN {isbn} not found")))?;

        book.adjust_quantity(-amount)?;

        if book.quantity() == 0 {
            self.store.delete(&book)?;
            tracing::info!(isbn = %isbn, "stock exhausted, record deleted");
            return Ok(None);
        }

        Ok(Some(self.store.put(book)?))
    }

    /// Overwrite a book's descriptive attributes (title/author/genre/price).
    ///
    /// ISBN and quantity are untouched; quantity is managed only via
    /// [`add_book`](Self::add_book) / [`remove_book`](Self::remove_book).
    pub fn update_book(&self, isbn: &str, patch: BookPatch) -> ServiceResult<Book> {
        let isbn = Isbn::new(isbn)?;

        let _guard = self
            .write_serial
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut book = self
            .store
            .get(&isbn)?
            .ok_or_else(|| DomainError::not_found(format!("book with ISBN {isbn} not found")))?;

        book.apply_patch(patch);
        Ok(self.store.put(book)?)
    }

    /// Fetch a single record by ISBN.
    pub fn book_by_isbn(&self, isbn: &str) -> ServiceResult<Book> {
        let isbn = Isbn::new(isbn)?;
        self.store
            .get(&isbn)?
            .ok_or_else(|| DomainError::not_found(format!("book with ISBN {isbn} not found")).into())
    }

    /// Fetch one page of records filtered by genre, title, or author.
    ///
    /// The raw filter is validated into an [`AttributeFilter`] before the
    /// store is consulted; the store's page is returned verbatim.
    pub fn books_by_attribute(
        &self,
        filter_type: &str,
        filter_value: &str,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<Book>> {
        let filter = AttributeFilter::parse(filter_type, filter_value)?;
        let request = PageRequest::new(page, size)?;

        let result = match filter {
            AttributeFilter::Genre(genre) => self.store.find_by_genre(genre, request)?,
            AttributeFilter::Title(title) => self.store.find_by_title(&title, request)?,
            AttributeFilter::Author(author) => self.store.find_by_author(&author, request)?,
        };
        Ok(result)
    }

    /// Fetch one page of records whose price lies in `[min_price, max_price]`.
    pub fn books_by_price(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<Book>> {
        if min_price.is_sign_negative() || max_price.is_sign_negative() {
            return Err(DomainError::validation("prices must not be negative").into());
        }
        if min_price > max_price {
            return Err(
                DomainError::validation("minimum price must not exceed maximum price").into(),
            );
        }
        let request = PageRequest::new(page, size)?;

        Ok(self.store.find_by_price_range(min_price, max_price, request)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use bookstore_catalog::Genre;
    use bookstore_store::{InMemoryBookStore, StoreResult};

    use super::*;

    fn book(isbn: &str, title: &str, author: &str, genre: Genre, cents: i64, qty: i64) -> Book {
        Book::new(isbn, title, author, genre, Decimal::new(cents, 2), qty).unwrap()
    }

    fn service() -> InventoryService<Arc<InMemoryBookStore>> {
        InventoryService::new(Arc::new(InMemoryBookStore::new()))
    }

    fn assert_validation(err: ServiceError, expected: &str) {
        match err {
            ServiceError::Domain(DomainError::Validation(msg)) => assert_eq!(msg, expected),
            other => panic!("expected Validation({expected:?}), got {other:?}"),
        }
    }

    fn assert_not_found(err: ServiceError) {
        match err {
            ServiceError::Domain(DomainError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn add_persists_new_book_as_is() {
        let svc = service();
        let stored = svc
            .add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();
        assert_eq!(stored.quantity(), 5);
        assert_eq!(svc.book_by_isbn("ISBN001").unwrap().title(), "Dune");
    }

    #[test]
    fn add_merges_quantity_and_keeps_original_attributes() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();

        // Second add carries different descriptive fields; only quantity merges.
        let merged = svc
            .add_book(book("ISBN001", "Doon", "F. Hebert", Genre::Fantasy, 99, 3))
            .unwrap();

        assert_eq!(merged.quantity(), 8);
        assert_eq!(merged.title(), "Dune");
        assert_eq!(merged.author(), "Frank Herbert");
        assert_eq!(merged.genre(), Genre::ScienceFiction);
        assert_eq!(merged.price(), Decimal::new(1500, 2));
    }

    #[test]
    fn add_merge_of_huge_quantities_fails_and_leaves_stock_unchanged() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, i64::MAX))
            .unwrap();

        let err = svc
            .add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, i64::MAX))
            .unwrap_err();
        match err {
            ServiceError::Domain(DomainError::InvariantViolation(msg)) => {
                assert_eq!(msg, "stock quantity out of range")
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
        assert_eq!(svc.book_by_isbn("ISBN001").unwrap().quantity(), i64::MAX);
    }

    #[test]
    fn remove_decrements_and_returns_remaining_record() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();

        let remaining = svc.remove_book("ISBN001", 2).unwrap().unwrap();
        assert_eq!(remaining.quantity(), 3);
    }

    #[test]
    fn remove_to_exactly_zero_deletes_the_record() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();

        assert!(svc.remove_book("ISBN001", 5).unwrap().is_none());
        assert_not_found(svc.book_by_isbn("ISBN001").unwrap_err());
    }

    #[test]
    fn remove_more_than_stock_fails_and_leaves_stock_unchanged() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();

        let err = svc.remove_book("ISBN001", 6).unwrap_err();
        match err {
            ServiceError::Domain(DomainError::InvariantViolation(msg)) => {
                assert_eq!(msg, "not enough stock available")
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
        assert_eq!(svc.book_by_isbn("ISBN001").unwrap().quantity(), 5);
    }

    #[test]
    fn remove_rejects_blank_isbn_and_non_positive_amount() {
        let svc = service();
        assert_validation(svc.remove_book(" ", 1).unwrap_err(), "ISBN must not be blank");
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();
        assert_validation(
            svc.remove_book("ISBN001", 0).unwrap_err(),
            "amount to remove must be greater than zero",
        );
        assert_validation(
            svc.remove_book("ISBN001", -3).unwrap_err(),
            "amount to remove must be greater than zero",
        );
    }

    #[test]
    fn remove_unknown_isbn_is_not_found() {
        let svc = service();
        assert_not_found(svc.remove_book("ISBN404", 1).unwrap_err());
    }

    #[test]
    fn update_overwrites_descriptive_fields_and_preserves_quantity() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();

        let patch = BookPatch::new(
            "Dune (Deluxe Edition)",
            "Frank Herbert",
            Genre::ScienceFiction,
            Decimal::new(2999, 2),
        )
        .unwrap();
        let updated = svc.update_book("ISBN001", patch).unwrap();

        assert_eq!(updated.title(), "Dune (Deluxe Edition)");
        assert_eq!(updated.price(), Decimal::new(2999, 2));
        assert_eq!(updated.quantity(), 5);
        assert_eq!(updated.isbn().as_str(), "ISBN001");
    }

    #[test]
    fn update_unknown_isbn_is_not_found() {
        let svc = service();
        let patch =
            BookPatch::new("Dune", "Frank Herbert", Genre::ScienceFiction, Decimal::ONE).unwrap();
        assert_not_found(svc.update_book("ISBN404", patch).unwrap_err());
    }

    #[test]
    fn get_rejects_blank_isbn() {
        let svc = service();
        assert_validation(svc.book_by_isbn("").unwrap_err(), "ISBN must not be blank");
    }

    #[test]
    fn attribute_filter_is_case_insensitive_for_type_and_genre_value() {
        let svc = service();
        svc.add_book(book("ISBN001", "Emma", "Jane Austen", Genre::Fiction, 999, 2))
            .unwrap();

        let upper = svc.books_by_attribute("GENRE", "fiction", 0, 10).unwrap();
        let lower = svc.books_by_attribute("genre", "FICTION", 0, 10).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.total_elements, 1);
    }

    #[test]
    fn attribute_filter_by_title_and_author() {
        let svc = service();
        svc.add_book(book("ISBN001", "Emma", "Jane Austen", Genre::Fiction, 999, 2))
            .unwrap();
        svc.add_book(book("ISBN002", "Persuasion", "Jane Austen", Genre::Fiction, 999, 2))
            .unwrap();

        let by_title = svc.books_by_attribute("title", "Emma", 0, 10).unwrap();
        assert_eq!(by_title.total_elements, 1);

        let by_author = svc.books_by_attribute("author", "Jane Austen", 0, 10).unwrap();
        assert_eq!(by_author.total_elements, 2);
    }

    #[test]
    fn attribute_filter_rejects_invalid_type_and_genre() {
        let svc = service();
        assert_validation(
            svc.books_by_attribute("publisher", "Ace", 0, 10).unwrap_err(),
            "invalid filter type: publisher",
        );
        assert_validation(
            svc.books_by_attribute("genre", "cooking", 0, 10).unwrap_err(),
            "invalid genre: cooking",
        );
    }

    #[test]
    fn attribute_filter_rejects_zero_page_size() {
        let svc = service();
        assert_validation(
            svc.books_by_attribute("title", "Emma", 0, 0).unwrap_err(),
            "page size must be greater than zero",
        );
    }

    /// Store wrapper that counts query calls, for asserting that invalid
    /// input is rejected before the store is consulted.
    struct CountingStore {
        inner: InMemoryBookStore,
        queries: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryBookStore::new(),
                queries: AtomicUsize::new(0),
            }
        }
    }

    impl BookStore for CountingStore {
        fn get(&self, isbn: &Isbn) -> StoreResult<Option<Book>> {
            self.inner.get(isbn)
        }

        fn put(&self, book: Book) -> StoreResult<Book> {
            self.inner.put(book)
        }

        fn delete(&self, book: &Book) -> StoreResult<()> {
            self.inner.delete(book)
        }

        fn find_by_title(&self, title: &str, page: PageRequest) -> StoreResult<Page<Book>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_title(title, page)
        }

        fn find_by_author(&self, author: &str, page: PageRequest) -> StoreResult<Page<Book>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_author(author, page)
        }

        fn find_by_genre(&self, genre: Genre, page: PageRequest) -> StoreResult<Page<Book>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_genre(genre, page)
        }

        fn find_by_price_range(
            &self,
            min_price: Decimal,
            max_price: Decimal,
            page: PageRequest,
        ) -> StoreResult<Page<Book>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_price_range(min_price, max_price, page)
        }
    }

    #[test]
    fn price_range_with_min_above_max_fails_without_touching_the_store() {
        let store = Arc::new(CountingStore::new());
        let svc = InventoryService::new(Arc::clone(&store));

        let err = svc
            .books_by_price(Decimal::from(30), Decimal::from(10), 0, 10)
            .unwrap_err();
        assert_validation(err, "minimum price must not exceed maximum price");
        assert_eq!(store.queries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn price_range_rejects_negative_bounds() {
        let svc = service();
        let err = svc
            .books_by_price(Decimal::from(-1), Decimal::from(10), 0, 10)
            .unwrap_err();
        assert_validation(err, "prices must not be negative");
    }

    #[test]
    fn price_range_returns_inclusive_page() {
        let svc = service();
        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();
        svc.add_book(book("ISBN002", "Emma", "Jane Austen", Genre::Romance, 999, 2))
            .unwrap();

        let result = svc
            .books_by_price(Decimal::new(999, 2), Decimal::new(1500, 2), 0, 10)
            .unwrap();
        assert_eq!(result.total_elements, 2);
    }

    #[test]
    fn dune_scenario_end_to_end() {
        let svc = service();

        svc.add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 5))
            .unwrap();
        let merged = svc
            .add_book(book("ISBN001", "Dune", "Frank Herbert", Genre::ScienceFiction, 1500, 3))
            .unwrap();
        assert_eq!(merged.quantity(), 8);
        assert_eq!(merged.title(), "Dune");

        assert!(svc.remove_book("ISBN001", 8).unwrap().is_none());
        assert_not_found(svc.book_by_isbn("ISBN001").unwrap_err());
    }
}
