use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use bookstore_catalog::{Book, Genre, Isbn};
use bookstore_core::{Page, PageRequest};

use crate::store::{BookStore, StoreError, StoreResult};

/// In-memory book store for tests/dev.
///
/// Matching is exact on title/author (the predicate queries filter, they do
/// not search). Pages are ordered by ISBN so repeated queries are
/// deterministic.
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    inner: RwLock<HashMap<Isbn, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    fn query(&self, predicate: impl Fn(&Book) -> bool, page: PageRequest) -> StoreResult<Page<Book>> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("store lock poisoned"))?;

        let mut matches: Vec<Book> = map.values().filter(|b| predicate(b)).cloned().collect();
        matches.sort_by(|a, b| a.isbn().as_str().cmp(b.isbn().as_str()));

        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(page.offset())
            .take(page.size() as usize)
            .collect();

        Ok(Page::new(items, total))
    }
}

impl BookStore for InMemoryBookStore {
    fn get(&self, isbn: &Isbn) -> StoreResult<Option<Book>> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("store lock poisoned"))?;
        Ok(map.get(isbn).cloned())
    }

    fn put(&self, book: Book) -> StoreResult<Book> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("store lock poisoned"))?;
        map.insert(book.isbn().clone(), book.clone());
        Ok(book)
    }

    fn delete(&self, book: &Book) -> StoreResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("store lock poisoned"))?;
        map.remove(book.isbn());
        Ok(())
    }

    fn find_by_title(&self, title: &str, page: PageRequest) -> StoreResult<Page<Book>> {
        self.query(|b| b.title() == title, page)
    }

    fn find_by_author(&self, author: &str, page: PageRequest) -> StoreResult<Page<Book>> {
        self.query(|b| b.author() == author, page)
    }

    fn find_by_genre(&self, genre: Genre, page: PageRequest) -> StoreResult<Page<Book>> {
        self.query(|b| b.genre() == genre, page)
    }

    fn find_by_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        page: PageRequest,
    ) -> StoreResult<Page<Book>> {
        self.query(|b| b.price() >= min_price && b.price() <= max_price, page)
    }
}
