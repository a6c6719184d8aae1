use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookstore_core::{DomainError, DomainResult};

use crate::genre::Genre;

/// International Standard Book Number — the identity key of a book record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("ISBN must not be blank"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Isbn {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A book record: identity, descriptive attributes, and stock quantity.
///
/// Construction goes through [`Book::new`], which checks every invariant
/// atomically; no partially valid record is observable.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    genre: Genre,
    price: Decimal,
    quantity: i64,
}

// Two records with the same ISBN are the same entity.
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl core::hash::Hash for Book {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl Book {
    /// Validated construction.
    ///
    /// Invariants are checked in a fixed order (isbn, title, author, genre,
    /// price, quantity); the first violation determines the error. Genre
    /// membership is enforced by the type itself, so its slot in the order
    /// cannot fail here — an invalid genre is rejected where it is parsed.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        price: Decimal,
        quantity: i64,
    ) -> DomainResult<Self> {
        let isbn = Isbn::new(isbn)?;

        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title must not be blank"));
        }

        let author = author.into();
        if author.trim().is_empty() {
            return Err(DomainError::validation("author must not be blank"));
        }

        if price.is_sign_negative() {
            return Err(DomainError::validation("price must not be negative"));
        }

        if quantity < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        Ok(Self {
            isbn,
            title,
            author,
            genre,
            price,
            quantity,
        })
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Adjust the stock quantity by `delta` (positive or negative).
    ///
    /// Fails if the result would be negative or not representable, leaving
    /// the record unchanged.
    pub fn adjust_quantity(&mut self, delta: i64) -> DomainResult<()> {
        let adjusted = self
            .quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::invariant("stock quantity out of range"))?;
        if adjusted < 0 {
            return Err(DomainError::invariant("not enough stock available"));
        }
        self.quantity = adjusted;
        Ok(())
    }

    /// Overwrite the descriptive attributes from a validated patch.
    ///
    /// ISBN and quantity are untouched; quantity is managed only through
    /// stock adjustment.
    pub fn apply_patch(&mut self, patch: BookPatch) {
        self.title = patch.title;
        self.author = patch.author;
        self.genre = patch.genre;
        self.price = patch.price;
    }
}

/// Validated update payload for a book's descriptive attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPatch {
    title: String,
    author: String,
    genre: Genre,
    price: Decimal,
}

impl BookPatch {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        price: Decimal,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title must not be blank"));
        }

        let author = author.into();
        if author.trim().is_empty() {
            return Err(DomainError::validation("author must not be blank"));
        }

        if price.is_sign_negative() {
            return Err(DomainError::validation("price must not be negative"));
        }

        Ok(Self {
            title,
            author,
            genre,
            price,
        })
    }
}
