//! `bookstore-catalog` — the book record and its invariants.

pub mod book;
pub mod genre;

pub use book::{Book, BookPatch, Isbn};
pub use genre::Genre;
