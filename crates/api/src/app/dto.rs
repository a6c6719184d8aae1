use rust_decimal::Decimal;
use serde::Deserialize;

use bookstore_catalog::Book;
use bookstore_core::Page;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// Genre wire name; parsed case-insensitively against the enumeration.
    pub genre: String,
    pub price: Decimal,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct RemoveBookQuery {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    pub genre: String,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    pub author: String,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    #[serde(rename = "minPrice")]
    pub min_price: Decimal,
    #[serde(rename = "maxPrice")]
    pub max_price: Decimal,
    pub page: u32,
    pub size: u32,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn book_to_json(book: &Book) -> serde_json::Value {
    serde_json::json!({
        "isbn": book.isbn().as_str(),
        "title": book.title(),
        "author": book.author(),
        "genre": book.genre().as_str(),
        "price": book.price(),
        "quantity": book.quantity(),
    })
}

pub fn page_to_json(page: Page<Book>) -> serde_json::Value {
    serde_json::json!({
        "items": page.items.iter().map(book_to_json).collect::<Vec<_>>(),
        "totalElements": page.total_elements,
    })
}
