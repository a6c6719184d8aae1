use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use bookstore_auth::Permission;
use bookstore_catalog::{Book, BookPatch, Genre};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

fn books_write() -> Permission {
    Permission::new("books.write")
}

/// POST /books — create a book, or merge quantity into an existing record.
pub async fn add_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateBookRequest>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::require_permission(&principal, &books_write()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let genre: Genre = match body.genre.parse() {
        Ok(g) => g,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let candidate = match Book::new(
        body.isbn,
        body.title,
        body.author,
        genre,
        body.price,
        body.quantity,
    ) {
        Ok(b) => b,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory().add_book(candidate) {
        Ok(book) => (StatusCode::CREATED, Json(dto::book_to_json(&book))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// DELETE /books/:isbn?quantity=N — remove stock; 204 when fully removed.
pub async fn remove_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(isbn): Path<String>,
    Query(query): Query<dto::RemoveBookQuery>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::require_permission(&principal, &books_write()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    match services.inventory().remove_book(&isbn, query.quantity) {
        Ok(Some(remaining)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "remainingQuantity": remaining.quantity() })),
        )
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// PATCH /books/:isbn — overwrite descriptive fields; quantity untouched.
pub async fn update_book(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(isbn): Path<String>,
    Json(body): Json<dto::UpdateBookRequest>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::require_permission(&principal, &books_write()) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let genre: Genre = match body.genre.parse() {
        Ok(g) => g,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let patch = match BookPatch::new(body.title, body.author, genre, body.price) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory().update_book(&isbn, patch) {
        Ok(book) => (StatusCode::OK, Json(dto::book_to_json(&book))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /books/:isbn
pub async fn book_by_isbn(
    Extension(services): Extension<Arc<AppServices>>,
    Path(isbn): Path<String>,
) -> axum::response::Response {
    match services.inventory().book_by_isbn(&isbn) {
        Ok(book) => (StatusCode::OK, Json(dto::book_to_json(&book))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /books/genre?genre=&page=&size=
pub async fn books_by_genre(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::GenreQuery>,
) -> axum::response::Response {
    match services
        .inventory()
        .books_by_attribute("genre", &query.genre, query.page, query.size)
    {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_json(page))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /books/author?author=&page=&size=
pub async fn books_by_author(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::AuthorQuery>,
) -> axum::response::Response {
    match services
        .inventory()
        .books_by_attribute("author", &query.author, query.page, query.size)
    {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_json(page))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /books/title?title=&page=&size=
pub async fn books_by_title(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::TitleQuery>,
) -> axum::response::Response {
    match services
        .inventory()
        .books_by_attribute("title", &query.title, query.page, query.size)
    {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_json(page))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// GET /books/price?minPrice=&maxPrice=&page=&size= (inclusive bounds)
pub async fn books_by_price(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::PriceQuery>,
) -> axum::response::Response {
    match services.inventory().books_by_price(
        query.min_price,
        query.max_price,
        query.page,
        query.size,
    ) {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_json(page))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
