use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::middleware::{self, AuthState};

pub mod books;
pub mod system;

/// Build the route table.
///
/// Reads are open; mutating methods carry the bearer-auth layer. The layer
/// is applied per method router so that `/books/:isbn` can expose a public
/// GET next to its protected DELETE and PATCH.
pub fn router(auth_state: AuthState) -> Router {
    let auth = axum::middleware::from_fn_with_state(auth_state, middleware::auth_middleware);

    Router::new()
        .route("/health", get(system::health))
        .route("/books/genre", get(books::books_by_genre))
        .route("/books/author", get(books::books_by_author))
        .route("/books/title", get(books::books_by_title))
        .route("/books/price", get(books::books_by_price))
        .route("/books", post(books::add_book).route_layer(auth.clone()))
        .route(
            "/books/:isbn",
            // `route_layer` only wraps the methods registered before it,
            // so the GET added after it stays public.
            delete(books::remove_book)
                .patch(books::update_book)
                .route_layer(auth)
                .get(books::book_by_isbn),
        )
}
