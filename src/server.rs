//! HTTP server and routes.

mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Same lookups as the root routes; kept for clients of the old API.
    let async_routes = Router::new()
        .route("/", get(handlers::list_books))
        .route("/isbn/{isbn}", get(handlers::book_by_isbn_pretty))
        .route("/author/{author}", get(handlers::books_by_author))
        .route("/title/{title}", get(handlers::books_by_title));

    Router::new()
        .route("/", get(handlers::list_books))
        .route("/isbn/{isbn}", get(handlers::book_by_isbn))
        .route("/author/{author}", get(handlers::books_by_author))
        .route("/title/{title}", get(handlers::books_by_title))
        .route("/review/{isbn}", get(handlers::book_reviews))
        .route("/register", post(handlers::register))
        .nest("/async", async_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
