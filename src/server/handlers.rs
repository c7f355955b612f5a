//! HTTP request handlers.

use crate::config::StatusMode;
use crate::error::{ApiError, MessageBody, Result};
use crate::library::{Book, Reviews};
use crate::server::AppState;
use axum::{
    Json,
    body::Body,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::Response,
};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Build a response, returning 500 on error (which shouldn't happen).
fn build_response(status: StatusCode, content_type: &str, body: impl Into<Body>) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("Internal error"))
                .unwrap_or_default()
        })
}

/// Serialize with a four-space indent.
///
/// The legacy API sent these bodies as pre-rendered HTML strings, so that
/// mode keeps its content type.
fn pretty_json<T: Serialize + ?Sized>(value: &T, mode: StatusMode) -> Result<Response<Body>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    let content_type = match mode {
        StatusMode::Legacy => "text/html; charset=utf-8",
        StatusMode::Distinct => "application/json",
    };
    Ok(build_response(StatusCode::OK, content_type, buf))
}

// ============================================================================
// CATALOG
// ============================================================================

/// Whole catalog.
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Response<Body>> {
    pretty_json(state.catalog.list_all(), state.mode()).map_err(|e| state.reject(e))
}

/// Book by ISBN.
pub async fn book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<Book>> {
    tracing::debug!(isbn = %isbn, "Lookup by ISBN");
    let book = state.catalog.get_by_isbn(&isbn).map_err(|e| state.reject(e))?;
    Ok(Json(book.clone()))
}

/// Book by ISBN, pretty-printed.
pub async fn book_by_isbn_pretty(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Response<Body>> {
    tracing::debug!(isbn = %isbn, "Lookup by ISBN");
    state
        .catalog
        .get_by_isbn(&isbn)
        .and_then(|book| pretty_json(book, state.mode()))
        .map_err(|e| state.reject(e))
}

/// Books by author.
pub async fn books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> ApiResult<Response<Body>> {
    tracing::debug!(author = %author, "Search by author");
    state
        .catalog
        .get_by_author(&author)
        .and_then(|books| pretty_json(&books, state.mode()))
        .map_err(|e| state.reject(e))
}

/// Books by title.
pub async fn books_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Response<Body>> {
    tracing::debug!(title = %title, "Search by title");
    state
        .catalog
        .get_by_title(&title)
        .and_then(|books| pretty_json(&books, state.mode()))
        .map_err(|e| state.reject(e))
}

/// Reviews of a book.
pub async fn book_reviews(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<Reviews>> {
    tracing::debug!(isbn = %isbn, "Lookup reviews");
    let reviews = state.catalog.get_reviews(&isbn).map_err(|e| state.reject(e))?;
    Ok(Json(reviews.clone()))
}

// ============================================================================
// REGISTRATION
// ============================================================================

/// Register request. Absent fields are rejected by the registry.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Register a user.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageBody>)> {
    // An unreadable body counts as missing credentials.
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable registration body");
            RegisterRequest::default()
        }
    };

    let message = state
        .users
        .register(req.username.as_deref(), req.password.as_deref())
        .map_err(|e| state.reject(e))?;

    let status = match state.mode() {
        StatusMode::Legacy => StatusCode::OK,
        StatusMode::Distinct => StatusCode::CREATED,
    };

    Ok((status, Json(MessageBody::new(message))))
}
