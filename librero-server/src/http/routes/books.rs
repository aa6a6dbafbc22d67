//! Book endpoints
//!
//! | Method | Path          | Action       |
//! |--------|---------------|--------------|
//! | GET    | `/books`      | list-all     |
//! | GET    | `/books/{id}` | find-by-id   |
//! | POST   | `/books`      | insert       |
//! | PUT    | `/books/{id}` | update-by-id |
//! | DELETE | `/books/{id}` | delete-by-id |
//!
//! `/books/` (empty id) is routed too: GET and PUT treat it as an unknown id,
//! DELETE rejects it as an invalid id.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{BookIdParam, JsonBody};
use crate::http::server::AppState;
use crate::models::{Book, BookId, BookInput, ValidationError};

/// Delete confirmation
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /books - list all books
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.store().list_all().await?;
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<AppState>,
    BookIdParam(id): BookIdParam,
) -> Result<Json<Book>, ApiError> {
    find_book(&state, id).await
}

/// GET /books/
async fn get_book_without_id(State(state): State<AppState>) -> Result<Json<Book>, ApiError> {
    find_book(&state, None).await
}

async fn find_book(state: &AppState, id: Option<BookId>) -> Result<Json<Book>, ApiError> {
    let id = id.ok_or(ApiError::BookNotFound)?;
    let book = state
        .store()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::BookNotFound)?;
    Ok(Json(book))
}

/// POST /books - create a new book
async fn create_book(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BookInput>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let new_book = input.into_new_book()?;
    let book = state.store().insert(new_book).await?;

    tracing::info!(id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /books/{id} - partially update a book
async fn update_book(
    State(state): State<AppState>,
    BookIdParam(id): BookIdParam,
    JsonBody(input): JsonBody<BookInput>,
) -> Result<Json<Book>, ApiError> {
    apply_update(&state, id, input).await
}

/// PUT /books/
async fn update_book_without_id(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BookInput>,
) -> Result<Json<Book>, ApiError> {
    apply_update(&state, None, input).await
}

async fn apply_update(
    state: &AppState,
    id: Option<BookId>,
    input: BookInput,
) -> Result<Json<Book>, ApiError> {
    // body is checked before the id so an empty patch is a 400 either way
    let patch = input.into_patch()?;
    let id = id.ok_or(ApiError::BookNotFound)?;

    let book = state
        .store()
        .update_by_id(id, patch)
        .await?
        .ok_or(ApiError::BookNotFound)?;

    tracing::info!(id = %book.id, "book updated");
    Ok(Json(book))
}

/// DELETE /books/{id} - delete a book
async fn delete_book(
    State(state): State<AppState>,
    BookIdParam(id): BookIdParam,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = id.ok_or(ApiError::BookNotFound)?;
    if !state.store().delete_by_id(id).await? {
        return Err(ApiError::BookNotFound);
    }

    tracing::info!(%id, "book deleted");
    Ok(Json(DeleteResponse {
        message: "Libro eliminado correctamente",
    }))
}

/// DELETE /books/
async fn delete_book_without_id() -> ApiError {
    ApiError::Validation(ValidationError::InvalidId)
}

/// Book routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/",
            get(get_book_without_id)
                .put(update_book_without_id)
                .delete(delete_book_without_id),
        )
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}
