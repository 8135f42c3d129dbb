//! HTTP routes over the catalog store.
//!
//! | Route | Success | Missing |
//! |---|---|---|
//! | `GET /books` | 200 array | |
//! | `GET /books/search/{keyword}` | 200 array | |
//! | `GET /books/genre/{genre}` | 200 array | |
//! | `GET /books/{id}` | 200 object | 404 |
//! | `PUT /books` | 201 object | |
//! | `DELETE /books/{id}` | 200 | 404 |

use crate::error::ApiError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bookshelf_core::{Book, BookId, BookRepository, CatalogStore, NewBook, RepoResult};

/// Builds the `/books` router with `store` as shared state.
pub fn router(store: CatalogStore) -> Router {
    Router::new()
        .route("/books", get(list_books).put(insert_book))
        .route("/books/search/{keyword}", get(search_books))
        .route("/books/genre/{genre}", get(list_books_by_genre))
        .route("/books/{id}", get(get_book).delete(delete_book))
        .with_state(store)
}

// rusqlite is synchronous; keep it off the async workers.
async fn run_store<T, F>(store: CatalogStore, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CatalogStore) -> RepoResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::from)
}

async fn list_books(State(store): State<CatalogStore>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = run_store(store, |store| store.list_books()).await?;
    Ok(Json(books))
}

async fn search_books(
    State(store): State<CatalogStore>,
    Path(keyword): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = run_store(store, move |store| store.search_books(&keyword)).await?;
    Ok(Json(books))
}

async fn list_books_by_genre(
    State(store): State<CatalogStore>,
    Path(genre): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = run_store(store, move |store| store.list_books_by_genre(&genre)).await?;
    Ok(Json(books))
}

async fn get_book(
    State(store): State<CatalogStore>,
    Path(id): Path<BookId>,
) -> Result<Response, ApiError> {
    let response = match run_store(store, move |store| store.get_book(id)).await? {
        Some(book) => Json(book).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    };
    Ok(response)
}

async fn insert_book(
    State(store): State<CatalogStore>,
    Json(payload): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = run_store(store, move |store| store.insert_book(&payload)).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn delete_book(
    State(store): State<CatalogStore>,
    Path(id): Path<BookId>,
) -> Result<StatusCode, ApiError> {
    if run_store(store, move |store| store.delete_book(id)).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
