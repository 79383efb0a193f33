//! HTTP handlers for the books module.
//!
//! Each handler delegates to the data access layer and maps the result to
//! a status code: 200 for reads, 201 + Location for creates, 204 for
//! updates and deletes, 404 when an identifier lookup misses.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use bookstore_http::error::AppError;

use super::models::{BookContentResponse, BookPayload, BookResponse, SplitBookPayload};
use super::store::BookStore;

/// Build the books module router.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", post(create_book))
        .route("/Book", get(list_books))
        .route("/BookContent", get(list_book_contents))
        .route("/BuildingBookStore", get(building_book_store))
        .route("/GetBookByBookName/{book_name}", get(get_books_by_name))
        .route("/GetBookByAuthor/{author}", get(get_books_by_author))
        .route(
            "/GetBookContentByBookId/{book_id}",
            get(get_contents_by_book_id),
        )
        .route("/AddBook", post(create_book_split))
        .route("/DeleteAllBook", delete(delete_all_books))
        .route("/DeleteAllBookContent", delete(delete_all_book_contents))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(store)
}

/// Path identifiers carry a 24-character hex constraint; anything that
/// does not parse as an ObjectId behaves like an unmatched route.
fn parse_path_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::not_found("identifier must be a 24-character hex string"))
}

async fn list_books(
    State(store): State<Arc<BookStore>>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let books = store.list_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

async fn list_book_contents(
    State(store): State<Arc<BookStore>>,
) -> Result<Json<Vec<BookContentResponse>>, AppError> {
    let contents = store.list_contents().await?;
    Ok(Json(
        contents.into_iter().map(BookContentResponse::from).collect(),
    ))
}

async fn building_book_store(
    State(store): State<Arc<BookStore>>,
) -> Result<StatusCode, AppError> {
    store.seed_catalog().await?;
    Ok(StatusCode::OK)
}

async fn get_books_by_name(
    State(store): State<Arc<BookStore>>,
    Path(book_name): Path<String>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let books = store.books_by_name(&book_name).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

async fn get_books_by_author(
    State(store): State<Arc<BookStore>>,
    Path(author): Path<String>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let books = store.books_by_author(&author).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

async fn get_contents_by_book_id(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<BookContentResponse>>, AppError> {
    let book_id = parse_path_id(&book_id)?;
    let contents = store.contents_by_book_id(book_id).await?;
    Ok(Json(
        contents.into_iter().map(BookContentResponse::from).collect(),
    ))
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let id = parse_path_id(&id)?;
    let book = store
        .book_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("book not found"))?;
    Ok(Json(book.into()))
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    Json(payload): Json<BookPayload>,
) -> Result<impl IntoResponse, AppError> {
    let book = payload
        .into_book()
        .map_err(|_| AppError::bad_request("identifier must be a 24-character hex string"))?;

    let created = store.insert_book(&book).await?;

    // The driver reports the effective identifier whether the payload
    // carried one or the storage layer generated it.
    let mut stored = book;
    stored.id = stored.id.or(created.inserted_id.as_object_id());
    let id = stored.id.map(|id| id.to_hex()).unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/books/{id}"))],
        Json(BookResponse::from(stored)),
    ))
}

async fn create_book_split(
    State(store): State<Arc<BookStore>>,
    Json(payload): Json<SplitBookPayload>,
) -> Result<impl IntoResponse, AppError> {
    let book = store.insert_book_with_content(payload).await?;
    let id = book.id.map(|id| id.to_hex()).unwrap_or_default();

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/books/{id}"))],
        Json(BookResponse::from(book)),
    ))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
    Json(payload): Json<BookPayload>,
) -> Result<StatusCode, AppError> {
    let id = parse_path_id(&id)?;
    if store.book_by_id(id).await?.is_none() {
        return Err(AppError::not_found("book not found"));
    }

    let mut book = payload
        .into_book()
        .map_err(|_| AppError::bad_request("identifier must be a 24-character hex string"))?;
    // The replacement keeps the identifier from the path, whatever the
    // body says.
    book.id = Some(id);
    store.replace_book(id, &book).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_path_id(&id)?;
    if store.book_by_id(id).await?.is_none() {
        return Err(AppError::not_found("book not found"));
    }

    store.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_all_books(
    State(store): State<Arc<BookStore>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = store.delete_all_books().await?;
    Ok(Json(json!({
        "DeletedCount": result.deleted_count,
        "IsAcknowledged": true,
    })))
}

async fn delete_all_book_contents(
    State(store): State<Arc<BookStore>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = store.delete_all_contents().await?;
    Ok(Json(json!({
        "DeletedCount": result.deleted_count,
        "IsAcknowledged": true,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ids_must_be_24_hex_characters() {
        assert!(parse_path_id("65f0a1b2c3d4e5f60718293a").is_ok());
        assert!(parse_path_id("Book").is_err());
        assert!(parse_path_id("65f0a1b2c3d4e5f60718293").is_err());
        assert!(parse_path_id("zzf0a1b2c3d4e5f60718293a").is_err());
    }
}
