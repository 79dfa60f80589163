//! HTTP handlers for the books module.

use anyhow::Error as AnyError;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use folio_http::error::AppError;

use super::models::CreateBookRequest;
use super::models::NewBook;
use super::representer::{self, BookRepresentation};
use super::UPDATE_SKU_JOB;
use crate::modules::users::User;
use crate::state::AppState;

/// Hard cap on page size; larger requests are clamped, never rejected.
pub const MAX_PAGINATION_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// `GET /` — public paginated listing in insertion order.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BookRepresentation>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(MAX_PAGINATION_LIMIT)
        .min(MAX_PAGINATION_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let rows = state.catalog.list_books(limit, offset).await;

    Ok(Json(representer::collection(&rows)))
}

/// `POST /` — authenticated create with nested author creation.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookRepresentation>), AppError> {
    authenticate(&headers, &state).await?;

    // Author constraint violations are fatal, not a validation response.
    let author = state
        .catalog
        .create_author(request.author)
        .await
        .map_err(AnyError::new)?;

    let details = request.book.validate();
    if !details.is_empty() {
        return Err(AppError::validation(details, "book is invalid"));
    }

    let book = state
        .catalog
        .create_book(NewBook {
            title: request.book.title,
            author_id: author.id,
        })
        .await
        .map_err(AnyError::new)?;

    // Fire and forget; a full queue must not fail the request.
    if let Err(error) = state
        .jobs
        .submit(UPDATE_SKU_JOB, json!({"title": book.title}))
    {
        tracing::warn!(%error, book_id = book.id, "sku refresh not enqueued");
    }

    Ok((StatusCode::CREATED, Json(representer::book(&book, &author))))
}

/// `DELETE /{id}` — authenticated delete, 404 when absent.
pub async fn destroy(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    authenticate(&headers, &state).await?;

    state
        .catalog
        .delete_book(id)
        .await
        .map_err(|_| AppError::not_found(format!("book {id} does not exist")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the request's credentials to a known user.
///
/// Missing header, unverifiable token, and unknown user all produce the same
/// 401 so callers cannot probe which check failed.
async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<User, AppError> {
    let denied = || AppError::unauthorized("invalid credentials");

    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(denied)?;

    let token = folio_auth::credentials(header_value).ok_or_else(denied)?;
    let user_id = state.tokens.decode(token).map_err(|_| denied())?;

    state.users.find(user_id).await.ok_or_else(denied)
}
