//! Request handlers for the reviews service.
//!
//! Orchestration per request: field validation → book existence check →
//! store mutation → enveloped response. The book check is authoritative
//! here; the gateway's earlier check is only a fast path.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};

use crate::books::BookClient;
use crate::http::error::ApiError;
use crate::http::response;
use crate::reviews::model::{CreateReview, UpdateReview};
use crate::reviews::store::ReviewStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct ReviewsState {
    pub store: Arc<ReviewStore>,
    pub books: BookClient,
}

/// Routes owned by the reviews service.
pub fn router(state: ReviewsState) -> Router {
    Router::new()
        .route("/", get(identity))
        .route("/reviews", get(index).post(store_review))
        .route(
            "/reviews/{id}",
            get(show).put(update).patch(update).delete(destroy),
        )
        .with_state(state)
}

async fn identity() -> &'static str {
    "reviews-api"
}

async fn index(State(state): State<ReviewsState>) -> Response {
    response::ok(state.store.list())
}

async fn store_review(
    State(state): State<ReviewsState>,
    Json(body): Json<CreateReview>,
) -> Result<Response, ApiError> {
    let draft = body.validate().map_err(ApiError::Validation)?;

    // The referenced book must exist upstream; a rejection here is the
    // user's answer, propagated with the remote status.
    state.books.ensure_exists(draft.book_id).await?;

    let review = state.store.create(draft);
    tracing::info!(id = review.id, book_id = review.book_id, "review created");
    Ok(response::created(review))
}

async fn show(
    State(state): State<ReviewsState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    Ok(response::ok(state.store.find(id)?))
}

async fn update(
    State(state): State<ReviewsState>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateReview>,
) -> Result<Response, ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    // Surface a missing record before spending a network call.
    state.store.find(id)?;

    if let Some(book_id) = body.book_id() {
        state.books.ensure_exists(book_id).await?;
    }

    let review = state.store.update(id, &body)?;
    tracing::info!(id = review.id, "review updated");
    Ok(response::ok(review))
}

async fn destroy(
    State(state): State<ReviewsState>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let review = state.store.delete(id)?;
    tracing::info!(id = review.id, "review deleted");
    Ok(response::ok(review))
}
