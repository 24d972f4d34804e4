//! Request handlers for the gateway.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

use crate::books::BookClient;
use crate::client::remote::{Params, RemoteServiceClient};
use crate::http::error::ApiError;
use crate::http::response;
use crate::reviews::model::FieldViolation;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub reviews: RemoteServiceClient,
    pub books: BookClient,
}

/// Routes owned by the gateway. Only list and create are proxied; everything
/// else is reviews-service-only.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(identity))
        .route("/reviews", get(index).post(store_review))
        .with_state(state)
}

async fn identity() -> &'static str {
    "gateway-api"
}

/// Forward the list call and re-wrap the normalized payload.
async fn index(State(state): State<GatewayState>) -> Result<Response, ApiError> {
    let payload = state
        .reviews
        .perform_request(Method::GET, "/reviews", &Params::new(), HeaderMap::new())
        .await?;
    Ok(response::ok(payload.into_value()))
}

/// Check the book early when the body names one, then forward the create
/// regardless; the reviews service re-validates on its side.
async fn store_review(
    State(state): State<GatewayState>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let params = match body {
        Value::Object(map) => map,
        _ => {
            return Err(ApiError::Validation(vec![FieldViolation::new(
                "body",
                "request body must be a JSON object",
            )]))
        }
    };

    if let Some(book_id) = params.get("bookId").and_then(Value::as_u64) {
        state.books.ensure_exists(book_id).await?;
    }

    let payload = state
        .reviews
        .perform_request(Method::POST, "/reviews", &params, HeaderMap::new())
        .await?;
    Ok(response::created(payload.into_value()))
}
