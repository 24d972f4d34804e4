//! Error translation at the request-handler boundary.
//!
//! Every failure becomes the standard error envelope
//! `{"error": <message>, "code": <status>}` here and nowhere else. Nothing is
//! swallowed, nothing is retried; a downstream 4xx keeps its status on the
//! way out because a missing book IS this request's 404.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::client::remote::ClientError;
use crate::reviews::model::FieldViolation;
use crate::reviews::store::StoreError;

/// A request that could not be served, ready to become an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// Local input rules were violated.
    Validation(Vec<FieldViolation>),
    /// The requested record does not exist.
    NotFound(String),
    /// An update that changes nothing.
    NoChange,
    /// A downstream call failed.
    Upstream(ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NoChange => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(error) => upstream_status(error),
        }
    }

    fn message(&self) -> Value {
        match self {
            ApiError::Validation(violations) => json!(violations),
            ApiError::NotFound(what) => Value::String(what.clone()),
            ApiError::NoChange => Value::String("at least one value must change".into()),
            ApiError::Upstream(error) => Value::String(upstream_message(error)),
        }
    }
}

fn upstream_status(error: &ClientError) -> StatusCode {
    match error {
        ClientError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        ClientError::Connection { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ClientError::RemoteClient { status, .. } => *status,
        ClientError::RemoteServer { .. } => StatusCode::BAD_GATEWAY,
    }
}

/// Prefer the downstream error message when its body carries one, so the
/// user sees "book does not exist" rather than a status line.
fn upstream_message(error: &ClientError) -> String {
    if let ClientError::RemoteClient { body, .. } | ClientError::RemoteServer { body, .. } = error
    {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
            if let Some(Value::String(message)) = map.get("error") {
                return message.clone();
            }
        }
    }
    error.to_string()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            // The expected cross-service rejection path, not an anomaly.
            ApiError::Upstream(ClientError::RemoteClient { .. }) => {
                tracing::debug!(status = %status, "request rejected by downstream service");
            }
            ApiError::Upstream(error) => {
                tracing::warn!(status = %status, error = %error, "downstream call failed");
            }
            _ => {
                tracing::debug!(status = %status, "request rejected");
            }
        }

        let body = json!({ "error": self.message(), "code": status.as_u16() });
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => ApiError::NotFound(format!("review {id} does not exist")),
            StoreError::NoChange => ApiError::NoChange,
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(error: ClientError) -> Self {
        ApiError::Upstream(error)
    }
}
