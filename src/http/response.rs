//! Success envelope helpers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::client::envelope::Envelope;

/// Wrap `payload` as `{"data": ...}` with the given status.
pub fn enveloped<T: Serialize>(status: StatusCode, payload: T) -> Response {
    (status, Json(Envelope::new(payload))).into_response()
}

/// 200 with an enveloped payload.
pub fn ok<T: Serialize>(payload: T) -> Response {
    enveloped(StatusCode::OK, payload)
}

/// 201 with an enveloped payload.
pub fn created<T: Serialize>(payload: T) -> Response {
    enveloped(StatusCode::CREATED, payload)
}
