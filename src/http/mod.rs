//! HTTP surface shared by both services.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (middleware: request id, trace, timeout, metrics)
//!     → service router (gateway or reviews handlers)
//!     → response.rs (success envelope) / error.rs (error envelope)
//! ```
//!
//! # Design Decisions
//! - One middleware stack for both deployments
//! - Every response body is JSON: `{"data": ...}` or `{"error": ..., "code": ...}`
//! - Error translation happens in exactly one place (`ApiError`)

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
