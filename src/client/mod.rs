//! Outbound HTTP integration.
//!
//! # Data Flow
//! ```text
//! handler
//!     → remote.rs (base-address guards, secret header,
//!                  method-dependent parameter placement)
//!     → downstream service over HTTP
//!     → envelope.rs (decode body, unwrap single-key data envelope)
//!     → Payload back to the handler
//! ```
//!
//! # Design Decisions
//! - One client value per downstream endpoint, configured not subclassed
//! - GET/DELETE parameters in the query string; JSON bodies everywhere else
//! - Expected rejections (4xx) are a distinct error from server failures
//! - No retries: the caller's request fails when the downstream call fails

pub mod envelope;
pub mod remote;

pub use envelope::{Envelope, Payload};
pub use remote::{ClientError, Params, RemoteServiceClient};
