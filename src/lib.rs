//! Book review microservices.
//!
//! One library, two deployments:
//!
//! ```text
//!                    ┌───────────────────────────┐
//!     Client ───────▶│        gateway-api        │
//!                    │  (proxies, owns no data)  │
//!                    └──────┬─────────────┬──────┘
//!                           │             │ /reviews*
//!           GET /books/{id} │             ▼
//!                           │      ┌──────────────┐
//!                           ▼      │  reviews-api  │
//!                    books service │ (owns records)│
//!                    (external) ◀──┴──────────────┘
//!                            GET /books/{id}
//! ```
//!
//! The interesting part is the outbound leg: `client` builds requests against
//! a configured base address, attaches the shared secret, normalizes the
//! `{"data": ...}` envelope, and translates transport failures into the
//! domain error taxonomy. Everything else is a thin orchestration of that.

pub mod books;
pub mod client;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reviews;

pub use config::{load_config, ServiceConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
