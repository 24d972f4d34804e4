//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, request-id correlated)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - RUST_LOG wins over the configured log level
//! - Metric updates are cheap; the exporter is opt-in per config
//! - A cross-service rejection (4xx) is an outcome label, not an error log

pub mod logging;
pub mod metrics;
