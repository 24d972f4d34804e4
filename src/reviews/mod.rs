//! Reviews deployment variant: owns review records.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → handlers.rs (field validation → book existence check → mutation)
//!     → model.rs (entity, boundary structs, rules)
//!     → store.rs (in-process records)
//!     → enveloped response
//! ```
//!
//! # Design Decisions
//! - Field validation happens before the network call; the book check is the
//!   last gate before any mutation
//! - At most one outbound call per inbound request, no compensation needed

pub mod handlers;
pub mod model;
pub mod store;

pub use handlers::{router, ReviewsState};
pub use model::Review;
pub use store::ReviewStore;
