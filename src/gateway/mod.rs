//! Gateway deployment variant.
//!
//! Owns no data. List calls are forwarded to the reviews backend and the
//! normalized payload re-wrapped; create calls get an early book-existence
//! check before forwarding. The reviews service re-validates on its side, so
//! either end may reject first.

mod handlers;

pub use handlers::{router, GatewayState};
