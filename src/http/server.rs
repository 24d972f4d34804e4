//! HTTP server setup shared by both services.
//!
//! # Responsibilities
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind a service router to its listener
//! - Serve with graceful shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::TimeoutConfig;
use crate::http::request::{RequestUuid, X_REQUEST_ID};
use crate::observability::metrics;

/// HTTP server hosting one service's router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Wrap a service router with the shared middleware stack.
    ///
    /// Outermost first: the request id must exist before the trace span
    /// opens, and the timeout bounds everything inside it.
    pub fn new(router: Router, timeouts: &TimeoutConfig) -> Self {
        let router = router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, RequestUuid))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
                .layer(axum::middleware::from_fn(metrics::track_request)),
        );
        Self { router }
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
