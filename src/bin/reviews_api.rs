//! Reviews service: owns review records, validates books upstream.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use book_reviews::books::BookClient;
use book_reviews::client::remote::RemoteServiceClient;
use book_reviews::config::load_config;
use book_reviews::http::HttpServer;
use book_reviews::lifecycle::Shutdown;
use book_reviews::observability::{logging, metrics};
use book_reviews::reviews::{self, ReviewsState, ReviewStore};

#[derive(Parser)]
#[command(name = "reviews-api")]
#[command(about = "Review CRUD service for the book review system", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "reviews.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_tracing(&format!(
        "book_reviews={},tower_http=info",
        config.observability.log_level
    ));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        books_backend = %config.services.books.base_url,
        "reviews-api starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "listening for connections");

    let state = ReviewsState {
        store: Arc::new(ReviewStore::new()),
        books: BookClient::new(RemoteServiceClient::new(
            "books",
            config.services.books.clone(),
            Some(local_addr),
        )),
    };

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(reviews::router(state), &config.timeouts);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
