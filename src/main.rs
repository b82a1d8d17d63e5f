//! Newswire - a personalized news feed backend
//!
//! Serves per-user headline feeds assembled from an upstream news API,
//! with TTL caching, embedded persistence, and bearer-token accounts.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newswire::api::create_router;
use newswire::cache::TtlCache;
use newswire::news::NewsApiClient;
use newswire::storage::Database;
use newswire::tasks::spawn_refresh_task;
use newswire::{AppState, Config};

/// Main entry point for the Newswire server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the embedded database and apply the schema
/// 4. Build the upstream news client and the feed cache
/// 5. Start the background feed refresh task
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newswire=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Newswire server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, refresh_interval={}s, database={}",
        config.server_port, config.cache_ttl, config.refresh_interval, config.database_path
    );
    if config.news_api_key.is_empty() {
        warn!("NEWS_API_KEY is not set; upstream fetches will fail until it is");
    }

    // Open the embedded database; the schema is applied on open
    let db = Database::open(&config.database_path)
        .with_context(|| format!("opening database at {}", config.database_path))?;
    info!("Database ready at {}", config.database_path);

    // Build the upstream client and the feed cache
    let provider = Arc::new(NewsApiClient::new(&config).context("building news client")?);
    let cache = TtlCache::new(Duration::from_secs(config.cache_ttl));

    // Create application state shared by handlers and the refresh task
    let state = AppState::new(cache, db, provider, config.clone());

    // Start background feed refresh task
    let refresh_handle = spawn_refresh_task(
        state.cache.clone(),
        state.provider.clone(),
        config.refresh_interval,
        config.default_country.clone(),
    );
    info!("Background refresh task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(refresh_handle))
        .await
        .context("serving")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the refresh task and allows graceful shutdown.
async fn shutdown_signal(refresh_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the refresh task
    refresh_handle.abort();
    warn!("Refresh task aborted");
}
