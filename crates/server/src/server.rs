//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (session auth, logging, compression, etc.)
//! - Prometheus recorder installation
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id, require_session};
use crate::routes::{api_info, not_found};
use crate::routes::{auth, chat, health, items, matching};
use crate::state::ServerState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use lostfound::{AggregateMetrics, set_aggregate_metrics};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Forwards aggregation passes from the core crate to the `metrics` facade.
struct PrometheusAggregateMetrics;

impl AggregateMetrics for PrometheusAggregateMetrics {
    fn record_aggregate(&self, item_count: usize, pairs_scored: usize, latency: Duration) {
        metrics::counter!("lostfound_aggregate_passes_total").increment(1);
        metrics::counter!("lostfound_pairs_scored_total").increment(pairs_scored as u64);
        metrics::gauge!("lostfound_catalog_items").set(item_count as f64);
        metrics::histogram!("lostfound_aggregate_seconds").record(latency.as_secs_f64());
    }
}

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Public routes: /, /health, /ready, /metrics and /api/auth/*
/// - Protected routes: all /api/v1/* endpoints (session required)
///
/// Middleware stack (outermost first):
/// 1. HTTP tracing
/// 2. Request ID tracking
/// 3. Request logging
/// 4. CORS
/// 5. Compression
/// 6. Timeout handling
/// 7. Body size limit
/// 8. Session authentication and rate limiting (protected routes only)
pub fn build_router(state: Arc<ServerState>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .route("/api/auth/signin", post(auth::sign_in_handler))
        .route("/api/auth/signup", post(auth::sign_up_handler))
        .route("/api/auth/google", get(auth::google_handler))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/signout", post(auth::sign_out));

    // Protected routes (require a session)
    let protected_routes = Router::new()
        // Items
        .route("/api/v1/items", get(items::list_items).post(items::submit_item))
        .route("/api/v1/items/{id}", get(items::get_item))
        .route("/api/v1/items/{id}/like", post(items::toggle_like))
        .route("/api/v1/categories", get(items::list_categories))
        // Matching
        .route("/api/v1/compare", post(matching::compare_items))
        // Chat
        .route("/api/v1/chats", get(chat::list_chats))
        .route("/api/v1/chats/{id}", get(chat::get_chat))
        .route("/api/v1/chats/{id}/messages", post(chat::send_message))
        // Metadata
        .route("/api/v1/metadata", get(health::server_metadata))
        // Add session middleware
        .layer(from_fn_with_state(state.clone(), require_session));

    // Combine routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(state.config.max_body_size()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        // `request_id` sits outside `log_requests` so the id is set before logging.
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the lost & found HTTP server
///
/// Blocks until the server is shut down via SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
///
/// # Initialization
///
/// 1. Sets up structured JSON logging with the configured log level
/// 2. Installs the Prometheus recorder when metrics are enabled
/// 3. Creates shared server state (catalog, sessions, chats, rate limiter)
/// 4. Builds the router and binds to the configured TCP address
/// 5. Serves with graceful shutdown support
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let mut state = ServerState::new(config.clone())?;
    if config.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        set_aggregate_metrics(Some(Arc::new(PrometheusAggregateMetrics)));
        state = state.with_metrics_handle(handle);
    }
    let state = Arc::new(state);

    let app = build_router(state.clone());

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting lost & found server on {} with {} items",
        addr,
        state.catalog.len()
    );
    tracing::info!(
        "Timeout: {}s, Max body: {}MB",
        config.timeout_secs,
        config.max_body_size_mb
    );
    tracing::info!(
        "Rate limit: {} requests/minute, high match threshold: {}",
        config.rate_limit_per_minute,
        state.catalog.policy().high_match_threshold
    );
    tracing::info!(
        "CORS: {}, Metrics: {}",
        config.enable_cors,
        config.metrics_enabled
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
