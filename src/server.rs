use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, estimate::AppState},
    metrics,
    signals::setup_signal_handlers,
};

/// Start the rent forecast server
///
/// This function:
/// 1. Initializes metrics (when enabled)
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState::with_config(config_swap);
    let app = create_router(app_state, metrics_handle, &config.metrics.endpoint);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting rent forecast service on {}", addr);
    info!(
        "Configuration: source={}, max horizon {} years, fallback mode {:?}",
        config.estimation.source, config.estimation.max_horizon_years, config.fallback.mode
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    app_state: AppState,
    metrics_handle: Option<Arc<PrometheusHandle>>,
    metrics_endpoint: &str,
) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/v1/estimate", post(handlers::estimate::handle_estimate))
        .route(
            "/v1/comparisons/:session",
            get(handlers::comparisons::list_comparisons)
                .post(handlers::comparisons::add_comparison)
                .delete(handlers::comparisons::clear_comparisons),
        )
        .route(
            "/v1/comparisons/:session/:location",
            delete(handlers::comparisons::remove_comparison),
        )
        .with_state(app_state);

    let router = match metrics_handle {
        Some(handle) => Router::new()
            .route(metrics_endpoint, get(handlers::metrics_handler::metrics))
            .with_state(handle)
            .merge(api_routes),
        None => api_routes,
    };

    router
        // Queries are tiny; cap bodies well below axum's default
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_router() {
        let state = AppState::new(Config::default());
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = Arc::new(recorder.handle());

        let _app = create_router(state.clone(), Some(handle), "/metrics");
        let _app = create_router(state, None, "/metrics");
        // Router created successfully - no panic
    }
}
