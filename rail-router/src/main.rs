use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rail_router::cache::GraphCache;
use rail_router::config::AppConfig;
use rail_router::planner::RoutePlanner;
use rail_router::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let store = config.build_store()?;

    let mut planner = RoutePlanner::new(Arc::new(store));
    if let Some(cache_config) = config.graph_cache() {
        info!(ttl_secs = cache_config.ttl.as_secs(), "Graph cache enabled");
        planner = planner.with_cache(GraphCache::new(&cache_config));
    }

    let state = AppState::new(planner, config.search_limit);
    let shutdown = state.shutdown.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Rail router listening");
    info!("  GET  /health");
    info!("  GET  /api/stations/search?q=");
    info!("  GET  /api/route?from=&to=");
    info!("  POST /api/cache/invalidate");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutting down");
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
