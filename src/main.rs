use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use tokio::net::TcpListener;

mod api;
mod config;
mod db;
mod services;
mod types;
mod utils;

use crate::api::routes::create_router;
use crate::api::state::AppState;
use crate::config::Config;
use crate::db::memory::AnalysisStore;
use crate::services::analysis::AnalysisService;
use crate::services::coingecko::CoinGeckoClient;
use crate::services::sources::{SimulatedSecurity, SimulatedSocial};
use crate::services::token::TokenAggregator;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    dotenv().ok();
    let config = Config::from_env()?;

    let coingecko = Arc::new(CoinGeckoClient::new(
        &config.coingecko_api_url,
        config.coingecko_api_key.clone(),
        config.coingecko_requests_per_second,
        config.fetch_timeout,
    )?);
    tracing::info!(
        "Using market data from {} ({} req/s)",
        config.coingecko_api_url,
        config.coingecko_requests_per_second
    );

    let aggregator = TokenAggregator::new(
        coingecko.clone(),
        Arc::new(SimulatedSecurity),
        Arc::new(SimulatedSocial),
        coingecko,
        config.fetch_timeout,
    );

    let store = Arc::new(AnalysisStore::new());
    let analysis = Arc::new(AnalysisService::new(store, aggregator, config.cache_ttl));
    let app = create_router(AppState::new(analysis, config.public_url.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("FC Lens listening on {}", addr);
    tracing::info!("Mini app manifest at http://{}/.well-known/farcaster.json", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
