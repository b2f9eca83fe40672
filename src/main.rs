// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Trail Journal API Server

use anyhow::Context;
use std::sync::Arc;
use std::time::{Duration, Instant};
use trail_journal::{
    config::Config,
    db::FirestoreDb,
    middleware::RateLimiter,
    services::{
        FixedWeather, MediaService, OpenMeteoWeather, StaticTrailCatalog, WeatherProvider,
    },
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Trail Journal API");

    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .context("Failed to connect to Firestore")?;

    tracing::info!(path = %config.trails_path, "Loading trail catalog");
    let trails = StaticTrailCatalog::load_from_file(&config.trails_path)
        .context("Failed to load trail catalog")?;

    let weather: Arc<dyn WeatherProvider> = if config.weather_api_url.is_empty() {
        tracing::warn!("WEATHER_API_URL is empty, serving fixed weather");
        Arc::new(FixedWeather::default())
    } else {
        Arc::new(OpenMeteoWeather::new(&config.weather_api_url))
    };

    let media = MediaService::new(config.media.clone());
    if !media.is_configured() {
        tracing::warn!("Media CDN credentials not set, photo uploads are disabled");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        media,
        trails: Arc::new(trails),
        weather,
        rate_limiter: RateLimiter::new(config.rate_limit_per_minute),
    });

    // Expired rate-limit windows would otherwise accumulate one per user
    let prune_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            prune_state.rate_limiter.prune(Instant::now());
        }
    });

    let app = trail_journal::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trail_journal=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
