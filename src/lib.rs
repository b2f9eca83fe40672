// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Trail Journal: a personal hiking journal backend.
//!
//! Users record hikes as journal entries, review aggregated statistics, and
//! expose completed entries as "activities" to external integrations.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use middleware::RateLimiter;
use services::{MediaService, TrailCatalog, WeatherProvider};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub media: MediaService,
    pub trails: Arc<dyn TrailCatalog>,
    pub weather: Arc<dyn WeatherProvider>,
    pub rate_limiter: RateLimiter,
}
