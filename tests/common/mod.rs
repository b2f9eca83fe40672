// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

use std::sync::Arc;
use trail_journal::config::Config;
use trail_journal::db::FirestoreDb;
use trail_journal::middleware::auth::{create_api_token, create_session_jwt};
use trail_journal::middleware::RateLimiter;
use trail_journal::routes::create_router;
use trail_journal::services::{FixedWeather, MediaService, StaticTrailCatalog};
use trail_journal::AppState;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build application state around `config` and `db` with offline fakes.
#[allow(dead_code)]
pub fn test_state(config: Config, db: FirestoreDb) -> Arc<AppState> {
    let trails = StaticTrailCatalog::load_from_file("data/trails.json")
        .expect("Bundled trail catalog should load");

    Arc::new(AppState {
        rate_limiter: RateLimiter::new(config.rate_limit_per_minute),
        media: MediaService::new(None),
        trails: Arc::new(trails),
        weather: Arc::new(FixedWeather::default()),
        config,
        db,
    })
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = test_state(config, FirestoreDb::new_mock());
    (create_router(state.clone()), state)
}

/// Session token as issued by the auth provider.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_session_jwt(user_id, signing_key).unwrap()
}

/// Read-only API token.
#[allow(dead_code)]
pub fn create_test_api_token(user_id: &str, signing_key: &[u8]) -> String {
    create_api_token(user_id, signing_key).unwrap().token
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
