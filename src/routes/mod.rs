// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! HTTP route handlers.

pub mod account;
pub mod activities;
pub mod entries;
pub mod lookup;
pub mod upload;

use crate::middleware::{rate_limit, require_auth};
use crate::AppState;
use axum::http::{header, Method, StatusCode};
use axum::extract::State;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Liveness probe.
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub database: String,
    pub api: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub services: ServiceStatus,
}

/// Readiness probe: 503 until the database answers.
async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database_ok = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            false
        }
    };

    let (code, status, database) = if database_ok {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };

    (
        code,
        Json(ReadinessResponse {
            status: status.to_string(),
            timestamp: crate::time_utils::format_utc_rfc3339(chrono::Utc::now()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceStatus {
                database: database.to_string(),
                api: "running".to_string(),
            },
        }),
    )
}

/// Validate `page`/`limit` query parameters; page is 1-based.
pub fn page_bounds(
    page: Option<u32>,
    limit: Option<u32>,
    default_limit: u32,
) -> crate::error::Result<(u32, u32)> {
    let page = page.unwrap_or(1);
    let limit = limit.unwrap_or(default_limit);

    if page < 1 {
        return Err(crate::error::AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(crate::error::AppError::BadRequest(format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok((page, limit))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub pages: u32,
}

/// Slice one page out of an already-filtered list.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> (Vec<T>, Pagination) {
    let total = items.len() as u32;
    let pages = total.div_ceil(limit);
    let start = (page as usize - 1).saturating_mul(limit as usize);

    let items = items
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    (
        items,
        Pagination {
            page,
            limit,
            total,
            pages,
        },
    )
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(readiness_check))
        .merge(activities::public_routes());

    // Protected routes: auth runs first, then the per-user rate limit
    let protected_routes = Router::new()
        .merge(entries::routes())
        .merge(activities::routes())
        .merge(account::routes())
        .merge(upload::routes())
        .merge(lookup::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
