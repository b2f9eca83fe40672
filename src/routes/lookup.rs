// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Trail catalog and weather lookups used to prefill entries.

use crate::error::{AppError, Result};
use crate::models::{TrailInfo, WeatherReport};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trails", get(get_trails))
        .route("/api/weather", get(get_weather))
}

// ─── Trails ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrailsQuery {
    pub id: Option<String>,
    pub search: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct TrailsResponse {
    pub trails: Vec<TrailInfo>,
    pub total: usize,
}

/// One trail by `id`, a search by `search` (or `location`), or the whole catalog.
async fn get_trails(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<TrailsQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = query?;

    if let Some(id) = params.id.as_deref().filter(|v| !v.is_empty()) {
        let trail = state
            .trails
            .get(id)
            .ok_or_else(|| AppError::NotFound("Trail not found".to_string()))?;
        return Ok(Json(trail).into_response());
    }

    let term = params
        .search
        .as_deref()
        .or(params.location.as_deref())
        .filter(|v| !v.trim().is_empty());
    let trails = match term {
        Some(term) => state.trails.search(term),
        None => state.trails.all(),
    };

    Ok(Json(TrailsResponse {
        total: trails.len(),
        trails,
    })
    .into_response())
}

// ─── Weather ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub location: Option<String>,
}

/// Parse `lat`/`lon` into a valid coordinate pair.
fn parse_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<(f64, f64)> {
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(AppError::BadRequest(
            "Location coordinates required".to_string(),
        ));
    };

    let invalid = || AppError::BadRequest("Invalid coordinates".to_string());
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(invalid());
    }
    Ok((lat, lon))
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherReport>> {
    let Query(params) = query?;
    let (lat, lon) = parse_coordinates(params.lat.as_deref(), params.lon.as_deref())?;

    let report = state
        .weather
        .report(lat, lon, params.location.as_deref())
        .await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            parse_coordinates(Some("37.33"), Some(" -122.09")).unwrap(),
            (37.33, -122.09)
        );
        assert!(parse_coordinates(None, Some("1")).is_err());
        assert!(parse_coordinates(Some("abc"), Some("1")).is_err());
        assert!(parse_coordinates(Some("91"), Some("1")).is_err());
        assert!(parse_coordinates(Some("NaN"), Some("1")).is_err());
    }
}
