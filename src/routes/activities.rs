// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Activities API: completed journal entries in the external Activity shape.

use crate::db::new_document_id;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityInput, JournalEntry, Summary};
use crate::routes::entries::{owned_entry, spawn_photo_cleanup, MessageResponse};
use crate::routes::{page_bounds, paginate, Pagination};
use crate::services::{summarize, to_activity, totals, DateRange, Period, SummaryWindow};
use crate::time_utils::{format_utc_rfc3339, parse_flexible_datetime};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

const DEFAULT_PAGE_SIZE: u32 = 50;
const PUBLIC_FEED_SIZE: u32 = 10;

/// Routes reachable without authentication.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities/public", get(public_activities))
        .route("/api/activities/docs", get(api_docs))
}

/// Authenticated activity routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/summary", get(activity_summary))
        .route(
            "/api/activities/{id}",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

/// Parse an optional `startDate`/`endDate` query value.
fn parse_date_param(
    name: &str,
    raw: Option<&str>,
) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            parse_flexible_datetime(v).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid '{}': expected RFC3339 or YYYY-MM-DD",
                    name
                ))
            })
        })
        .transpose()
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitiesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub total_activities: u32,
    pub total_distance: f64,
    pub total_duration: f64,
    pub total_elevation_gain: f64,
    pub average_rating: f64,
}

#[derive(Serialize)]
pub struct ActivitiesResponse {
    pub data: Vec<Activity>,
    pub pagination: Pagination,
    /// Totals over every matching activity, not just this page
    pub summary: ListSummary,
}

async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: std::result::Result<Query<ActivitiesQuery>, QueryRejection>,
) -> Result<Json<ActivitiesResponse>> {
    let Query(params) = query?;
    let (page, limit) = page_bounds(params.page, params.limit, DEFAULT_PAGE_SIZE)?;
    let start = parse_date_param("startDate", params.start_date.as_deref())?;
    let end = parse_date_param("endDate", params.end_date.as_deref())?;

    tracing::debug!(
        user_id = %user.user_id,
        page,
        limit,
        start = ?start,
        end = ?end,
        "Listing activities"
    );

    let entries = state
        .db
        .completed_entries(&user.user_id, start, end)
        .await?;

    let all: Vec<&JournalEntry> = entries.iter().collect();
    let t = totals(&all);
    let summary = ListSummary {
        total_activities: t.total_activities,
        total_distance: t.total_distance,
        total_duration: t.total_duration,
        total_elevation_gain: t.total_elevation_gain,
        average_rating: t.average_rating,
    };

    let (page_entries, pagination) = paginate(entries, page, limit);
    Ok(Json(ActivitiesResponse {
        data: page_entries.iter().map(to_activity).collect(),
        pagination,
        summary,
    }))
}

// ─── Summary ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

async fn activity_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: std::result::Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Summary>> {
    let Query(params) = query?;
    let range = DateRange {
        start: parse_date_param("startDate", params.start_date.as_deref())?,
        end: parse_date_param("endDate", params.end_date.as_deref())?,
    };
    let window = SummaryWindow::new(Period::from_query(params.period.as_deref()), range);

    let now = chrono::Utc::now();
    let (start, end) = window.bounds(now);
    let entries = state
        .db
        .completed_entries(&user.user_id, start, end)
        .await?;

    tracing::debug!(
        user_id = %user.user_id,
        period = window.period.as_str(),
        count = entries.len(),
        "Summarizing activities"
    );

    Ok(Json(summarize(&entries, &window, now)))
}

// ─── Single Activity ─────────────────────────────────────────

/// Fetch a completed entry owned by the caller or fail with 404.
async fn owned_activity(state: &AppState, user_id: &str, id: &str) -> Result<JournalEntry> {
    match owned_entry(state, user_id, id).await {
        Ok(entry) if entry.is_completed() => Ok(entry),
        Ok(_) | Err(AppError::NotFound(_)) => {
            Err(AppError::NotFound("Activity not found".to_string()))
        }
        Err(e) => Err(e),
    }
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    let entry = owned_activity(&state, &user.user_id, &id).await?;
    Ok(Json(to_activity(&entry)))
}

async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<ActivityInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Activity>)> {
    let Json(payload) = payload?;
    let input = payload.into_entry_input()?;

    let now = chrono::Utc::now();
    let profile = state
        .db
        .get_or_create_user_profile(&user.user_id, now)
        .await?;

    let entry = JournalEntry::create(
        new_document_id()?,
        &user.user_id,
        input,
        profile.preferences.default_privacy,
        now,
    );
    state.db.save_entry(&entry).await?;

    tracing::info!(user_id = %user.user_id, entry_id = %entry.id, "Activity created");
    Ok((StatusCode::CREATED, Json(to_activity(&entry))))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ActivityInput>, JsonRejection>,
) -> Result<Json<Activity>> {
    let Json(payload) = payload?;
    payload.validate()?;

    let mut entry = owned_activity(&state, &user.user_id, &id).await?;
    payload.apply_to(&mut entry, chrono::Utc::now())?;
    state.db.save_entry(&entry).await?;

    tracing::info!(user_id = %user.user_id, entry_id = %entry.id, "Activity updated");
    Ok(Json(to_activity(&entry)))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let entry = owned_activity(&state, &user.user_id, &id).await?;
    state.db.delete_entry(&entry.id).await?;
    spawn_photo_cleanup(state, entry.photos);

    tracing::info!(user_id = %user.user_id, entry_id = %id, "Activity deleted");
    Ok(Json(MessageResponse {
        message: "Activity deleted successfully".to_string(),
    }))
}

// ─── Public ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PublicActivitiesResponse {
    pub data: Vec<Activity>,
    pub message: String,
    pub count: usize,
    pub timestamp: String,
}

/// Latest completed public entries across all users.
async fn public_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicActivitiesResponse>> {
    let entries = state.db.public_completed_entries(PUBLIC_FEED_SIZE).await?;
    let data: Vec<Activity> = entries.iter().map(to_activity).collect();

    Ok(Json(PublicActivitiesResponse {
        count: data.len(),
        data,
        message: "Hiking entries retrieved successfully".to_string(),
        timestamp: format_utc_rfc3339(chrono::Utc::now()),
    }))
}

/// Static description of the activities API.
async fn api_docs(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let base = state.config.public_base_url.trim_end_matches('/');

    Json(serde_json::json!({
        "name": "Trail Journal Activities API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Completed hiking journal entries in a format suited to health and fitness integrations.",
        "baseUrl": format!("{}/api/activities", base),
        "authentication": {
            "type": "Bearer Token",
            "description": "Send a session token or an API token from POST /api/tokens in the Authorization header. API tokens are read-only."
        },
        "rateLimit": {
            "requestsPerMinute": state.config.rate_limit_per_minute,
            "headers": ["X-RateLimit-Limit", "X-RateLimit-Remaining", "X-RateLimit-Reset"]
        },
        "endpoints": {
            "GET /api/activities": {
                "description": "List activities, newest first",
                "parameters": {
                    "page": "Page number (default: 1)",
                    "limit": "Activities per page (default: 50, max: 100)",
                    "startDate": "Only activities on or after this date (RFC3339 or YYYY-MM-DD)",
                    "endDate": "Only activities on or before this date (RFC3339 or YYYY-MM-DD)"
                },
                "example": format!("{}/api/activities?page=1&limit=10&startDate=2024-01-01", base)
            },
            "GET /api/activities/{id}": { "description": "Fetch one activity" },
            "POST /api/activities": {
                "description": "Create an activity",
                "required": ["title", "description", "date", "location"]
            },
            "PUT /api/activities/{id}": { "description": "Update the supplied fields of an activity" },
            "DELETE /api/activities/{id}": { "description": "Delete an activity" },
            "GET /api/activities/summary": {
                "description": "Aggregated statistics and trends",
                "parameters": {
                    "period": "all, week, month or year (default: all)",
                    "startDate": "Custom range start; overrides period",
                    "endDate": "Custom range end; overrides period"
                }
            },
            "GET /api/activities/public": { "description": "Latest public activities (no authentication)" }
        },
        "dataFormat": {
            "distanceUnit": "miles",
            "duration": "minutes",
            "elevation": "feet",
            "calories": "estimated as 4.5 per minute of hiking"
        }
    }))
}
