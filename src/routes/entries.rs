// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Journal entry CRUD for the signed-in user.

use crate::db::new_document_id;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Difficulty, EntryInput, EntryStatus, JournalEntry, Photo};
use crate::routes::{page_bounds, paginate, Pagination};
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

const DEFAULT_PAGE_SIZE: u32 = 10;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/entries", get(list_entries).post(create_entry))
        .route(
            "/api/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub difficulty: Option<String>,
    /// Comma-separated; an entry matches if it has any of them
    pub tags: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<JournalEntry>,
    pub pagination: Pagination,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    query: std::result::Result<Query<EntriesQuery>, QueryRejection>,
) -> Result<Json<EntriesResponse>> {
    let Query(params) = query?;
    let (page, limit) = page_bounds(params.page, params.limit, DEFAULT_PAGE_SIZE)?;

    let difficulty = non_empty(&params.difficulty)
        .map(|raw| {
            Difficulty::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown difficulty '{}'", raw)))
        })
        .transpose()?;
    let status = non_empty(&params.status)
        .map(|raw| {
            EntryStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{}'", raw)))
        })
        .transpose()?;
    let tags: Vec<String> = non_empty(&params.tags)
        .map(|raw| {
            raw.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let search = non_empty(&params.search);

    tracing::debug!(
        user_id = %user.user_id,
        page,
        limit,
        search = ?search,
        "Listing entries"
    );

    let entries: Vec<JournalEntry> = state
        .db
        .list_entries(&user.user_id, status, difficulty)
        .await?
        .into_iter()
        .filter(|e| search.is_none_or(|s| e.matches_search(s)))
        .filter(|e| tags.is_empty() || e.has_any_tag(&tags))
        .collect();

    let (entries, pagination) = paginate(entries, page, limit);
    Ok(Json(EntriesResponse {
        entries,
        pagination,
    }))
}

// ─── Single Entry ────────────────────────────────────────────

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<EntryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<JournalEntry>)> {
    let Json(input) = payload?;
    input.validate()?;

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

    tracing::info!(user_id = %user.user_id, entry_id = %entry.id, "Entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Fetch an entry owned by the caller or fail with 404.
pub(crate) async fn owned_entry(state: &AppState, user_id: &str, id: &str) -> Result<JournalEntry> {
    state
        .db
        .get_entry_for_user(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<JournalEntry>> {
    Ok(Json(owned_entry(&state, &user.user_id, &id).await?))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<EntryInput>, JsonRejection>,
) -> Result<Json<JournalEntry>> {
    let Json(input) = payload?;
    input.validate()?;

    let mut entry = owned_entry(&state, &user.user_id, &id).await?;
    entry.replace_with(input, chrono::Utc::now())?;
    state.db.save_entry(&entry).await?;

    tracing::info!(user_id = %user.user_id, entry_id = %entry.id, "Entry updated");
    Ok(Json(entry))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let entry = owned_entry(&state, &user.user_id, &id).await?;
    state.db.delete_entry(&entry.id).await?;
    spawn_photo_cleanup(state, entry.photos);

    tracing::info!(user_id = %user.user_id, entry_id = %id, "Entry deleted");
    Ok(Json(MessageResponse {
        message: "Entry deleted successfully".to_string(),
    }))
}

/// Remove a deleted entry's photos from the media CDN in the background.
/// Failures are logged and otherwise ignored.
pub(crate) fn spawn_photo_cleanup(state: Arc<AppState>, photos: Vec<Photo>) {
    if photos.is_empty() || !state.media.is_configured() {
        return;
    }

    tokio::spawn(async move {
        for photo in photos {
            if let Err(e) = state.media.delete_image(&photo.public_id).await {
                tracing::warn!(
                    error = %e,
                    public_id = %photo.public_id,
                    "Failed to delete photo after entry deletion"
                );
            }
        }
    });
}
