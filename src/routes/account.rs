// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Current user profile, preferences and API token minting.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_api_token, AuthUser};
use crate::models::{Preferences, UserProfile};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/me/preferences", put(update_preferences))
        .route("/api/tokens", post(create_token))
}

/// Get (or lazily create) the caller's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_or_create_user_profile(&user.user_id, chrono::Utc::now())
        .await?;
    Ok(Json(profile))
}

async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<Preferences>, JsonRejection>,
) -> Result<Json<UserProfile>> {
    let Json(preferences) = payload?;

    let mut profile = state
        .db
        .get_or_create_user_profile(&user.user_id, chrono::Utc::now())
        .await?;
    profile.preferences = preferences;
    state.db.upsert_user_profile(&profile).await?;

    tracing::info!(user_id = %user.user_id, "Preferences updated");
    Ok(Json(profile))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
    pub expires_at: String,
    pub scopes: Vec<String>,
}

/// Mint a read-only API token. Only interactive sessions may do this.
async fn create_token(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TokenResponse>> {
    let minted = create_api_token(&user.user_id, &state.config.auth_signing_key)
        .map_err(AppError::Internal)?;

    tracing::info!(
        user_id = %user.user_id,
        expires_at = %minted.expires_at,
        "API token issued"
    );

    Ok(Json(TokenResponse {
        success: true,
        token: minted.token,
        message: "API token generated. Store it securely; it cannot be retrieved again."
            .to_string(),
        expires_at: format_utc_rfc3339(minted.expires_at),
        scopes: minted.scopes,
    }))
}
