// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Photo upload.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::media::{validate_upload, MAX_UPLOAD_BYTES};
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Headroom over the file limit for multipart framing.
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/upload", post(upload_photo))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub public_id: String,
}

async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().unwrap_or("photo").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        validate_upload(content_type.as_deref(), data.len())?;

        tracing::debug!(
            user_id = %user.user_id,
            size = data.len(),
            content_type = ?content_type,
            "Uploading photo"
        );

        let uploaded = state
            .media
            .upload_image(
                data.to_vec(),
                &file_name,
                content_type.as_deref().unwrap_or_default(),
            )
            .await?;

        return Ok(Json(UploadResponse {
            url: uploaded.url,
            public_id: uploaded.public_id,
        }));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}
