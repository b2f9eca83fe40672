// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Photo storage on the media CDN (Cloudinary upload API).

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::{MediaCredentials, MEDIA_FOLDER};
use crate::error::{AppError, Result};

/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];
const UPLOAD_TRANSFORMATION: &str = "c_limit,w_1200,h_800/q_auto";
const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Result of a successful upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    #[serde(rename = "secure_url")]
    pub url: String,
    pub public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Signed uploads and deletes against the media CDN.
#[derive(Clone)]
pub struct MediaService {
    http: reqwest::Client,
    credentials: Option<MediaCredentials>,
}

impl MediaService {
    pub fn new(credentials: Option<MediaCredentials>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn credentials(&self) -> Result<&MediaCredentials> {
        self.credentials
            .as_ref()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Media storage is not configured")))
    }

    /// Upload an image into the journal folder, resized to fit 1200x800.
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedImage> {
        let creds = self.credentials()?;
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let params = [
            ("folder", MEDIA_FOLDER),
            ("format", "jpg"),
            ("timestamp", timestamp.as_str()),
            ("transformation", UPLOAD_TRANSFORMATION),
        ];
        let signature = sign_params(&params, &creds.api_secret);

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", creds.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value.to_string());
        }

        let response = self
            .http
            .post(format!("{}/{}/image/upload", API_BASE, creds.cloud_name))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Media upload failed: {}", e)))?;

        let uploaded: UploadedImage = check_response_json(response).await?;
        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(uploaded)
    }

    /// Remove an image by its public id. A missing image is not an error.
    pub async fn delete_image(&self, public_id: &str) -> Result<()> {
        let creds = self.credentials()?;
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let params = [("public_id", public_id), ("timestamp", timestamp.as_str())];
        let signature = sign_params(&params, &creds.api_secret);

        let response = self
            .http
            .post(format!("{}/{}/image/destroy", API_BASE, creds.cloud_name))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", creds.api_key.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Media delete failed: {}", e)))?;

        let destroyed: DestroyResponse = check_response_json(response).await?;
        if destroyed.result != "ok" && destroyed.result != "not found" {
            return Err(AppError::Upstream(format!(
                "Media delete returned '{}'",
                destroyed.result
            )));
        }
        tracing::debug!(public_id, result = %destroyed.result, "Image deleted");
        Ok(())
    }
}

/// Check an upload's declared type and size before it is sent upstream.
pub fn validate_upload(content_type: Option<&str>, size: usize) -> Result<()> {
    let content_type = content_type.unwrap_or_default();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(AppError::BadRequest(
            "Invalid file type. Only JPEG, PNG, and WebP are allowed.".to_string(),
        ));
    }
    if size == 0 {
        return Err(AppError::BadRequest("No file provided".to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(
            "File too large. Maximum size is 5MB.".to_string(),
        ));
    }
    Ok(())
}

/// Sign request parameters: `k1=v1&k2=v2...` sorted by key, with the API
/// secret appended, hashed with SHA-256.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!("Media HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Media JSON parse error: {}", e)))
}
