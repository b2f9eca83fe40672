// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Application configuration loaded from environment variables.
//!
//! Secrets (the auth provider's signing key and the media CDN credentials)
//! are injected as environment variables by the deployment and read once at
//! startup.

use std::env;

/// Default folder for uploaded photos on the media CDN.
pub const MEDIA_FOLDER: &str = "hiking-journal";

/// Media CDN credentials. All three values are required for uploads.
#[derive(Debug, Clone)]
pub struct MediaCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Base URL this API is served from (used in the API docs)
    pub public_base_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Path to the trail catalog JSON file
    pub trails_path: String,
    /// Weather API base URL. Empty selects the offline fixed provider.
    pub weather_api_url: String,
    /// Requests allowed per user per minute
    pub rate_limit_per_minute: u32,

    // --- Secrets ---
    /// HS256 key shared with the auth provider (raw bytes)
    pub auth_signing_key: Vec<u8>,
    /// Media CDN credentials, if configured
    pub media: Option<MediaCredentials>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            public_base_url: "http://localhost:8080".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            trails_path: "data/trails.json".to_string(),
            weather_api_url: String::new(),
            rate_limit_per_minute: 100,
            auth_signing_key: b"test_auth_key_32_bytes_minimum!!".to_vec(),
            media: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            trails_path: env::var("TRAILS_PATH")
                .unwrap_or_else(|_| "data/trails.json".to_string()),
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| "https://api.open-meteo.com".to_string()),
            rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),

            auth_signing_key: env::var("AUTH_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("AUTH_SIGNING_KEY"))?
                .trim()
                .as_bytes()
                .to_vec(),
            media: media_from_env()?,
        })
    }
}

/// Read media CDN credentials. Either all three are set or none is.
fn media_from_env() -> Result<Option<MediaCredentials>, ConfigError> {
    let read = |name: &str| env::var(name).ok().map(|v| v.trim().to_string());

    match (
        read("CLOUDINARY_CLOUD_NAME"),
        read("CLOUDINARY_API_KEY"),
        read("CLOUDINARY_API_SECRET"),
    ) {
        (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(MediaCredentials {
            cloud_name,
            api_key,
            api_secret,
        })),
        (None, None, None) => Ok(None),
        _ => Err(ConfigError::Incomplete("CLOUDINARY_*")),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Incomplete configuration group: {0}")]
    Incomplete(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("AUTH_SIGNING_KEY", " test_auth_key_32_bytes_minimum!! ");
        env::set_var("RATE_LIMIT_PER_MINUTE", "not-a-number");
        env::remove_var("CLOUDINARY_CLOUD_NAME");
        env::remove_var("CLOUDINARY_API_KEY");
        env::remove_var("CLOUDINARY_API_SECRET");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.auth_signing_key, b"test_auth_key_32_bytes_minimum!!");
        assert_eq!(config.rate_limit_per_minute, 100);
        assert!(config.media.is_none());
    }
}
