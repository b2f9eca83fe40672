// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! JWT authentication middleware.
//!
//! Session tokens are issued by the hosted auth provider and carry no scope.
//! API tokens are minted by this service and carry an explicit scope list.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie holding the auth provider's session token.
pub const SESSION_COOKIE: &str = "trail_journal_session";

/// Scope granted to API tokens.
pub const SCOPE_READ_ACTIVITIES: &str = "read:activities";

pub const API_TOKEN_LIFETIME_DAYS: i64 = 365;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (auth provider user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Present only on API tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Authenticated caller extracted from a JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    /// `None` for interactive sessions
    pub scopes: Option<Vec<String>>,
}

impl AuthUser {
    pub fn is_session(&self) -> bool {
        self.scopes.is_none()
    }

    /// Sessions have every scope; API tokens only the ones they were minted with.
    pub fn require_scope(&self, scope: &str) -> Result<(), AppError> {
        match &self.scopes {
            None => Ok(()),
            Some(scopes) if scopes.iter().any(|s| s == scope) => Ok(()),
            Some(_) => Err(AppError::Forbidden(format!("Missing scope '{}'", scope))),
        }
    }

    /// API tokens may only read activities.
    pub fn authorize(&self, method: &Method, path: &str) -> Result<(), AppError> {
        if self.is_session() {
            return Ok(());
        }
        if *method == Method::GET && path.starts_with("/api/activities") {
            return self.require_scope(SCOPE_READ_ACTIVITIES);
        }
        Err(AppError::Forbidden(
            "API tokens can only read activities".to_string(),
        ))
    }
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Bearer header wins so API clients are not shadowed by a browser cookie
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    let token = match bearer {
        Some(token) if !token.is_empty() => token,
        _ => jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?,
    };

    let claims = verify_jwt(&token, &state.config.auth_signing_key)?;

    let user = AuthUser {
        user_id: claims.sub,
        scopes: claims.scope,
    };
    user.authorize(request.method(), request.uri().path())?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Decode and validate an HS256 token.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let claims = decode::<Claims>(token, &key, &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected token");
            AppError::InvalidToken
        })?
        .claims;

    if claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }
    Ok(claims)
}

/// Create a session JWT (as the auth provider would).
pub fn create_session_jwt(user_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 30 * 24 * 60 * 60, // 30 days
        scope: None,
        jti: None,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// A freshly minted API token and its expiry.
pub struct ApiToken {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub scopes: Vec<String>,
}

/// Mint a long-lived read-only API token for `user_id`.
pub fn create_api_token(user_id: &str, signing_key: &[u8]) -> anyhow::Result<ApiToken> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::days(API_TOKEN_LIFETIME_DAYS);

    let mut jti = [0u8; 16];
    SystemRandom::new()
        .fill(&mut jti)
        .map_err(|_| anyhow::anyhow!("System RNG unavailable"))?;

    let scopes = vec![SCOPE_READ_ACTIVITIES.to_string()];
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
        scope: Some(scopes.clone()),
        jti: Some(hex::encode(jti)),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?;

    Ok(ApiToken {
        token,
        expires_at,
        scopes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test_auth_key_32_bytes_minimum!!";

    #[test]
    fn test_session_token_round_trip() {
        let token = create_session_jwt("user_1", KEY).unwrap();
        let claims = verify_jwt(&token, KEY).unwrap();

        assert_eq!(claims.sub, "user_1");
        assert!(claims.scope.is_none());
    }

    #[test]
    fn test_api_token_carries_read_scope() {
        let minted = create_api_token("user_1", KEY).unwrap();
        let claims = verify_jwt(&minted.token, KEY).unwrap();

        assert_eq!(claims.scope, Some(vec![SCOPE_READ_ACTIVITIES.to_string()]));
        assert_eq!(claims.jti.as_deref().map(str::len), Some(32));
        assert!(minted.expires_at > chrono::Utc::now() + chrono::Duration::days(364));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = create_session_jwt("user_1", KEY).unwrap();
        assert!(matches!(
            verify_jwt(&token, b"another_key_that_is_32_bytes_lng"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_api_tokens_limited_to_activity_reads() {
        let session = AuthUser {
            user_id: "u".to_string(),
            scopes: None,
        };
        let api = AuthUser {
            user_id: "u".to_string(),
            scopes: Some(vec![SCOPE_READ_ACTIVITIES.to_string()]),
        };
        let unscoped = AuthUser {
            user_id: "u".to_string(),
            scopes: Some(vec![]),
        };

        assert!(session.authorize(&Method::POST, "/api/tokens").is_ok());
        assert!(api.authorize(&Method::GET, "/api/activities").is_ok());
        assert!(api.authorize(&Method::GET, "/api/activities/summary").is_ok());
        assert!(api.authorize(&Method::POST, "/api/activities").is_err());
        assert!(api.authorize(&Method::GET, "/api/entries").is_err());
        assert!(api.authorize(&Method::POST, "/api/tokens").is_err());
        assert!(unscoped.authorize(&Method::GET, "/api/activities").is_err());
    }
}
