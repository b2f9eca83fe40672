// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Per-user fixed-window rate limiting.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Seconds until the current window resets
    pub reset_secs: u64,
}

/// Request counter keyed by user id, shared across all requests.
pub struct RateLimiter {
    limit: u32,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(limit_per_minute: u32) -> Self {
        Self {
            limit: limit_per_minute,
            windows: DashMap::new(),
        }
    }

    /// Count one request for `key` at `now`.
    pub fn check(&self, key: &str, now: Instant) -> RateDecision {
        let mut window = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= WINDOW {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        let allowed = window.count < self.limit;
        if allowed {
            window.count += 1;
        }

        let elapsed = now.duration_since(window.started);
        RateDecision {
            allowed,
            limit: self.limit,
            remaining: self.limit.saturating_sub(window.count),
            reset_secs: WINDOW.saturating_sub(elapsed).as_secs().max(1),
        }
    }

    /// Drop windows that have expired.
    pub fn prune(&self, now: Instant) {
        self.windows
            .retain(|_, w| now.duration_since(w.started) < WINDOW);
    }
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateDecision) {
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(decision.reset_secs));
}

/// Middleware enforcing the per-user limit. Must run after `require_auth`.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = request
        .extensions()
        .get::<AuthUser>()
        .map(|u| u.user_id.clone())
        .ok_or(AppError::Unauthorized)?;

    let decision = state.rate_limiter.check(&user_id, Instant::now());

    if !decision.allowed {
        tracing::warn!(user_id = %user_id, "Rate limit exceeded");
        let mut response = AppError::RateLimited.into_response();
        apply_headers(response.headers_mut(), &decision);
        response
            .headers_mut()
            .insert("retry-after", HeaderValue::from(decision.reset_secs));
        return Ok(response);
    }

    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), &decision);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_enforced_within_window() {
        let limiter = RateLimiter::new(2);
        let t0 = Instant::now();

        let first = limiter.check("u", t0);
        assert!(first.allowed);
        assert_eq!(first.remaining, 1);

        assert!(limiter.check("u", t0).allowed);

        let third = limiter.check("u", t0 + Duration::from_secs(5));
        assert!(!third.allowed);
        assert_eq!(third.remaining, 0);
        assert_eq!(third.reset_secs, 55);
    }

    #[test]
    fn test_users_are_counted_separately() {
        let limiter = RateLimiter::new(1);
        let t0 = Instant::now();

        assert!(limiter.check("a", t0).allowed);
        assert!(limiter.check("b", t0).allowed);
        assert!(!limiter.check("a", t0).allowed);
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1);
        let t0 = Instant::now();

        assert!(limiter.check("u", t0).allowed);
        assert!(!limiter.check("u", t0).allowed);
        assert!(limiter.check("u", t0 + WINDOW).allowed);
    }

    #[test]
    fn test_prune_drops_expired_windows() {
        let limiter = RateLimiter::new(5);
        let t0 = Instant::now();
        limiter.check("u", t0);

        limiter.prune(t0 + WINDOW);
        assert!(limiter.windows.is_empty());
    }
}
