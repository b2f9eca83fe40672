// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! User profile model for storage and API.
//!
//! Identity itself lives with the auth provider; this document only holds
//! per-user preferences keyed by the provider's subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entry::Privacy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub default_privacy: Privacy,
}

/// User profile stored in Firestore (collection `user_profiles`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Auth provider subject (also used as document ID)
    pub user_id: String,
    /// When the profile was first created
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl UserProfile {
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            created_at: now,
            preferences: Preferences::default(),
        }
    }
}
