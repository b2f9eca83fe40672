// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Journal entry model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Trail difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "moderate" => Some(Difficulty::Moderate),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

/// Trail shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailType {
    Loop,
    OutAndBack,
    Lollipop,
    PointToPoint,
    Other,
}

impl TrailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrailType::Loop => "loop",
            TrailType::OutAndBack => "out-and-back",
            TrailType::Lollipop => "lollipop",
            TrailType::PointToPoint => "point-to-point",
            TrailType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    Public,
    #[default]
    Private,
}

/// Entry completion status. Only `Completed` entries count as activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Draft,
    Completed,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Draft => "draft",
            EntryStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(EntryStatus::Draft),
            "completed" => Some(EntryStatus::Completed),
            _ => None,
        }
    }

    /// Entries may be promoted from draft to completed, never back.
    pub fn can_transition_to(self, next: EntryStatus) -> bool {
        !(self == EntryStatus::Completed && next == EntryStatus::Draft)
    }
}

/// GPS coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinates {
    #[serde(alias = "latitude")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[serde(alias = "longitude")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub coordinates: Option<Coordinates>,
    /// Elevation of the location (feet)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailhead: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Distance in miles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    /// Duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub duration: Option<f64>,
    /// Elevation gain in feet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub elevation_gain: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub trail_type: Option<TrailType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default)]
    pub public_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(with = "crate::time_utils::rfc3339", default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Stored journal entry (collection `journal_entries`, keyed by `id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    /// Owning user (auth provider subject)
    pub user_id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub date: DateTime<Utc>,
    pub location: Location,
    #[serde(default)]
    pub trail: Trail,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Absent on some legacy documents
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

fn default_rating() -> u8 {
    3
}

/// Create/replace payload for `/api/entries`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub description: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub date: DateTime<Utc>,
    #[validate(nested)]
    pub location: Location,
    #[serde(default)]
    #[validate(nested)]
    pub trail: Trail,
    #[serde(default)]
    #[validate(nested)]
    pub weather: Weather,
    #[serde(default)]
    #[validate(nested)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub tags: Vec<String>,
    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    /// Falls back to the owner's preference when absent
    #[serde(default)]
    pub privacy: Option<Privacy>,
    #[serde(default)]
    pub status: EntryStatus,
}

impl JournalEntry {
    /// Build a new entry owned by `user_id` from validated input.
    pub fn create(
        id: String,
        user_id: &str,
        input: EntryInput,
        default_privacy: Privacy,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id: user_id.to_string(),
            title: input.title.trim().to_string(),
            description: input.description,
            date: input.date,
            location: input.location,
            trail: input.trail,
            weather: input.weather,
            photos: input.photos,
            tags: normalize_tags(input.tags),
            rating: Some(input.rating),
            privacy: input.privacy.unwrap_or(default_privacy),
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every user-editable field with `input`.
    ///
    /// Identity, ownership and `created_at` are kept. A completed entry
    /// cannot be moved back to draft.
    pub fn replace_with(&mut self, input: EntryInput, now: DateTime<Utc>) -> Result<(), AppError> {
        if !self.status.can_transition_to(input.status) {
            return Err(AppError::BadRequest(
                "A completed entry cannot be reverted to draft".to_string(),
            ));
        }

        self.title = input.title.trim().to_string();
        self.description = input.description;
        self.date = input.date;
        self.location = input.location;
        self.trail = input.trail;
        self.weather = input.weather;
        self.photos = input.photos;
        self.tags = normalize_tags(input.tags);
        self.rating = Some(input.rating);
        if let Some(privacy) = input.privacy {
            self.privacy = privacy;
        }
        self.status = input.status;
        self.updated_at = now;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }

    /// Case-insensitive match over title, description, location name and tags.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.location.name.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }

    /// True if the entry carries any of `tags`.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Trim tags, drop empty ones and remove duplicates (first occurrence wins).
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
