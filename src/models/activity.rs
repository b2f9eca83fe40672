// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Activity model: the external projection of a completed journal entry.
//!
//! The canonical wire shape is the nested "Health-First" layout. Activities
//! are never stored; they are rebuilt from the entry on every read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::entry::{
    not_blank, Coordinates, Difficulty, Location, Photo, TrailType, Weather,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: f64,
    pub distance: f64,
    pub distance_unit: &'static str,
    pub calories: i64,
    pub elevation: ActivityElevation,
    pub location: ActivityLocation,
    pub weather: ActivityWeather,
    pub difficulty: Difficulty,
    pub mood: &'static str,
    pub notes: String,
    pub photos: Vec<ActivityPhoto>,
    pub tags: Vec<String>,
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_type: Option<TrailType>,
    pub metadata: ActivityMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityElevation {
    pub gain: f64,
    /// Mirrors `gain`: entries carry no separate descent measurement.
    pub loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityLocation {
    pub name: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityWeather {
    pub temperature: Option<f64>,
    pub conditions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPhoto {
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    pub trail_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub elevation: Option<f64>,
    pub trailhead: Option<String>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::time_utils::rfc3339")]
    pub updated_at: DateTime<Utc>,
}

/// `location` may arrive as a bare name or as a full object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocationField {
    Name(String),
    Detailed(Location),
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ElevationInput {
    #[validate(range(min = 0.0))]
    pub gain: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataInput {
    pub trail_name: Option<String>,
    pub trailhead: Option<String>,
}

/// Activity-shaped write payload for `POST`/`PUT /api/activities`.
///
/// Every field is optional; creation additionally requires title,
/// description, date and location.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0))]
    pub duration: Option<f64>,
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    pub location: Option<LocationField>,
    #[validate(nested)]
    pub coordinates: Option<Coordinates>,
    pub trailhead: Option<String>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 0.0))]
    pub elevation_gain: Option<f64>,
    #[validate(nested)]
    pub elevation: Option<ElevationInput>,
    pub trail_type: Option<TrailType>,
    pub trail_name: Option<String>,
    pub metadata: Option<MetadataInput>,
    #[validate(nested)]
    pub weather: Option<Weather>,
    #[validate(length(max = 50))]
    pub tags: Option<Vec<String>>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
    #[validate(nested)]
    pub photos: Option<Vec<Photo>>,
}

fn deserialize_optional_date<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    raw.map(|s| {
        crate::time_utils::parse_flexible_datetime(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}")))
    })
    .transpose()
}
