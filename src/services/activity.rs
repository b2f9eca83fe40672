// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Activity projection.
//!
//! Maps stored journal entries to the external Activity shape, and maps
//! activity-shaped write payloads back onto entries.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::activity::{
    ActivityElevation, ActivityLocation, ActivityMetadata, ActivityPhoto, ActivityWeather,
    LocationField,
};
use crate::models::entry::normalize_tags;
use crate::models::{
    Activity, ActivityInput, Difficulty, EntryInput, EntryStatus, JournalEntry, Location, Trail,
    Weather,
};

/// Calories burned per minute of hiking.
const CALORIES_PER_MINUTE: f64 = 4.5;

const DISTANCE_UNIT: &str = "miles";
const DEFAULT_MOOD: &str = "good";

/// Project an entry into its Activity representation.
///
/// Never fails: absent numbers become 0 and absent categories take their
/// defaults.
pub fn to_activity(entry: &JournalEntry) -> Activity {
    let duration = entry.trail.duration.unwrap_or(0.0);
    let gain = entry.trail.elevation_gain.unwrap_or(0.0);

    Activity {
        id: entry.id.clone(),
        title: entry.title.clone(),
        description: entry.description.clone(),
        date: entry.date,
        duration,
        distance: entry.trail.distance.unwrap_or(0.0),
        distance_unit: DISTANCE_UNIT,
        calories: (duration * CALORIES_PER_MINUTE).round() as i64,
        elevation: ActivityElevation {
            gain,
            // Approximation: no descent is recorded, assume a return to the start.
            loss: gain,
        },
        location: ActivityLocation {
            name: entry.location.name.clone(),
            coordinates: entry.location.coordinates,
        },
        weather: ActivityWeather {
            temperature: entry.weather.temperature,
            conditions: entry.weather.conditions.clone().unwrap_or_default(),
        },
        difficulty: entry.trail.difficulty.unwrap_or(Difficulty::Moderate),
        mood: DEFAULT_MOOD,
        notes: entry.description.clone(),
        photos: entry
            .photos
            .iter()
            .map(|p| ActivityPhoto {
                url: p.url.clone(),
                caption: p.caption.clone(),
            })
            .collect(),
        tags: entry.tags.clone(),
        rating: entry.rating,
        trail_type: entry.trail.trail_type,
        metadata: ActivityMetadata {
            trail_name: entry.trail.name.clone(),
            coordinates: entry.location.coordinates,
            elevation: entry.location.elevation,
            trailhead: entry.location.trailhead.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        },
    }
}

impl ActivityInput {
    fn trail_name(&self) -> Option<String> {
        self.trail_name
            .clone()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.trail_name.clone()))
    }

    fn elevation_gain(&self) -> Option<f64> {
        self.elevation
            .as_ref()
            .and_then(|e| e.gain)
            .or(self.elevation_gain)
    }

    fn trailhead(&self) -> Option<String> {
        self.trailhead
            .clone()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.trailhead.clone()))
    }

    fn resolved_location(&self) -> Option<Location> {
        let mut location = match self.location.clone()? {
            LocationField::Name(name) => Location {
                name,
                coordinates: None,
                elevation: None,
                trailhead: None,
            },
            LocationField::Detailed(location) => location,
        };
        if location.coordinates.is_none() {
            location.coordinates = self.coordinates;
        }
        if location.trailhead.is_none() {
            location.trailhead = self.trailhead();
        }
        Some(location)
    }

    /// Build a completed entry payload. Title, description, date and
    /// location are required.
    pub fn into_entry_input(self) -> Result<EntryInput> {
        self.validate()?;

        let missing = |field: &str| AppError::BadRequest(format!("'{field}' is required"));
        let location = self.resolved_location().ok_or_else(|| missing("location"))?;
        let trail = Trail {
            name: self.trail_name(),
            difficulty: self.difficulty,
            distance: self.distance,
            duration: self.duration,
            elevation_gain: self.elevation_gain(),
            trail_type: self.trail_type,
        };

        let input = EntryInput {
            title: self.title.ok_or_else(|| missing("title"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            date: self.date.ok_or_else(|| missing("date"))?,
            location,
            trail,
            weather: self.weather.unwrap_or_default(),
            photos: self.photos.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            rating: self.rating.unwrap_or(3),
            privacy: None,
            status: EntryStatus::Completed,
        };
        input.validate()?;
        Ok(input)
    }

    /// Merge the supplied fields into `entry`; absent fields are left alone.
    pub fn apply_to(self, entry: &mut JournalEntry, now: DateTime<Utc>) -> Result<()> {
        self.validate()?;

        let location = self.resolved_location();
        if let Some(location) = &location {
            location.validate()?;
        }
        let trail_name = self.trail_name();
        let elevation_gain = self.elevation_gain();

        if let Some(title) = self.title {
            entry.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(location) = location {
            entry.location = location;
        }
        if let Some(name) = trail_name {
            entry.trail.name = Some(name);
        }
        if self.difficulty.is_some() {
            entry.trail.difficulty = self.difficulty;
        }
        if self.distance.is_some() {
            entry.trail.distance = self.distance;
        }
        if self.duration.is_some() {
            entry.trail.duration = self.duration;
        }
        if elevation_gain.is_some() {
            entry.trail.elevation_gain = elevation_gain;
        }
        if self.trail_type.is_some() {
            entry.trail.trail_type = self.trail_type;
        }
        if let Some(weather) = self.weather {
            entry.weather = Weather {
                conditions: weather.conditions.filter(|c| !c.is_empty()),
                ..weather
            };
        }
        if let Some(tags) = self.tags {
            entry.tags = normalize_tags(tags);
        }
        if self.rating.is_some() {
            entry.rating = self.rating;
        }
        if let Some(photos) = self.photos {
            entry.photos = photos;
        }
        entry.updated_at = now;
        Ok(())
    }
}
