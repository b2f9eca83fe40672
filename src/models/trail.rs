// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Trail catalog and weather report models.

use serde::{Deserialize, Serialize};

use crate::models::entry::{Location, Trail};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seasonality {
    pub best_seasons: Vec<String>,
    pub accessibility: String,
}

/// A catalog trail, shaped so its `location` and `trail` can prefill an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailInfo {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub trail: Trail,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<Seasonality>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// °F
    pub temperature: f64,
    pub conditions: String,
    /// mph
    pub wind_speed: f64,
    /// percent
    pub humidity: f64,
    pub feels_like: f64,
    pub uv_index: f64,
    /// miles
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    /// "YYYY-MM-DD"
    pub date: String,
    pub high: f64,
    pub low: f64,
    pub conditions: String,
    /// Precipitation probability, percent
    pub precipitation: f64,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub title: String,
    pub description: String,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
    pub alerts: Vec<WeatherAlert>,
}
