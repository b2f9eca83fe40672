// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Activity summary response model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::entry::Difficulty;

/// Aggregated statistics over a user's completed entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Summary {
    pub summary: SummaryTotals,
    pub breakdowns: Breakdowns,
    pub trends: Trends,
    pub top_locations: Vec<LocationCount>,
    pub recent_activities: Vec<RecentActivity>,
    pub period: PeriodInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct SummaryTotals {
    pub total_activities: u32,
    pub total_distance: f64,
    pub total_duration: f64,
    pub total_elevation_gain: f64,
    pub average_rating: f64,
    pub average_distance: f64,
    pub average_duration: f64,
    pub average_elevation_gain: f64,
    pub personal_records: PersonalRecords,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct PersonalRecords {
    pub longest_hike: f64,
    pub highest_elevation: f64,
    pub longest_duration: f64,
}

/// Frequency counts keyed by category. Ordered maps keep output stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Breakdowns {
    pub difficulty: BTreeMap<String, u32>,
    pub trail_type: BTreeMap<String, u32>,
    pub weather: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Trends {
    pub monthly: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct MonthlyTrend {
    /// "YYYY-MM"
    pub month: String,
    pub activities: u32,
    pub distance: f64,
    pub duration: f64,
    pub elevation_gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct LocationCount {
    pub location: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct RecentActivity {
    pub id: String,
    #[serde(with = "crate::time_utils::rfc3339")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: DateTime<Utc>,
    pub title: String,
    pub distance: f64,
    pub duration: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub difficulty: Option<Difficulty>,
    pub rating: Option<u8>,
}

/// The effective filter window echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct PeriodInfo {
    #[serde(rename = "type")]
    pub period_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
