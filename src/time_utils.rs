// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Shared helpers for date/time parsing and formatting.
//!
//! Stored timestamps use RFC3339 with second precision and a `Z` suffix so
//! that Firestore's lexical string ordering matches chronological order.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a user-supplied date: full RFC3339, or a bare `YYYY-MM-DD`
/// (interpreted as midnight UTC).
pub fn parse_flexible_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// First instant of the calendar month `offset` months away from `now`'s month.
///
/// `offset = 0` is the current month, `-1` the previous one, `1` the next.
pub fn month_start(now: DateTime<Utc>, offset: i32) -> DateTime<Utc> {
    let months = now.year() * 12 + now.month0() as i32 + offset;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// First instant of the calendar year containing `now`.
pub fn year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Serde adapter for stored timestamps.
pub mod rfc3339 {
    use super::{format_utc_rfc3339, parse_flexible_datetime};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_utc_rfc3339(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_flexible_datetime(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }
}
