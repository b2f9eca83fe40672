// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Summary aggregation over a user's completed journal entries.
//!
//! The caller fetches entries for one owner with `status = completed`, sorted
//! by date descending. Everything here is a pure, in-memory reduction: the
//! same input and `now` always produce the same `Summary`.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::models::summary::{
    Breakdowns, LocationCount, MonthlyTrend, PeriodInfo, PersonalRecords, RecentActivity,
    SummaryTotals, Trends,
};
use crate::models::{JournalEntry, Summary};
use crate::time_utils::{format_utc_rfc3339, month_start, year_start};

const TREND_MONTHS: i32 = 12;
const TOP_LOCATIONS: usize = 5;
const RECENT_ACTIVITIES: usize = 5;
const UNKNOWN: &str = "unknown";

/// Coarse relative date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl Period {
    /// Parse a query value. Unrecognised values apply no lower bound.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("week") => Period::Week,
            Some("month") => Period::Month,
            Some("year") => Period::Year,
            _ => Period::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Inclusive lower bound implied by this period at `now`.
    pub fn lower_bound(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Period::All => None,
            Period::Week => Some(now - Duration::days(7)),
            Period::Month => Some(month_start(now, 0)),
            Period::Year => Some(year_start(now)),
        }
    }
}

/// Explicit date range; each bound is optional and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// The filter applied before aggregation.
///
/// A non-empty explicit range replaces the period entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryWindow {
    pub period: Period,
    pub range: DateRange,
}

impl SummaryWindow {
    pub fn new(period: Period, range: DateRange) -> Self {
        Self { period, range }
    }

    /// Inclusive `(start, end)` bounds at `now`.
    pub fn bounds(&self, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        if self.range.is_empty() {
            (self.period.lower_bound(now), None)
        } else {
            (self.range.start, self.range.end)
        }
    }

    pub fn contains(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
    }

    fn info(&self) -> PeriodInfo {
        PeriodInfo {
            period_type: self.period.as_str().to_string(),
            start_date: self.range.start.map(format_utc_rfc3339),
            end_date: self.range.end.map(format_utc_rfc3339),
        }
    }
}

/// Summarize `entries` within `window` as seen at `now`.
pub fn summarize(entries: &[JournalEntry], window: &SummaryWindow, now: DateTime<Utc>) -> Summary {
    let filtered: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| window.contains(e.date, now))
        .collect();

    Summary {
        summary: totals(&filtered),
        breakdowns: breakdowns(&filtered),
        trends: Trends {
            monthly: monthly_trends(&filtered, now),
        },
        top_locations: top_locations(&filtered),
        recent_activities: filtered
            .iter()
            .take(RECENT_ACTIVITIES)
            .map(|e| RecentActivity {
                id: e.id.clone(),
                title: e.title.clone(),
                date: e.date,
                distance: e.trail.distance.unwrap_or(0.0),
                duration: e.trail.duration.unwrap_or(0.0),
                difficulty: e.trail.difficulty,
                rating: e.rating,
            })
            .collect(),
        period: window.info(),
    }
}

/// Running sums for a set of entries.
#[derive(Debug, Default, Clone, Copy)]
struct Sums {
    count: u32,
    distance: f64,
    duration: f64,
    elevation_gain: f64,
}

impl Sums {
    fn add(&mut self, entry: &JournalEntry) {
        self.count += 1;
        self.distance += entry.trail.distance.unwrap_or(0.0);
        self.duration += entry.trail.duration.unwrap_or(0.0);
        self.elevation_gain += entry.trail.elevation_gain.unwrap_or(0.0);
    }
}

fn mean(total: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Sums, means and personal records over `entries`.
pub fn totals(entries: &[&JournalEntry]) -> SummaryTotals {
    let mut sums = Sums::default();
    let mut rating_sum = 0.0;
    let mut records = PersonalRecords::default();

    for entry in entries {
        sums.add(entry);
        // Unrated entries count as 0 rather than being skipped.
        rating_sum += f64::from(entry.rating.unwrap_or(0));

        records.longest_hike = records.longest_hike.max(entry.trail.distance.unwrap_or(0.0));
        records.highest_elevation = records
            .highest_elevation
            .max(entry.trail.elevation_gain.unwrap_or(0.0));
        records.longest_duration = records
            .longest_duration
            .max(entry.trail.duration.unwrap_or(0.0));
    }

    SummaryTotals {
        total_activities: sums.count,
        total_distance: sums.distance,
        total_duration: sums.duration,
        total_elevation_gain: sums.elevation_gain,
        average_rating: mean(rating_sum, sums.count),
        average_distance: mean(sums.distance, sums.count),
        average_duration: mean(sums.duration, sums.count),
        average_elevation_gain: mean(sums.elevation_gain, sums.count),
        personal_records: records,
    }
}

fn breakdowns(entries: &[&JournalEntry]) -> Breakdowns {
    let mut out = Breakdowns::default();
    for entry in entries {
        let difficulty = entry.trail.difficulty.map_or(UNKNOWN, |d| d.as_str());
        *out.difficulty.entry(difficulty.to_string()).or_insert(0) += 1;

        let trail_type = entry.trail.trail_type.map_or(UNKNOWN, |t| t.as_str());
        *out.trail_type.entry(trail_type.to_string()).or_insert(0) += 1;

        if let Some(conditions) = entry.weather.conditions.as_deref().filter(|c| !c.is_empty()) {
            *out.weather.entry(conditions.to_string()).or_insert(0) += 1;
        }
    }
    out
}

/// Twelve calendar-month buckets ending with the month containing `now`.
fn monthly_trends(entries: &[&JournalEntry], now: DateTime<Utc>) -> Vec<MonthlyTrend> {
    let first = month_start(now, 1 - TREND_MONTHS);
    let mut buckets: BTreeMap<DateTime<Utc>, Sums> = (1 - TREND_MONTHS..=0)
        .map(|offset| (month_start(now, offset), Sums::default()))
        .collect();
    let end = month_start(now, 1);

    for entry in entries {
        if entry.date < first || entry.date >= end {
            continue;
        }
        // The bucket is the greatest month start not after the entry date.
        if let Some((_, sums)) = buckets.range_mut(..=entry.date).next_back() {
            sums.add(entry);
        }
    }

    buckets
        .into_iter()
        .map(|(start, sums)| MonthlyTrend {
            month: start.format("%Y-%m").to_string(),
            activities: sums.count,
            distance: sums.distance,
            duration: sums.duration,
            elevation_gain: sums.elevation_gain,
        })
        .collect()
}

/// Most visited locations; ties keep first-seen order.
fn top_locations(entries: &[&JournalEntry]) -> Vec<LocationCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<LocationCount> = Vec::new();

    for entry in entries {
        let name = entry.location.name.as_str();
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(LocationCount {
                    location: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_LOCATIONS);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, EntryStatus, Location, Privacy, Trail, TrailType, Weather};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 15, 0, 0).unwrap()
    }

    fn make_entry(
        id: &str,
        date: DateTime<Utc>,
        location: &str,
        distance: Option<f64>,
    ) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            user_id: "user_1".to_string(),
            title: format!("Hike {id}"),
            description: "test".to_string(),
            date,
            location: Location {
                name: location.to_string(),
                coordinates: None,
                elevation: None,
                trailhead: None,
            },
            trail: Trail {
                distance,
                ..Trail::default()
            },
            weather: Weather::default(),
            photos: vec![],
            tags: vec![],
            rating: Some(3),
            privacy: Privacy::Private,
            status: EntryStatus::Completed,
            created_at: date,
            updated_at: date,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = summarize(&[], &SummaryWindow::default(), now());

        assert_eq!(summary.summary.total_activities, 0);
        assert_eq!(summary.summary.personal_records, PersonalRecords::default());
        assert_eq!(summary.summary.average_rating, 0.0);
        assert_eq!(summary.summary.average_distance, 0.0);
        assert_eq!(summary.summary.average_duration, 0.0);
        assert_eq!(summary.summary.average_elevation_gain, 0.0);
        assert!(summary.top_locations.is_empty());
        assert!(summary.recent_activities.is_empty());
        assert_eq!(summary.trends.monthly.len(), 12);
    }

    #[test]
    fn test_unrated_entries_pull_average_down() {
        let mut a = make_entry("a", day(2024, 6, 18), "Rancho", Some(5.0));
        let mut b = make_entry("b", day(2024, 6, 10), "Rancho", Some(3.0));
        let mut c = make_entry("c", day(2024, 6, 2), "Windy Hill", Some(7.0));
        a.rating = Some(4);
        b.rating = None;
        c.rating = Some(5);

        let window = SummaryWindow::new(Period::Month, DateRange::default());
        let summary = summarize(&[a, b, c], &window, now());

        assert_eq!(summary.summary.total_activities, 3);
        assert_eq!(summary.summary.total_distance, 15.0);
        assert_eq!(summary.summary.average_rating, 3.0);
        assert_eq!(summary.summary.personal_records.longest_hike, 7.0);
    }

    #[test]
    fn test_period_filters() {
        let entries = vec![
            make_entry("recent", day(2024, 6, 15), "A", Some(1.0)),
            make_entry("this_month", day(2024, 6, 1), "A", Some(1.0)),
            make_entry("this_year", day(2024, 2, 1), "A", Some(1.0)),
            make_entry("last_year", day(2023, 12, 31), "A", Some(1.0)),
        ];
        let count = |period| {
            summarize(&entries, &SummaryWindow::new(period, DateRange::default()), now())
                .summary
                .total_activities
        };

        assert_eq!(count(Period::Week), 1);
        assert_eq!(count(Period::Month), 2);
        assert_eq!(count(Period::Year), 3);
        assert_eq!(count(Period::All), 4);
    }

    #[test]
    fn test_explicit_range_replaces_period() {
        let entries = vec![
            make_entry("a", day(2024, 6, 15), "A", None),
            make_entry("b", day(2023, 3, 1), "A", None),
            make_entry("c", day(2023, 1, 1), "A", None),
        ];
        let window = SummaryWindow::new(
            Period::Week,
            DateRange {
                start: Some(day(2023, 1, 1)),
                end: Some(day(2023, 3, 1)),
            },
        );

        let summary = summarize(&entries, &window, now());

        // Both bounds are inclusive and the week period is ignored.
        assert_eq!(summary.summary.total_activities, 2);
        assert_eq!(summary.period.period_type, "week");
        assert_eq!(summary.period.start_date.as_deref(), Some("2023-01-01T10:00:00Z"));
    }

    #[test]
    fn test_breakdowns_use_unknown_bucket() {
        let mut a = make_entry("a", day(2024, 6, 1), "A", None);
        a.trail.difficulty = Some(Difficulty::Hard);
        a.trail.trail_type = Some(TrailType::OutAndBack);
        a.weather.conditions = Some("Sunny".to_string());
        let b = make_entry("b", day(2024, 5, 1), "A", None);

        let summary = summarize(&[a, b], &SummaryWindow::default(), now());

        assert_eq!(summary.breakdowns.difficulty.get("hard"), Some(&1));
        assert_eq!(summary.breakdowns.difficulty.get("unknown"), Some(&1));
        assert_eq!(summary.breakdowns.trail_type.get("out-and-back"), Some(&1));
        assert_eq!(summary.breakdowns.weather.len(), 1);
        assert_eq!(
            summary.breakdowns.difficulty.values().sum::<u32>(),
            summary.summary.total_activities
        );
    }

    #[test]
    fn test_monthly_trends_cover_twelve_months_oldest_first() {
        let entries = vec![
            make_entry("a", day(2024, 6, 30), "A", Some(2.0)),
            make_entry("b", Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(), "A", Some(3.0)),
            make_entry("c", Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap(), "A", Some(4.0)),
            make_entry("d", day(2023, 7, 1), "A", Some(5.0)),
            make_entry("too_old", day(2023, 6, 30), "A", Some(6.0)),
        ];

        let trends = summarize(&entries, &SummaryWindow::default(), now())
            .trends
            .monthly;

        assert_eq!(trends.len(), 12);
        assert_eq!(trends[0].month, "2023-07");
        assert_eq!(trends[11].month, "2024-06");
        assert_eq!(trends[11].activities, 2);
        assert_eq!(trends[11].distance, 5.0);
        assert_eq!(trends[10].activities, 1);
        assert_eq!(trends[0].activities, 1);
        assert_eq!(trends.iter().map(|t| t.activities).sum::<u32>(), 4);
    }

    #[test]
    fn test_top_locations_ties_keep_first_seen_order() {
        let names = ["B", "A", "C", "A", "B", "D", "E", "F"];
        let entries: Vec<JournalEntry> = names
            .iter()
            .enumerate()
            .map(|(i, n)| make_entry(&i.to_string(), day(2024, 6, 1), n, None))
            .collect();

        let top = summarize(&entries, &SummaryWindow::default(), now()).top_locations;

        let order: Vec<&str> = top.iter().map(|l| l.location.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C", "D", "E"]);
        assert_eq!(top[0].count, 2);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_recent_activities_follow_input_order() {
        let entries: Vec<JournalEntry> = (0..7)
            .map(|i| make_entry(&i.to_string(), day(2024, 6, 10 - i), "A", Some(i as f64)))
            .collect();

        let recent = summarize(&entries, &SummaryWindow::default(), now()).recent_activities;

        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, "0");
        assert_eq!(recent[4].id, "4");
        assert_eq!(recent[4].distance, 4.0);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let entries: Vec<JournalEntry> = (0..20)
            .map(|i| {
                make_entry(
                    &i.to_string(),
                    day(2024, 1 + (i % 6), 3),
                    ["A", "B", "C"][i as usize % 3],
                    Some(i as f64),
                )
            })
            .collect();
        let window = SummaryWindow::new(Period::Year, DateRange::default());

        let first = summarize(&entries, &window, now());
        let second = summarize(&entries, &window, now());

        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_period_means_all() {
        assert_eq!(Period::from_query(Some("fortnight")), Period::All);
        assert_eq!(Period::from_query(None), Period::All);
        assert_eq!(Period::from_query(Some(" Month ")), Period::Month);
    }
}
