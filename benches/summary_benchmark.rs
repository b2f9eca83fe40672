// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use trail_journal::models::{
    Difficulty, EntryStatus, JournalEntry, Location, Privacy, Trail, TrailType, Weather,
};
use trail_journal::services::{summarize, DateRange, Period, SummaryWindow};

const DIFFICULTIES: [Difficulty; 4] = [
    Difficulty::Easy,
    Difficulty::Moderate,
    Difficulty::Hard,
    Difficulty::Expert,
];
const TRAIL_TYPES: [TrailType; 3] = [TrailType::Loop, TrailType::OutAndBack, TrailType::Lollipop];
const PLACES: [&str; 7] = [
    "Skyline Ridge",
    "Rancho San Antonio",
    "Mission Peak",
    "Windy Hill",
    "Russian Ridge",
    "Purisima Creek",
    "Monte Bello",
];

/// Three years of completed hikes, newest first.
fn synthetic_entries(count: usize) -> Vec<JournalEntry> {
    let newest = Utc.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            let date = newest - Duration::hours(i as i64 * 26);
            JournalEntry {
                id: format!("entry-{}", i),
                user_id: "bench-user".to_string(),
                title: format!("Hike {}", i),
                description: "Synthetic benchmark hike".to_string(),
                date,
                location: Location {
                    name: PLACES[i % PLACES.len()].to_string(),
                    coordinates: None,
                    elevation: Some(500.0 + (i % 40) as f64 * 60.0),
                    trailhead: None,
                },
                trail: Trail {
                    name: None,
                    difficulty: Some(DIFFICULTIES[i % DIFFICULTIES.len()]),
                    distance: Some(2.0 + (i % 13) as f64 * 0.75),
                    duration: Some(45.0 + (i % 9) as f64 * 20.0),
                    elevation_gain: Some(150.0 + (i % 17) as f64 * 90.0),
                    trail_type: Some(TRAIL_TYPES[i % TRAIL_TYPES.len()]),
                },
                weather: Weather {
                    conditions: Some(if i % 3 == 0 { "Sunny" } else { "Cloudy" }.to_string()),
                    ..Weather::default()
                },
                photos: vec![],
                tags: vec![],
                rating: Some((i % 5) as u8 + 1),
                privacy: Privacy::Private,
                status: EntryStatus::Completed,
                created_at: date,
                updated_at: date,
            }
        })
        .collect()
}

fn benchmark_summarize(c: &mut Criterion) {
    let entries = synthetic_entries(1000);
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("summarize");

    let all_time = SummaryWindow::new(Period::All, DateRange::default());
    group.bench_function("all_time_1000_entries", |b| {
        b.iter(|| summarize(black_box(&entries), black_box(&all_time), now))
    });

    let last_month = SummaryWindow::new(Period::Month, DateRange::default());
    group.bench_function("last_month_1000_entries", |b| {
        b.iter(|| summarize(black_box(&entries), black_box(&last_month), now))
    });

    group.finish();
}

criterion_group!(benches, benchmark_summarize);
criterion_main!(benches);
