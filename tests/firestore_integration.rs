// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Firestore integration tests.
//!
//! Run with `FIRESTORE_EMULATOR_HOST=localhost:8081`; skipped otherwise.

use chrono::{DateTime, TimeZone, Utc};
use trail_journal::models::{
    Difficulty, EntryStatus, JournalEntry, Location, Preferences, Privacy, Trail, UserProfile,
    Weather,
};
use trail_journal::models::user::Units;

mod common;

fn unique_user(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}|{}", prefix, nanos)
}

fn entry(
    id: &str,
    user_id: &str,
    date: DateTime<Utc>,
    status: EntryStatus,
    privacy: Privacy,
    difficulty: Difficulty,
) -> JournalEntry {
    JournalEntry {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: format!("Hike {}", id),
        description: "Integration test hike".to_string(),
        date,
        location: Location {
            name: "Skyline Ridge".to_string(),
            coordinates: None,
            elevation: Some(2100.0),
            trailhead: None,
        },
        trail: Trail {
            difficulty: Some(difficulty),
            distance: Some(4.5),
            duration: Some(120.0),
            elevation_gain: Some(800.0),
            ..Trail::default()
        },
        weather: Weather::default(),
        photos: vec![],
        tags: vec!["test".to_string()],
        rating: Some(4),
        privacy,
        status,
        created_at: date,
        updated_at: date,
    }
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

async fn cleanup(db: &trail_journal::db::FirestoreDb, ids: &[String]) {
    for id in ids {
        let _ = db.delete_entry(id).await;
    }
}

#[tokio::test]
async fn test_entry_round_trip_is_owner_scoped() {
    require_emulator!();
    let db = common::test_db().await;
    let user = unique_user("owner");
    let id = format!("rt-{}", user.replace('|', "-"));

    let saved = entry(
        &id,
        &user,
        day(2024, 5, 4),
        EntryStatus::Completed,
        Privacy::Private,
        Difficulty::Hard,
    );
    db.save_entry(&saved).await.unwrap();

    let fetched = db.get_entry_for_user(&user, &id).await.unwrap();
    assert_eq!(fetched, Some(saved));

    let stranger = db.get_entry_for_user("someone-else", &id).await.unwrap();
    assert!(stranger.is_none());

    db.delete_entry(&id).await.unwrap();
    assert!(db.get_entry_for_user(&user, &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_entries_filters() {
    require_emulator!();
    let db = common::test_db().await;
    let user = unique_user("lister");
    let prefix = user.replace('|', "-");

    let entries = [
        entry(
            &format!("{}-a", prefix),
            &user,
            day(2024, 3, 1),
            EntryStatus::Completed,
            Privacy::Private,
            Difficulty::Easy,
        ),
        entry(
            &format!("{}-b", prefix),
            &user,
            day(2024, 4, 1),
            EntryStatus::Draft,
            Privacy::Private,
            Difficulty::Hard,
        ),
        entry(
            &format!("{}-c", prefix),
            &user,
            day(2024, 5, 1),
            EntryStatus::Completed,
            Privacy::Private,
            Difficulty::Hard,
        ),
    ];
    for e in &entries {
        db.save_entry(e).await.unwrap();
    }
    let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();

    let all = db.list_entries(&user, None, None).await.unwrap();
    assert_eq!(all.len(), 3);
    // Newest first
    assert_eq!(all[0].id, ids[2]);
    assert_eq!(all[2].id, ids[0]);

    let drafts = db
        .list_entries(&user, Some(EntryStatus::Draft), None)
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, ids[1]);

    let hard_completed = db
        .list_entries(&user, Some(EntryStatus::Completed), Some(Difficulty::Hard))
        .await
        .unwrap();
    assert_eq!(hard_completed.len(), 1);
    assert_eq!(hard_completed[0].id, ids[2]);

    cleanup(&db, &ids).await;
}

#[tokio::test]
async fn test_completed_entries_date_range() {
    require_emulator!();
    let db = common::test_db().await;
    let user = unique_user("ranger");
    let prefix = user.replace('|', "-");

    let entries = [
        entry(
            &format!("{}-jan", prefix),
            &user,
            day(2024, 1, 15),
            EntryStatus::Completed,
            Privacy::Private,
            Difficulty::Moderate,
        ),
        entry(
            &format!("{}-feb", prefix),
            &user,
            day(2024, 2, 15),
            EntryStatus::Completed,
            Privacy::Private,
            Difficulty::Moderate,
        ),
        entry(
            &format!("{}-mar", prefix),
            &user,
            day(2024, 3, 15),
            EntryStatus::Completed,
            Privacy::Private,
            Difficulty::Moderate,
        ),
        entry(
            &format!("{}-draft", prefix),
            &user,
            day(2024, 2, 20),
            EntryStatus::Draft,
            Privacy::Private,
            Difficulty::Moderate,
        ),
    ];
    for e in &entries {
        db.save_entry(e).await.unwrap();
    }
    let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();

    let all = db.completed_entries(&user, None, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let window = db
        .completed_entries(
            &user,
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap()),
        )
        .await
        .unwrap();
    let got: Vec<&str> = window.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(got, vec![ids[2].as_str(), ids[1].as_str()]);

    cleanup(&db, &ids).await;
}

#[tokio::test]
async fn test_public_feed_excludes_private_and_drafts() {
    require_emulator!();
    let db = common::test_db().await;
    let user = unique_user("sharer");
    let prefix = user.replace('|', "-");

    // Far-future dates keep these at the head of the shared feed
    let entries = [
        entry(
            &format!("{}-public", prefix),
            &user,
            day(2099, 6, 1),
            EntryStatus::Completed,
            Privacy::Public,
            Difficulty::Easy,
        ),
        entry(
            &format!("{}-private", prefix),
            &user,
            day(2099, 6, 2),
            EntryStatus::Completed,
            Privacy::Private,
            Difficulty::Easy,
        ),
        entry(
            &format!("{}-draft", prefix),
            &user,
            day(2099, 6, 3),
            EntryStatus::Draft,
            Privacy::Public,
            Difficulty::Easy,
        ),
    ];
    for e in &entries {
        db.save_entry(e).await.unwrap();
    }
    let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();

    let feed = db.public_completed_entries(10).await.unwrap();
    assert!(feed.iter().any(|e| e.id == ids[0]));
    assert!(!feed.iter().any(|e| e.id == ids[1] || e.id == ids[2]));
    assert!(feed
        .iter()
        .all(|e| e.status == EntryStatus::Completed && e.privacy == Privacy::Public));

    cleanup(&db, &ids).await;
}

#[tokio::test]
async fn test_profile_created_on_first_use() {
    require_emulator!();
    let db = common::test_db().await;
    let user = unique_user("google-oauth2");
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    assert!(db.get_user_profile(&user).await.unwrap().is_none());

    let created = db.get_or_create_user_profile(&user, now).await.unwrap();
    assert_eq!(created.user_id, user);
    assert_eq!(created.preferences, Preferences::default());

    let updated = UserProfile {
        preferences: Preferences {
            units: Units::Imperial,
            default_privacy: Privacy::Public,
        },
        ..created.clone()
    };
    db.upsert_user_profile(&updated).await.unwrap();

    // A later call returns the stored profile, not a fresh default
    let later = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let fetched = db.get_or_create_user_profile(&user, later).await.unwrap();
    assert_eq!(fetched, updated);
    assert_eq!(fetched.created_at, now);
}
