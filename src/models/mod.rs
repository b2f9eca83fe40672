// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Data models for the application.

pub mod activity;
pub mod entry;
pub mod summary;
pub mod trail;
pub mod user;

pub use activity::{Activity, ActivityInput};
pub use entry::{
    Coordinates, Difficulty, EntryInput, EntryStatus, JournalEntry, Location, Photo, Privacy,
    Trail, TrailType, Weather,
};
pub use summary::Summary;
pub use trail::{TrailInfo, WeatherReport};
pub use user::{Preferences, UserProfile};
