// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Services module - business logic layer.

pub mod activity;
pub mod media;
pub mod summary;
pub mod trails;
pub mod weather;

pub use activity::to_activity;
pub use media::MediaService;
pub use summary::{summarize, totals, DateRange, Period, SummaryWindow};
pub use trails::{StaticTrailCatalog, TrailCatalog};
pub use weather::{FixedWeather, OpenMeteoWeather, WeatherProvider};
