// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Weather lookup for trail locations.
//!
//! `OpenMeteoWeather` queries the Open-Meteo forecast API (no key required);
//! `FixedWeather` returns a constant report for tests and offline development.

use futures_util::future::BoxFuture;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::trail::{CurrentWeather, ForecastDay, WeatherAlert};
use crate::models::WeatherReport;

const FORECAST_DAYS: usize = 3;
/// Locations at or above this elevation (meters) get a mountain-weather alert.
const HIGH_ELEVATION_METERS: f64 = 2400.0;
const METERS_PER_MILE: f64 = 1609.344;

/// Source of current conditions and a short forecast.
pub trait WeatherProvider: Send + Sync {
    fn report<'a>(
        &'a self,
        lat: f64,
        lon: f64,
        location: Option<&'a str>,
    ) -> BoxFuture<'a, Result<WeatherReport>>;
}

/// Open-Meteo HTTP client.
#[derive(Clone)]
pub struct OpenMeteoWeather {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoWeather {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, lat: f64, lon: f64, location: Option<&str>) -> Result<WeatherReport> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,uv_index,visibility".to_string(),
                ),
                (
                    "daily",
                    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,wind_speed_10m_max".to_string(),
                ),
                ("temperature_unit", "fahrenheit".to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Weather HTTP {}: {}", status, body)));
        }

        let forecast: OpenMeteoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather JSON parse error: {}", e)))?;

        tracing::debug!(lat, lon, location = ?location, "Weather fetched");
        Ok(forecast.into_report())
    }
}

impl WeatherProvider for OpenMeteoWeather {
    fn report<'a>(
        &'a self,
        lat: f64,
        lon: f64,
        location: Option<&'a str>,
    ) -> BoxFuture<'a, Result<WeatherReport>> {
        Box::pin(self.fetch(lat, lon, location))
    }
}

/// Provider that always returns the same report.
#[derive(Debug, Clone)]
pub struct FixedWeather {
    report: WeatherReport,
}

impl FixedWeather {
    pub fn new(report: WeatherReport) -> Self {
        Self { report }
    }
}

impl Default for FixedWeather {
    fn default() -> Self {
        let day = |date: &str, high: f64, low: f64| ForecastDay {
            date: date.to_string(),
            high,
            low,
            conditions: "Partly Cloudy".to_string(),
            precipitation: 10.0,
            wind_speed: 8.0,
        };
        Self::new(WeatherReport {
            current: CurrentWeather {
                temperature: 65.0,
                conditions: "Clear".to_string(),
                wind_speed: 6.0,
                humidity: 45.0,
                feels_like: 64.0,
                uv_index: 5.0,
                visibility: 10.0,
            },
            forecast: vec![
                day("2024-06-01", 72.0, 50.0),
                day("2024-06-02", 70.0, 49.0),
                day("2024-06-03", 68.0, 48.0),
            ],
            alerts: vec![],
        })
    }
}

impl WeatherProvider for FixedWeather {
    fn report<'a>(
        &'a self,
        _lat: f64,
        _lon: f64,
        _location: Option<&'a str>,
    ) -> BoxFuture<'a, Result<WeatherReport>> {
        let report = self.report.clone();
        Box::pin(async move { Ok(report) })
    }
}

// ─── Open-Meteo wire format ─────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    elevation: Option<f64>,
    current: OpenMeteoCurrent,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: u8,
    wind_speed_10m: f64,
    #[serde(default)]
    uv_index: Option<f64>,
    /// meters
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<String>,
    weather_code: Vec<u8>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
    wind_speed_10m_max: Vec<f64>,
}

impl OpenMeteoResponse {
    fn into_report(self) -> WeatherReport {
        let current = CurrentWeather {
            temperature: self.current.temperature_2m,
            conditions: describe_weather_code(self.current.weather_code).to_string(),
            wind_speed: self.current.wind_speed_10m,
            humidity: self.current.relative_humidity_2m,
            feels_like: self.current.apparent_temperature,
            uv_index: self.current.uv_index.unwrap_or(0.0),
            visibility: self.current.visibility.unwrap_or(0.0) / METERS_PER_MILE,
        };

        let daily = &self.daily;
        let forecast = daily
            .time
            .iter()
            .enumerate()
            .take(FORECAST_DAYS)
            .map(|(i, date)| ForecastDay {
                date: date.clone(),
                high: daily.temperature_2m_max.get(i).copied().unwrap_or(0.0),
                low: daily.temperature_2m_min.get(i).copied().unwrap_or(0.0),
                conditions: daily
                    .weather_code
                    .get(i)
                    .map_or("Unknown", |c| describe_weather_code(*c))
                    .to_string(),
                precipitation: daily
                    .precipitation_probability_max
                    .get(i)
                    .copied()
                    .flatten()
                    .unwrap_or(0.0),
                wind_speed: daily.wind_speed_10m_max.get(i).copied().unwrap_or(0.0),
            })
            .collect();

        WeatherReport {
            current,
            forecast,
            alerts: elevation_alerts(self.elevation),
        }
    }
}

fn elevation_alerts(elevation: Option<f64>) -> Vec<WeatherAlert> {
    match elevation {
        Some(meters) if meters >= HIGH_ELEVATION_METERS => vec![WeatherAlert {
            alert_type: "Weather Alert".to_string(),
            title: "High Elevation Weather Warning".to_string(),
            description:
                "Be prepared for rapidly changing weather conditions at high elevations."
                    .to_string(),
            severity: "moderate".to_string(),
        }],
        _ => vec![],
    }
}

/// Map a WMO weather interpretation code to a short label.
pub fn describe_weather_code(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mostly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 | 80..=82 => "Rain",
        71..=77 | 85 | 86 => "Snow",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_weather_code() {
        assert_eq!(describe_weather_code(0), "Clear");
        assert_eq!(describe_weather_code(63), "Rain");
        assert_eq!(describe_weather_code(86), "Snow");
        assert_eq!(describe_weather_code(96), "Thunderstorm");
        assert_eq!(describe_weather_code(200), "Unknown");
    }

    #[test]
    fn test_open_meteo_response_mapping() {
        let raw = serde_json::json!({
            "elevation": 2805.0,
            "current": {
                "temperature_2m": 48.5,
                "relative_humidity_2m": 60,
                "apparent_temperature": 44.0,
                "weather_code": 2,
                "wind_speed_10m": 12.0,
                "uv_index": 3.5,
                "visibility": 16093.44
            },
            "daily": {
                "time": ["2024-06-01", "2024-06-02", "2024-06-03"],
                "weather_code": [3, 61, 95],
                "temperature_2m_max": [60.0, 55.0, 58.0],
                "temperature_2m_min": [35.0, 33.0, 36.0],
                "precipitation_probability_max": [10, null, 80],
                "wind_speed_10m_max": [15.0, 20.0, 25.0]
            }
        });

        let report = serde_json::from_value::<OpenMeteoResponse>(raw)
            .unwrap()
            .into_report();

        assert_eq!(report.current.conditions, "Partly Cloudy");
        assert!((report.current.visibility - 10.0).abs() < 1e-9);
        assert_eq!(report.forecast.len(), 3);
        assert_eq!(report.forecast[1].conditions, "Rain");
        assert_eq!(report.forecast[1].precipitation, 0.0);
        assert_eq!(report.forecast[2].precipitation, 80.0);
        assert_eq!(report.alerts.len(), 1);
    }

    #[test]
    fn test_low_elevation_has_no_alerts() {
        assert!(elevation_alerts(Some(120.0)).is_empty());
        assert!(elevation_alerts(None).is_empty());
    }

    #[tokio::test]
    async fn test_fixed_weather_ignores_coordinates() {
        let provider = FixedWeather::default();
        let a = provider.report(0.0, 0.0, None).await.unwrap();
        let b = provider.report(45.0, -120.0, Some("Bend")).await.unwrap();
        assert_eq!(a, b);
    }
}
