//! Current conditions from Open-Meteo (no key required).

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Location;
use crate::errors::FetchError;
use crate::models::WeatherSnapshot;
use crate::sources::http::{build_client, get_json};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const TIMEOUT: Duration = Duration::from_secs(10);

/// WMO weather interpretation codes.
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: CurrentBlock,
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    weather_code: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    sunrise: Vec<String>,
    #[serde(default)]
    sunset: Vec<String>,
}

impl From<ForecastResponse> for WeatherSnapshot {
    fn from(response: ForecastResponse) -> Self {
        let ForecastResponse { current, daily } = response;
        let first = |values: &[f64]| values.first().copied().unwrap_or(0.0).round_ties_even();
        let clock = |values: &[String]| values.first().map(|s| clock_time(s)).unwrap_or_default();

        WeatherSnapshot {
            temperature: current.temperature_2m.unwrap_or(0.0).round_ties_even(),
            condition: describe_weather_code(current.weather_code.unwrap_or(0)).to_string(),
            high: first(&daily.temperature_2m_max),
            low: first(&daily.temperature_2m_min),
            sunrise: clock(&daily.sunrise),
            sunset: clock(&daily.sunset),
            feels_like: current
                .apparent_temperature
                .filter(|t| *t != 0.0)
                .map(f64::round_ties_even),
        }
    }
}

/// `2025-12-30T08:12` → `08:12`. Unparseable input gives an empty string.
fn clock_time(iso: &str) -> String {
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

pub struct WeatherClient {
    client: Client,
    location: Location,
}

impl WeatherClient {
    pub fn new(location: Location) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(TIMEOUT)?,
            location,
        })
    }

    /// Today's weather, or `None` if Open-Meteo could not be reached.
    pub async fn fetch(&self) -> Option<WeatherSnapshot> {
        match self.try_fetch().await {
            Ok(snapshot) => {
                info!(
                    temperature = snapshot.temperature,
                    condition = %snapshot.condition,
                    "Weather fetched"
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!(error = %e, location = %self.location.name, "Weather fetch failed");
                None
            }
        }
    }

    async fn try_fetch(&self) -> Result<WeatherSnapshot, FetchError> {
        let query = [
            ("latitude", self.location.latitude.to_string()),
            ("longitude", self.location.longitude.to_string()),
            (
                "current",
                "temperature_2m,apparent_temperature,weather_code".to_string(),
            ),
            (
                "daily",
                "temperature_2m_max,temperature_2m_min,sunrise,sunset".to_string(),
            ),
            ("timezone", self.location.timezone.clone()),
            ("forecast_days", "1".to_string()),
        ];

        let response: ForecastResponse =
            get_json("open-meteo", || self.client.get(FORECAST_URL).query(&query)).await?;
        Ok(response.into())
    }
}
