use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::NewsBundle;

/// Current conditions and today's range, already rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub condition: String,
    pub high: f64,
    pub low: f64,
    /// `HH:MM` local time.
    pub sunrise: String,
    pub sunset: String,
    pub feels_like: Option<f64>,
}

/// A saved reading highlight used as the day's quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub text: String,
    pub reference: String,
}

/// Everything one page is rendered from. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyContent {
    pub date: NaiveDate,
    pub location_name: String,
    pub weather: Option<WeatherSnapshot>,
    pub news: NewsBundle,
    /// `None` on weekends. All-empty entries mean the plan has run out.
    pub readings: Option<Vec<String>>,
    pub verse: Option<Verse>,
    pub highlight: Option<Highlight>,
}
