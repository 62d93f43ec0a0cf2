use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Where the weather is fetched for and what the header prints.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Application configuration loaded from environment variables.
///
/// Built once in `main` and handed to each collaborator at construction time.
/// Every credential is optional: a missing key disables that feed instead of
/// failing the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub claude_model: String,
    pub guardian_api_key: Option<String>,
    pub readwise_token: Option<String>,
    pub location: Location,
    /// Directory holding the Montserrat TTF files. Built-in fonts are used when unset.
    pub fonts_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            claude_model: optional_env("CLAUDE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            guardian_api_key: optional_env("GUARDIAN_API_KEY"),
            readwise_token: optional_env("READWISE_TOKEN"),
            location: Location {
                name: optional_env("LOCATION_NAME")
                    .unwrap_or_else(|| "Witney, Oxfordshire".to_string()),
                latitude: parse_env("LOCATION_LAT", 51.7856)?,
                longitude: parse_env("LOCATION_LON", -1.4857)?,
                timezone: optional_env("LOCATION_TIMEZONE")
                    .unwrap_or_else(|| "Europe/London".to_string()),
            },
            fonts_dir: optional_env("FONTS_DIR").map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating empty values the same as unset ones.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env(key: &str, default: f64) -> Result<f64> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Environment variable '{key}' must be a number, got '{raw}'")),
        None => Ok(default),
    }
}
