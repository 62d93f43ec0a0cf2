mod cli;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod news;
mod output;
mod sources;

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{CliArgs, USAGE};
use crate::config::Config;
use crate::errors::AppError;
use crate::layout::{generate_pdf, FontRegistry};
use crate::llm_client::LlmClient;
use crate::models::DailyContent;
use crate::news::curation::fallback_bundle;
use crate::news::{curate, LlmShortener, NoShortener, Shortener};
use crate::output::{deliver, OutputTarget};
use crate::sources::guardian::DEFAULT_COUNT;
use crate::sources::{readings_for, verse_for, GuardianClient, ReadwiseClient, WeatherClient};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match CliArgs::from_env() {
        Ok(args) if args.help => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(config, args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Daily print failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, args: CliArgs) -> Result<(), AppError> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    info!(
        date = %date.format("%A %-d %B %Y"),
        version = env!("CARGO_PKG_VERSION"),
        "Generating daily print"
    );

    let fonts = Arc::new(FontRegistry::load(config.fonts_dir.as_deref())?);

    let llm = if args.no_ai {
        None
    } else {
        match config.anthropic_api_key.clone() {
            Some(key) => Some(LlmClient::new(key, config.claude_model.clone())?),
            None => {
                warn!("ANTHROPIC_API_KEY not set, AI curation and shortening disabled");
                None
            }
        }
    };

    let content = gather_content(&config, date, llm.as_ref()).await?;

    let shortener: Box<dyn Shortener> = match llm {
        Some(llm) => {
            info!(model = %llm.model(), "Summary shortening enabled");
            Box::new(LlmShortener::new(llm))
        }
        None => Box::new(NoShortener),
    };

    let pdf = generate_pdf(content, fonts, shortener.as_ref()).await?;
    deliver(&pdf, &OutputTarget::from_args(&args)).await?;

    info!("Done");
    Ok(())
}

/// Fetches every feed concurrently and assembles the page content.
async fn gather_content(
    config: &Config,
    date: NaiveDate,
    llm: Option<&LlmClient>,
) -> Result<DailyContent, AppError> {
    let weather = WeatherClient::new(config.location.clone())?;
    let guardian = GuardianClient::new(config.guardian_api_key.clone())?;
    let readwise = ReadwiseClient::new(config.readwise_token.clone())?;

    let (weather, articles, highlight) = tokio::join!(
        weather.fetch(),
        guardian.fetch(DEFAULT_COUNT),
        readwise.fetch_random(),
    );
    let readings = readings_for(date);
    let verse = verse_for(date);

    let news = match llm {
        Some(llm) if !articles.is_empty() => curate(&articles, Some(llm)).await,
        _ => fallback_bundle(&articles),
    };

    info!(
        weather = %weather
            .as_ref()
            .map(|w| format!("{}°C, {}", w.temperature, w.condition))
            .unwrap_or_else(|| "unavailable".to_string()),
        articles = articles.len(),
        top_stories = news.top_stories.len(),
        third_story = news.third_story.is_some(),
        headlines = news.headlines.len(),
        readings = %describe_readings(readings.as_deref()),
        verse = %verse.reference,
        highlight = highlight.as_ref().map(|h| h.title.as_str()).unwrap_or("none"),
        "Content gathered"
    );

    Ok(DailyContent {
        date,
        location_name: config.location.name.clone(),
        weather,
        news,
        readings,
        verse: Some(verse),
        highlight,
    })
}

fn describe_readings(readings: Option<&[String]>) -> String {
    match readings {
        None => "none (weekend)".to_string(),
        Some(list) => {
            let valid: Vec<&str> = list
                .iter()
                .map(String::as_str)
                .filter(|r| !r.is_empty())
                .collect();
            if valid.is_empty() {
                "end of reading plan".to_string()
            } else {
                valid.join(", ")
            }
        }
    }
}
