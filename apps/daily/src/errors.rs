use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Everything that can abort a daily run funnels through here; `main` maps it
/// to a non-zero exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors surfaced by the page layout core.
///
/// Only typography problems are fatal; missing content is rendered as a
/// placeholder and residual overflow is logged, never returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No fonts could be loaded from {dir}. Expected: {expected}")]
    FontsUnavailable { dir: PathBuf, expected: String },

    #[error("Font file {path} could not be read: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font file {path} could not be parsed: {reason}")]
    FontParse { path: PathBuf, reason: String },

    #[error("Render worker failed: {0}")]
    Worker(String),
}

/// Errors raised by the HTTP content fetchers.
///
/// These never reach the layout core: every fetcher logs and maps them to
/// an absent value before returning.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {service}")]
    Status { service: &'static str, status: u16 },
}
