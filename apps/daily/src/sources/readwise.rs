//! A random saved highlight from the Readwise export API.
//!
//! Starts from a random page so that repeated runs spread over the whole
//! library instead of always drawing from the newest books.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::FetchError;
use crate::models::Highlight;
use crate::sources::http::{build_client, get_json};

const EXPORT_URL: &str = "https://readwise.io/api/v2/export/";
const TIMEOUT: Duration = Duration::from_secs(15);

/// Highlights of this many characters or fewer are skipped.
pub const MIN_HIGHLIGHT_LENGTH: usize = 20;
/// Pages collected per run once the start page is reached.
pub const MAX_PAGES: u32 = 5;
/// Upper bound of the random start page.
pub const MAX_START_PAGE: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ExportPage {
    #[serde(default)]
    results: Vec<ExportBook>,
    #[serde(rename = "nextPageCursor", default)]
    next_page_cursor: Value,
}

impl ExportPage {
    /// The cursor arrives as a string or a bare number depending on account age.
    fn next_cursor(&self) -> Option<String> {
        match &self.next_page_cursor {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExportBook {
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    highlights: Vec<ExportHighlight>,
}

#[derive(Debug, Deserialize)]
struct ExportHighlight {
    #[serde(default)]
    text: String,
}

/// Flattens a page of books into highlights long enough to quote.
fn collect_highlights(books: &[ExportBook]) -> Vec<Highlight> {
    books
        .iter()
        .flat_map(|book| {
            let title = book.title.clone().unwrap_or_else(|| "Unknown".to_string());
            let author = book.author.clone().unwrap_or_else(|| "Unknown".to_string());
            book.highlights
                .iter()
                .filter(|h| h.text.chars().count() > MIN_HIGHLIGHT_LENGTH)
                .map(move |h| Highlight {
                    text: h.text.clone(),
                    title: title.clone(),
                    author: author.clone(),
                })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

pub struct ReadwiseClient {
    client: Client,
    token: Option<String>,
}

impl ReadwiseClient {
    pub fn new(token: Option<String>) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(TIMEOUT)?,
            token,
        })
    }

    /// One randomly chosen highlight, or `None` without a token, on failure,
    /// or when nothing long enough was found.
    pub async fn fetch_random(&self) -> Option<Highlight> {
        let Some(token) = self.token.as_deref() else {
            debug!("READWISE_TOKEN not set, skipping highlight");
            return None;
        };

        match self.try_fetch_random(token).await {
            Ok(Some(highlight)) => {
                info!(title = %highlight.title, author = %highlight.author, "Readwise highlight selected");
                Some(highlight)
            }
            Ok(None) => {
                info!("Readwise returned no usable highlights");
                None
            }
            Err(e) => {
                warn!(error = %e, "Readwise fetch failed");
                None
            }
        }
    }

    async fn try_fetch_random(&self, token: &str) -> Result<Option<Highlight>, FetchError> {
        let start_page = rand::thread_rng().gen_range(1..=MAX_START_PAGE);
        debug!(start_page, "Readwise start page chosen");

        let mut cursor = match self.skip_pages(token, start_page).await {
            Ok(cursor) => cursor,
            Err(e) => {
                debug!(error = %e, "Skipping Readwise pages failed, starting from page 1");
                None
            }
        };

        let mut highlights = Vec::new();
        for _ in 0..MAX_PAGES {
            let page = self.export_page(token, cursor.as_deref()).await?;
            highlights.extend(collect_highlights(&page.results));
            cursor = page.next_cursor();
            if cursor.is_none() {
                break;
            }
        }

        debug!(candidates = highlights.len(), "Readwise highlights collected");
        let chosen = highlights.choose(&mut rand::thread_rng()).cloned();
        Ok(chosen)
    }

    /// Follows the cursor chain to `start_page`. Running out of pages on the
    /// way restarts from the first page.
    async fn skip_pages(&self, token: &str, start_page: u32) -> Result<Option<String>, FetchError> {
        let mut cursor: Option<String> = None;
        for _ in 1..start_page {
            let page = self.export_page(token, cursor.as_deref()).await?;
            cursor = page.next_cursor();
            if cursor.is_none() {
                return Ok(None);
            }
        }
        Ok(cursor)
    }

    async fn export_page(&self, token: &str, cursor: Option<&str>) -> Result<ExportPage, FetchError> {
        let auth = format!("Token {token}");
        get_json("readwise", || {
            let request = self.client.get(EXPORT_URL).header("Authorization", &auth);
            match cursor {
                Some(c) => request.query(&[("pageCursor", c)]),
                None => request,
            }
        })
        .await
    }
}
