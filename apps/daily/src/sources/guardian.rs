//! Latest articles from the Guardian Open Platform.

use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::FetchError;
use crate::models::Article;
use crate::sources::http::{build_client, get_json};

const SEARCH_URL: &str = "https://content.guardianapis.com/search";
const SECTIONS: &str = "uk-news|politics|world|technology|science|business|environment";
const TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_COUNT: u32 = 15;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "webTitle", default)]
    web_title: String,
    #[serde(default)]
    fields: ResultFields,
}

#[derive(Debug, Default, Deserialize)]
struct ResultFields {
    #[serde(rename = "trailText", default)]
    trail_text: String,
}

/// Strips tags and decodes entities from a trail text fragment.
pub fn clean_html(fragment: &str) -> String {
    if fragment.is_empty() {
        return String::new();
    }
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn to_articles(envelope: SearchEnvelope) -> Vec<Article> {
    envelope
        .response
        .results
        .into_iter()
        .filter(|r| !r.web_title.trim().is_empty())
        .map(|r| Article {
            headline: r.web_title.trim().to_string(),
            summary: clean_html(&r.fields.trail_text),
        })
        .collect()
}

pub struct GuardianClient {
    client: Client,
    api_key: Option<String>,
}

impl GuardianClient {
    pub fn new(api_key: Option<String>) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(TIMEOUT)?,
            api_key,
        })
    }

    /// Newest `count` articles; empty on a missing key or any failure.
    pub async fn fetch(&self, count: u32) -> Vec<Article> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("GUARDIAN_API_KEY not set, skipping news");
            return Vec::new();
        };

        match self.try_fetch(api_key, count).await {
            Ok(articles) => {
                info!(count = articles.len(), "Guardian articles fetched");
                articles
            }
            Err(e) => {
                warn!(error = %e, "Guardian news fetch failed");
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, api_key: &str, count: u32) -> Result<Vec<Article>, FetchError> {
        let page_size = count.to_string();
        let query = [
            ("section", SECTIONS),
            ("show-fields", "trailText"),
            ("page-size", page_size.as_str()),
            ("order-by", "newest"),
            ("api-key", api_key),
        ];

        let envelope: SearchEnvelope =
            get_json("guardian", || self.client.get(SEARCH_URL).query(&query)).await?;
        Ok(to_articles(envelope))
    }
}
