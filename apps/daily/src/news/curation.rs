//! News curation: turns the raw feed into a `NewsBundle`.
//!
//! The LLM picks two top stories, a third story and a handful of headlines.
//! Any failure falls back to taking the feed in order.

use serde::Deserialize;
use tracing::{info, warn};

use crate::llm_client::LlmClient;
use crate::models::{Article, NewsBundle, Story};
use crate::news::prompts::{CURATION_PROMPT_TEMPLATE, CURATION_SYSTEM};

/// Number of headline-only items the raw fallback keeps.
const FALLBACK_HEADLINES: usize = 4;

#[derive(Debug, Deserialize)]
struct CuratedStory {
    #[serde(default)]
    headline: String,
    #[serde(default)]
    summary: String,
}

impl CuratedStory {
    fn into_story(self) -> Option<Story> {
        let headline = self.headline.trim();
        (!headline.is_empty()).then(|| Story::new(headline, self.summary.trim()))
    }
}

#[derive(Debug, Deserialize)]
struct CuratedResponse {
    #[serde(default)]
    top_stories: Vec<CuratedStory>,
    #[serde(default)]
    third_story: Option<CuratedStory>,
    #[serde(default)]
    headlines: Vec<String>,
}

impl From<CuratedResponse> for NewsBundle {
    fn from(response: CuratedResponse) -> Self {
        NewsBundle {
            top_stories: response
                .top_stories
                .into_iter()
                .filter_map(CuratedStory::into_story)
                .collect(),
            third_story: response.third_story.and_then(CuratedStory::into_story),
            headlines: response
                .headlines
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }
}

/// Curates `articles` with the LLM when one is configured.
pub async fn curate(articles: &[Article], llm: Option<&LlmClient>) -> NewsBundle {
    if articles.is_empty() {
        return NewsBundle::default();
    }

    let Some(llm) = llm else {
        warn!("No LLM configured, skipping AI curation");
        return fallback_bundle(articles);
    };

    let prompt = build_curation_prompt(articles);
    match llm.call_json::<CuratedResponse>(&prompt, CURATION_SYSTEM).await {
        Ok(response) => {
            let bundle = NewsBundle::from(response);
            if bundle.is_empty() {
                warn!("Curation returned no usable stories, using raw feed");
                return fallback_bundle(articles);
            }
            info!(
                top_stories = bundle.top_stories.len(),
                third_story = bundle.third_story.is_some(),
                headlines = bundle.headlines.len(),
                "News curated"
            );
            bundle
        }
        Err(e) => {
            warn!(error = %e, "Curation failed, using raw feed");
            fallback_bundle(articles)
        }
    }
}

/// First two articles become top stories, the third the third story, the
/// next four headlines.
pub fn fallback_bundle(articles: &[Article]) -> NewsBundle {
    let story = |a: &Article| Story::new(a.headline.as_str(), a.summary.as_str());
    NewsBundle {
        top_stories: articles.iter().take(2).map(story).collect(),
        third_story: articles.get(2).map(story),
        headlines: articles
            .iter()
            .skip(3)
            .take(FALLBACK_HEADLINES)
            .map(|a| a.headline.clone())
            .collect(),
    }
}

pub(crate) fn build_curation_prompt(articles: &[Article]) -> String {
    let formatted = articles
        .iter()
        .map(|a| format!("HEADLINE: {}\nORIGINAL SUMMARY: {}", a.headline, a.summary))
        .collect::<Vec<_>>()
        .join("\n\n");
    CURATION_PROMPT_TEMPLATE.replace("{articles}", &formatted)
}
