//! The shortening capability the content fitter depends on.
//!
//! The content fitter only sees `dyn Shortener`. The LLM-backed implementation
//! owns its client and credentials; `NoShortener` is used when AI is disabled.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::llm_client::prompts::FACTUAL_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::news::prompts::{SHORTEN_PROMPT_TEMPLATE, SHORTEN_SYSTEM};

/// Rewrites a story summary to a target number of sentences.
///
/// `None` means the capability could not help; the caller keeps the original text.
#[async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, headline: &str, summary: &str, target_sentences: u8)
        -> Option<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// NoShortener
// ────────────────────────────────────────────────────────────────────────────

/// Always declines. Fitting then falls through to dropping and truncation.
pub struct NoShortener;

#[async_trait]
impl Shortener for NoShortener {
    async fn shorten(&self, _: &str, _: &str, _: u8) -> Option<String> {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmShortener
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ShortenedSummary {
    summary: String,
}

pub struct LlmShortener {
    llm: LlmClient,
}

impl LlmShortener {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Shortener for LlmShortener {
    async fn shorten(
        &self,
        headline: &str,
        summary: &str,
        target_sentences: u8,
    ) -> Option<String> {
        let prompt = build_shorten_prompt(headline, summary, target_sentences);
        match self
            .llm
            .call_json::<ShortenedSummary>(&prompt, SHORTEN_SYSTEM)
            .await
        {
            Ok(result) => {
                let shorter = result.summary.trim();
                if shorter.is_empty() {
                    warn!(headline = %headline, "Shortening returned an empty summary");
                    None
                } else {
                    debug!(
                        target_sentences,
                        before = summary.len(),
                        after = shorter.len(),
                        "Summary shortened"
                    );
                    Some(shorter.to_string())
                }
            }
            Err(e) => {
                warn!(headline = %headline, error = %e, "Shortening call failed");
                None
            }
        }
    }
}

pub(crate) fn build_shorten_prompt(headline: &str, summary: &str, target_sentences: u8) -> String {
    SHORTEN_PROMPT_TEMPLATE
        .replace("{headline}", headline)
        .replace("{summary}", summary)
        .replace("{target_sentences}", &target_sentences.to_string())
        .replace("{factual}", FACTUAL_INSTRUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_shortener_always_declines() {
        let result = NoShortener.shorten("Headline", "One. Two. Three.", 1).await;
        assert!(result.is_none());
    }

    #[test]
    fn test_shorten_prompt_fills_placeholders() {
        let prompt = build_shorten_prompt("Floods hit north", "Long summary here.", 2);
        assert!(prompt.contains("HEADLINE: Floods hit north"));
        assert!(prompt.contains("CURRENT SUMMARY: Long summary here."));
        assert!(prompt.contains("exactly 2 complete sentence(s)"));
        assert!(!prompt.contains("{headline}"));
        assert!(!prompt.contains("{factual}"));
    }
}
