use serde::{Deserialize, Serialize};

/// Only this many top stories are ever measured or rendered.
pub const MAX_TOP_STORIES: usize = 2;

/// A raw item from the news feed, before curation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub summary: String,
}

/// A headline with its summary paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub headline: String,
    pub summary: String,
}

impl Story {
    pub fn new(headline: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            summary: summary.into(),
        }
    }
}

/// The news section of one page: full-width top stories, a half-width
/// third story and a bulleted list of headline-only items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsBundle {
    #[serde(default)]
    pub top_stories: Vec<Story>,
    #[serde(default)]
    pub third_story: Option<Story>,
    #[serde(default)]
    pub headlines: Vec<String>,
}

impl NewsBundle {
    pub fn is_empty(&self) -> bool {
        self.top_stories.is_empty() && self.third_story.is_none() && self.headlines.is_empty()
    }

    /// The top stories that reach the page.
    pub fn visible_top_stories(&self) -> &[Story] {
        &self.top_stories[..self.top_stories.len().min(MAX_TOP_STORIES)]
    }
}
