//! Content fitter: makes the news bundle fit the vertical space left between
//! the header and the quotation zone.
//!
//! # Strategy
//! 1. Measure. Already fits → return unchanged, no shortening calls.
//! 2. Shorten one story at a time, re-measuring after each attempt:
//!    third story (1 or 2 sentences), second top story (3), first top story (4).
//! 3. Drop headlines from the end.
//! 4. Truncate the third story's summary to 200 characters.
//!
//! Residual overflow is logged and the page is still produced.

use tracing::{debug, info, warn};

use crate::layout::font_metrics::{FontDescriptor, FontFamily, FontRegistry};
use crate::layout::measure::{truncate_text, TextMeasurer, MM};
use crate::models::{NewsBundle, Story};
use crate::news::shortener::Shortener;

// ────────────────────────────────────────────────────────────────────────────
// News typography and spacing (shared with the page composer)
// ────────────────────────────────────────────────────────────────────────────

pub const TOP_HEADLINE_FONT: FontDescriptor = FontDescriptor::new(FontFamily::SemiBold, 11.0);
pub const THIRD_HEADLINE_FONT: FontDescriptor = FontDescriptor::new(FontFamily::SemiBold, 10.0);
pub const SUMMARY_FONT: FontDescriptor = FontDescriptor::new(FontFamily::Medium, 8.0);
pub const BRIEF_FONT: FontDescriptor = FontDescriptor::new(FontFamily::Medium, 8.0);

/// "THE GUARDIAN" label plus the gap below it.
pub const NEWS_LABEL_HEIGHT: f32 = 8.0 * MM;
pub const TOP_HEADLINE_GAP: f32 = 5.0 * MM;
pub const TOP_STORY_GAP: f32 = 8.0 * MM;
pub const THIRD_HEADLINE_GAP: f32 = 4.0 * MM;
/// "IN BRIEF" label plus the gap below it.
pub const BRIEF_LABEL_HEIGHT: f32 = 5.0 * MM;
pub const BRIEF_ITEM_GAP: f32 = 4.0 * MM;
/// Space reserved on the left of each brief for its bullet.
pub const BULLET_INDENT: f32 = 3.0 * MM;
pub const COLUMN_GUTTER: f32 = 8.0 * MM;

/// Overflow above which the third story goes straight to one sentence.
const LARGE_OVERFLOW_MM: f32 = 20.0;
const THIRD_STORY_TRUNCATE_CHARS: usize = 200;

pub fn column_width(content_width: f32) -> f32 {
    (content_width - COLUMN_GUTTER) / 2.0
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

/// Heights of each part of the news section, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsHeights {
    pub header: f32,
    pub top_stories: Vec<f32>,
    pub third_story: f32,
    pub headlines: f32,
    pub total: f32,
}

/// Measures the news section exactly as the composer will lay it out.
pub fn measure_news_height(
    news: &NewsBundle,
    content_width: f32,
    measurer: TextMeasurer<'_>,
) -> NewsHeights {
    let col_width = column_width(content_width);

    let top_stories: Vec<f32> = news
        .visible_top_stories()
        .iter()
        .map(|story| {
            measurer.measure_height(&story.headline, TOP_HEADLINE_FONT, content_width)
                + TOP_HEADLINE_GAP
                + measurer.measure_height(&story.summary, SUMMARY_FONT, content_width)
                + TOP_STORY_GAP
        })
        .collect();

    let third_story = news.third_story.as_ref().map_or(0.0, |story| {
        measurer.measure_height(&story.headline, THIRD_HEADLINE_FONT, col_width)
            + THIRD_HEADLINE_GAP
            + measurer.measure_height(&story.summary, SUMMARY_FONT, col_width)
    });

    let headlines = if news.headlines.is_empty() {
        0.0
    } else {
        BRIEF_LABEL_HEIGHT
            + news
                .headlines
                .iter()
                .map(|h| measurer.measure_height(h, BRIEF_FONT, col_width - BULLET_INDENT) + BRIEF_ITEM_GAP)
                .sum::<f32>()
    };

    let total = NEWS_LABEL_HEIGHT + top_stories.iter().sum::<f32>() + third_story.max(headlines);

    NewsHeights {
        header: NEWS_LABEL_HEIGHT,
        top_stories,
        third_story,
        headlines,
        total,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fitting
// ────────────────────────────────────────────────────────────────────────────

/// The adjusted bundle plus a record of what was done to it.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub bundle: NewsBundle,
    /// Final measured height in points.
    pub measured_height: f32,
    pub shortening_calls: u32,
    pub headlines_dropped: usize,
    pub truncated: bool,
    pub fits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorySlot {
    Third,
    Top(usize),
}

impl StorySlot {
    fn label(self) -> &'static str {
        match self {
            StorySlot::Third => "third story",
            StorySlot::Top(0) => "first top story",
            StorySlot::Top(_) => "second top story",
        }
    }

    fn get(self, news: &NewsBundle) -> Option<&Story> {
        match self {
            StorySlot::Third => news.third_story.as_ref(),
            StorySlot::Top(i) => news.top_stories.get(i),
        }
    }

    fn get_mut(self, news: &mut NewsBundle) -> Option<&mut Story> {
        match self {
            StorySlot::Third => news.third_story.as_mut(),
            StorySlot::Top(i) => news.top_stories.get_mut(i),
        }
    }
}

/// Which stories to shorten, in order, and to how many sentences.
fn shortening_plan(news: &NewsBundle, overflow_mm: f32) -> Vec<(StorySlot, u8)> {
    let mut plan = Vec::with_capacity(3);
    if news.third_story.is_some() {
        let target = if overflow_mm > LARGE_OVERFLOW_MM { 1 } else { 2 };
        plan.push((StorySlot::Third, target));
    }
    if news.top_stories.len() > 1 {
        plan.push((StorySlot::Top(1), 3));
    }
    if !news.top_stories.is_empty() {
        plan.push((StorySlot::Top(0), 4));
    }
    plan
}

/// Adjusts `news` to fit within `available_height` points.
///
/// The input is never mutated; the returned bundle keeps story order and
/// never loses a top story or the third story's headline.
pub async fn fit_news_to_space(
    news: &NewsBundle,
    available_height: f32,
    content_width: f32,
    fonts: &FontRegistry,
    shortener: &dyn Shortener,
) -> FitOutcome {
    let measurer = TextMeasurer::new(fonts);
    let mut adjusted = news.clone();
    let outcome = |bundle: NewsBundle, total: f32, calls: u32, dropped: usize, truncated: bool| FitOutcome {
        bundle,
        measured_height: total,
        shortening_calls: calls,
        headlines_dropped: dropped,
        truncated,
        fits: total <= available_height,
    };

    if news.is_empty() {
        return outcome(adjusted, 0.0, 0, 0, false);
    }

    let mut total = measure_news_height(&adjusted, content_width, measurer).total;

    if total <= available_height {
        debug!(
            needed_mm = total / MM,
            available_mm = available_height / MM,
            "News fits"
        );
        return outcome(adjusted, total, 0, 0, false);
    }

    let overflow_mm = (total - available_height) / MM;
    info!(
        needed_mm = total / MM,
        available_mm = available_height / MM,
        overflow_mm,
        "News overflow"
    );

    // Shorten, one story per attempt.
    let mut calls = 0u32;
    for (slot, target_sentences) in shortening_plan(&adjusted, overflow_mm) {
        let Some(story) = slot.get(&adjusted).cloned() else {
            continue;
        };

        info!(story = slot.label(), target_sentences, "Asking to shorten story");
        calls += 1;
        if let Some(shorter) = shortener
            .shorten(&story.headline, &story.summary, target_sentences)
            .await
        {
            if let Some(entry) = slot.get_mut(&mut adjusted) {
                entry.summary = shorter;
            }
        }

        total = measure_news_height(&adjusted, content_width, measurer).total;
        if total <= available_height {
            info!(story = slot.label(), needed_mm = total / MM, "News fits after shortening");
            return outcome(adjusted, total, calls, 0, false);
        }
    }

    // Drop headlines from the end.
    let mut dropped = 0usize;
    while total > available_height {
        let Some(headline) = adjusted.headlines.pop() else {
            break;
        };
        dropped += 1;
        info!(headline = %truncate_text(&headline, 50), "Dropping headline");
        total = measure_news_height(&adjusted, content_width, measurer).total;
    }

    if total <= available_height {
        info!(dropped, needed_mm = total / MM, "News fits after dropping headlines");
        return outcome(adjusted, total, calls, dropped, false);
    }

    // Terminal fallback.
    let mut truncated = false;
    if let Some(third) = adjusted.third_story.as_mut() {
        let summary = truncate_text(&third.summary, THIRD_STORY_TRUNCATE_CHARS);
        if summary != third.summary {
            warn!(
                before = third.summary.chars().count(),
                after = summary.chars().count(),
                "Fallback: truncating third story summary"
            );
            third.summary = summary;
            truncated = true;
            total = measure_news_height(&adjusted, content_width, measurer).total;
        }
    }

    if total > available_height {
        warn!(
            needed_mm = total / MM,
            available_mm = available_height / MM,
            "News still overflows after all adjustments"
        );
    }

    outcome(adjusted, total, calls, dropped, truncated)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::layout::canvas::A4_WIDTH;
    use crate::layout::measure::CM;
    use crate::news::shortener::NoShortener;

    const CONTENT_WIDTH: f32 = A4_WIDTH - 4.0 * CM;

    const WORDS: &[&str] = &[
        "ministers", "said", "the", "plan", "would", "cut", "emissions", "across", "the",
        "country", "while", "protecting", "jobs", "in", "coastal", "towns", "and", "rural",
        "areas", "where", "investment", "has", "lagged", "for", "years",
    ];

    /// Builds text that wraps to exactly `lines` lines at `width`.
    fn text_with_lines(fonts: &FontRegistry, font: FontDescriptor, width: f32, lines: usize) -> String {
        let measurer = TextMeasurer::new(fonts);
        let mut text = String::from("Officials");
        for word in WORDS.iter().cycle() {
            let candidate = format!("{text} {word}");
            if measurer.line_count(&candidate, font, width) > lines {
                break;
            }
            text = candidate;
        }
        assert_eq!(measurer.line_count(&text, font, width), lines);
        text
    }

    fn scenario_bundle(fonts: &FontRegistry) -> NewsBundle {
        let col = column_width(CONTENT_WIDTH);
        let top = |n: usize| Story {
            headline: format!("Top story {n} headline"),
            summary: text_with_lines(fonts, SUMMARY_FONT, CONTENT_WIDTH, 3),
        };
        NewsBundle {
            top_stories: vec![top(1), top(2)],
            third_story: Some(Story {
                headline: "Third story headline".into(),
                summary: text_with_lines(fonts, SUMMARY_FONT, col, 2),
            }),
            headlines: (1..=5).map(|i| format!("Brief headline number {i}")).collect(),
        }
    }

    /// Records every request and answers with a fixed reply.
    struct RecordingShortener {
        reply: Option<String>,
        calls: AtomicU32,
        targets: Mutex<Vec<u8>>,
    }

    impl RecordingShortener {
        fn new(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                calls: AtomicU32::new(0),
                targets: Mutex::new(Vec::new()),
            }
        }

        fn targets(&self) -> Vec<u8> {
            self.targets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Shortener for RecordingShortener {
        async fn shorten(&self, _: &str, _: &str, target_sentences: u8) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.targets.lock().unwrap().push(target_sentences);
            self.reply.clone()
        }
    }

    fn total_of(fonts: &FontRegistry, news: &NewsBundle) -> f32 {
        measure_news_height(news, CONTENT_WIDTH, TextMeasurer::new(fonts)).total
    }

    // ── measurement ─────────────────────────────────────────────────────────

    #[test]
    fn test_measure_scenario_components() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        let h = measure_news_height(&news, CONTENT_WIDTH, TextMeasurer::new(&fonts));

        let top_expected = 11.0 * 1.3 + 5.0 * MM + 3.0 * 8.0 * 1.3 + 8.0 * MM;
        assert_eq!(h.top_stories.len(), 2);
        for story_h in &h.top_stories {
            assert!((story_h - top_expected).abs() < 1e-3);
        }

        let third_expected = 10.0 * 1.3 + 4.0 * MM + 2.0 * 8.0 * 1.3;
        assert!((h.third_story - third_expected).abs() < 1e-3);

        let brief_expected = 5.0 * MM + 5.0 * (8.0 * 1.3 + 4.0 * MM);
        assert!((h.headlines - brief_expected).abs() < 1e-3);

        let total_expected = 8.0 * MM + 2.0 * top_expected + third_expected.max(brief_expected);
        assert!((h.total - total_expected).abs() < 1e-3);
    }

    #[test]
    fn test_only_two_top_stories_are_measured() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        let mut extra = news.clone();
        extra.top_stories.push(Story::new("Third top story", "Should not count."));
        assert_eq!(total_of(&fonts, &news), total_of(&fonts, &extra));
    }

    #[test]
    fn test_headlines_only_bundle_still_takes_space() {
        let fonts = FontRegistry::builtin();
        let news = NewsBundle {
            headlines: vec!["Only a brief".into()],
            ..Default::default()
        };
        assert!(total_of(&fonts, &news) > NEWS_LABEL_HEIGHT);
    }

    // ── fitting ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fitting_bundle_is_unchanged_without_calls() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        let available = total_of(&fonts, &news);
        let shortener = RecordingShortener::new(Some("Short."));

        let out = fit_news_to_space(&news, available, CONTENT_WIDTH, &fonts, &shortener).await;

        assert_eq!(out.bundle, news);
        assert!(out.fits);
        assert_eq!(out.shortening_calls, 0);
        assert_eq!(shortener.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_shortening_drops_headlines_from_end() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        let available = total_of(&fonts, &news) - 50.0 * MM;
        let shortener = RecordingShortener::new(None);

        let out = fit_news_to_space(&news, available, CONTENT_WIDTH, &fonts, &shortener).await;

        assert_eq!(shortener.targets(), vec![1, 3, 4]);
        assert_eq!(out.shortening_calls, 3);
        assert!(out.bundle.headlines.len() < news.headlines.len());
        assert_eq!(
            out.bundle.headlines[..],
            news.headlines[..out.bundle.headlines.len()]
        );
        assert_eq!(out.bundle.top_stories, news.top_stories);

        let third = out.bundle.third_story.as_ref().expect("third story kept");
        assert_eq!(third.headline, "Third story headline");
        assert_eq!(third.summary, news.third_story.as_ref().unwrap().summary);
        assert!(!out.truncated, "a summary under 200 chars is left alone");
    }

    #[tokio::test]
    async fn test_small_overflow_asks_third_story_for_two_sentences() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        // The brief column is taller than the third story, so shortening the
        // third story alone cannot help; the second top story must.
        let available = total_of(&fonts, &news) - 5.0 * MM;
        let shortener = RecordingShortener::new(Some("Short."));

        let out = fit_news_to_space(&news, available, CONTENT_WIDTH, &fonts, &shortener).await;

        assert!(out.fits);
        assert_eq!(shortener.targets(), vec![2, 3]);
        assert_eq!(out.bundle.third_story.as_ref().unwrap().summary, "Short.");
        assert_eq!(out.bundle.top_stories[1].summary, "Short.");
        assert_eq!(out.bundle.top_stories[0], news.top_stories[0]);
        assert_eq!(out.bundle.headlines, news.headlines);
        assert_eq!(out.headlines_dropped, 0);
    }

    #[tokio::test]
    async fn test_zero_available_exercises_every_fallback() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);

        let out = fit_news_to_space(&news, 0.0, CONTENT_WIDTH, &fonts, &NoShortener).await;

        assert!(!out.fits);
        assert_eq!(out.shortening_calls, 3);
        assert!(out.bundle.headlines.is_empty());
        assert_eq!(out.headlines_dropped, 5);
        assert!(!out.truncated);
        assert_eq!(out.bundle.third_story, news.third_story);
        assert_eq!(out.bundle.top_stories.len(), 2);
    }

    #[tokio::test]
    async fn test_long_third_story_is_truncated_with_ellipsis() {
        let fonts = FontRegistry::builtin();
        let mut news = scenario_bundle(&fonts);
        let long_summary = WORDS.iter().cycle().take(70).copied().collect::<Vec<_>>().join(" ");
        assert!(long_summary.chars().count() > 350);
        news.third_story = Some(Story::new("Third story headline", long_summary.clone()));

        let out = fit_news_to_space(&news, 0.0, CONTENT_WIDTH, &fonts, &NoShortener).await;

        assert!(out.truncated);
        let third = out.bundle.third_story.as_ref().expect("third story kept");
        assert_eq!(third.headline, "Third story headline");
        assert!(third.summary.ends_with("..."), "got {:?}", third.summary);
        assert!(third.summary.chars().count() <= 200);
        assert!(long_summary.starts_with(third.summary.trim_end_matches("...")));
        assert!(out.measured_height < total_of(&fonts, &news));
    }

    #[tokio::test]
    async fn test_negative_available_does_not_panic() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        let out = fit_news_to_space(&news, -100.0, CONTENT_WIDTH, &fonts, &NoShortener).await;
        assert!(!out.fits);
    }

    #[tokio::test]
    async fn test_empty_bundle_returned_immediately() {
        let fonts = FontRegistry::builtin();
        let shortener = RecordingShortener::new(Some("Short."));
        let out =
            fit_news_to_space(&NewsBundle::default(), 0.0, CONTENT_WIDTH, &fonts, &shortener).await;
        assert!(out.bundle.is_empty());
        assert_eq!(shortener.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_headlines_only_bundle_drops_headlines() {
        let fonts = FontRegistry::builtin();
        let news = NewsBundle {
            headlines: (1..=4).map(|i| format!("Brief {i}")).collect(),
            ..Default::default()
        };
        let two = NewsBundle {
            headlines: news.headlines[..2].to_vec(),
            ..Default::default()
        };
        let available = total_of(&fonts, &two);
        let shortener = RecordingShortener::new(None);

        let out = fit_news_to_space(&news, available, CONTENT_WIDTH, &fonts, &shortener).await;

        assert!(out.fits);
        assert_eq!(out.bundle.headlines, two.headlines);
        assert_eq!(shortener.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_input_bundle_not_mutated() {
        let fonts = FontRegistry::builtin();
        let news = scenario_bundle(&fonts);
        let before = news.clone();
        let _ = fit_news_to_space(&news, 0.0, CONTENT_WIDTH, &fonts, &NoShortener).await;
        assert_eq!(news, before);
    }

    #[test]
    fn test_shortening_plan_single_top_story() {
        let news = NewsBundle {
            top_stories: vec![Story::new("A", "B")],
            third_story: None,
            headlines: vec![],
        };
        assert_eq!(shortening_plan(&news, 30.0), vec![(StorySlot::Top(0), 4)]);
    }
}
