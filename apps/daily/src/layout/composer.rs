//! Page composer: one linear top-to-bottom pass over the fixed page zones.
//!
//! ```text
//! header ── divider ── news (elastic) ── divider ── quotation ── divider ── footer
//! ```
//!
//! `generate_pdf` is the async entry point. It fits the news bundle first
//! (the only await, on the shortening capability) and then renders the page
//! inside `spawn_blocking` with owned inputs.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::RenderError;
use crate::layout::canvas::{
    Colour, PageCanvas, TextStyle, A4_HEIGHT, A4_WIDTH, MUTED, PRIMARY, SECONDARY,
};
use crate::layout::fitter::{
    column_width, fit_news_to_space, BRIEF_FONT, BRIEF_ITEM_GAP, BRIEF_LABEL_HEIGHT,
    BULLET_INDENT, COLUMN_GUTTER, NEWS_LABEL_HEIGHT, SUMMARY_FONT, THIRD_HEADLINE_FONT,
    THIRD_HEADLINE_GAP, TOP_HEADLINE_FONT, TOP_HEADLINE_GAP, TOP_STORY_GAP,
};
use crate::layout::font_metrics::{FontDescriptor, FontFamily, FontRegistry};
use crate::layout::measure::{truncate_text, CM, MM};
use crate::models::{DailyContent, NewsBundle};
use crate::news::shortener::Shortener;

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

const fn style(family: FontFamily, size: f32, colour: Colour) -> TextStyle {
    TextStyle::new(FontDescriptor::new(family, size), colour)
}

const DAY_NAME: TextStyle = style(FontFamily::Bold, 28.0, PRIMARY);
const TEMPERATURE: TextStyle = style(FontFamily::SemiBold, 28.0, PRIMARY);
const CONDITION: TextStyle = style(FontFamily::Medium, 10.0, SECONDARY);
const HIGH_LOW: TextStyle = style(FontFamily::Light, 8.0, MUTED);
const DATE_LINE: TextStyle = style(FontFamily::Medium, 12.0, SECONDARY);
const LOCATION: TextStyle = style(FontFamily::Light, 9.0, MUTED);

const SECTION_LABEL: TextStyle = style(FontFamily::Bold, 9.0, SECONDARY);
const BRIEF_LABEL: TextStyle = style(FontFamily::Bold, 8.0, MUTED);
const BULLET: TextStyle = TextStyle::new(BRIEF_FONT, MUTED);
const PLACEHOLDER: TextStyle = style(FontFamily::Medium, 10.0, MUTED);

const QUOTE: TextStyle = style(FontFamily::Light, 10.0, PRIMARY);
const ATTRIBUTION: TextStyle = style(FontFamily::SemiBold, 9.0, SECONDARY);
const SOURCE_TITLE: TextStyle = style(FontFamily::Light, 8.0, MUTED);

const VERSE: TextStyle = style(FontFamily::Light, 9.0, PRIMARY);
const VERSE_REF: TextStyle = style(FontFamily::Medium, 8.0, MUTED);
const READINGS_LABEL: TextStyle = style(FontFamily::Bold, 8.0, SECONDARY);
const READINGS: TextStyle = style(FontFamily::Medium, 10.0, PRIMARY);
const READINGS_NOTE: TextStyle = style(FontFamily::Light, 9.0, MUTED);

const QUOTE_MAX_CHARS: usize = 250;
const VERSE_MAX_CHARS: usize = 80;
const READINGS_SEPARATOR: &str = "  ·  ";

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Fixed anchors for an A4 page, in points from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Baseline of the day name.
    pub margin_top: f32,
    /// News never renders below this.
    pub quotation_top: f32,
    pub quotation_anchor: f32,
    pub footer_anchor: f32,
    /// Buffer subtracted from the raw news space before fitting.
    pub safety_margin: f32,
}

impl PageGeometry {
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_left: 2.0 * CM,
            margin_right: A4_WIDTH - 2.0 * CM,
            margin_top: A4_HEIGHT - 1.5 * CM,
            quotation_top: 7.0 * CM,
            quotation_anchor: 6.5 * CM,
            footer_anchor: 3.0 * CM,
            safety_margin: 1.0 * CM,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.margin_right - self.margin_left
    }

    pub fn header_divider_y(&self) -> f32 {
        self.margin_top - 9.0 * MM - 5.0 * MM - 8.0 * MM
    }

    /// Baseline of the news section label.
    pub fn news_top(&self) -> f32 {
        self.header_divider_y() - 8.0 * MM
    }

    pub fn news_available_height(&self) -> f32 {
        self.news_top() - self.quotation_top - self.safety_margin
    }

    pub fn quotation_divider_y(&self) -> f32 {
        self.quotation_anchor + 10.0 * MM
    }

    pub fn footer_divider_y(&self) -> f32 {
        self.footer_anchor + 8.0 * MM
    }

    /// The page zones, top to bottom.
    pub fn zones(&self) -> [PageZone; 4] {
        [
            PageZone {
                kind: ZoneKind::Header,
                top: self.height,
                anchor: self.margin_top,
                bottom: self.header_divider_y(),
                elastic: false,
            },
            PageZone {
                kind: ZoneKind::News,
                top: self.header_divider_y(),
                anchor: self.news_top(),
                bottom: self.quotation_top,
                elastic: true,
            },
            PageZone {
                kind: ZoneKind::Quotation,
                top: self.quotation_top,
                anchor: self.quotation_anchor,
                bottom: self.footer_divider_y(),
                elastic: false,
            },
            PageZone {
                kind: ZoneKind::Footer,
                top: self.footer_divider_y(),
                anchor: self.footer_anchor,
                bottom: 0.0,
                elastic: false,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Header,
    News,
    Quotation,
    Footer,
}

/// A named vertical band of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageZone {
    pub kind: ZoneKind,
    pub top: f32,
    pub anchor: f32,
    pub bottom: f32,
    pub elastic: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

/// Fits the news to the page and renders the complete PDF.
pub async fn generate_pdf(
    content: DailyContent,
    fonts: Arc<FontRegistry>,
    shortener: &dyn Shortener,
) -> Result<Vec<u8>, RenderError> {
    let geometry = PageGeometry::a4();

    let fit = fit_news_to_space(
        &content.news,
        geometry.news_available_height(),
        geometry.content_width(),
        &fonts,
        shortener,
    )
    .await;

    info!(
        needed_mm = fit.measured_height / MM,
        shortening_calls = fit.shortening_calls,
        headlines_dropped = fit.headlines_dropped,
        truncated = fit.truncated,
        fits = fit.fits,
        "News fitted"
    );

    let news = fit.bundle;
    let bytes = tokio::task::spawn_blocking(move || render_page(&content, &news, &fonts, &geometry))
        .await
        .map_err(|e| RenderError::Worker(format!("spawn_blocking failed rendering page: {e}")))?;

    info!(bytes = bytes.len(), "Page rendered");
    Ok(bytes)
}

/// Renders one page from already-fitted news. Synchronous and CPU-bound.
pub fn render_page(
    content: &DailyContent,
    news: &NewsBundle,
    fonts: &FontRegistry,
    geometry: &PageGeometry,
) -> Vec<u8> {
    let mut canvas = PageCanvas::new(fonts, geometry.width, geometry.height);
    compose(&mut canvas, content, news, geometry);
    canvas.finish()
}

/// Draws every zone onto `canvas`.
pub fn compose(
    canvas: &mut PageCanvas<'_>,
    content: &DailyContent,
    news: &NewsBundle,
    geometry: &PageGeometry,
) {
    draw_header(canvas, content, geometry);
    draw_news(canvas, news, geometry);
    draw_quotation(canvas, content, geometry);
    draw_footer(canvas, content, geometry);
}

// ────────────────────────────────────────────────────────────────────────────
// Zones
// ────────────────────────────────────────────────────────────────────────────

fn draw_header(canvas: &mut PageCanvas<'_>, content: &DailyContent, g: &PageGeometry) {
    let mut y = g.margin_top;

    let day_name = content.date.format("%A").to_string().to_uppercase();
    canvas.draw_text(g.margin_left, y, &day_name, &DAY_NAME, None);

    if let Some(weather) = &content.weather {
        let temperature = format!("{}°C", weather.temperature as i64);
        canvas.draw_text(g.margin_right, y, &temperature, &TEMPERATURE.right(), None);
        canvas.draw_text(g.margin_right, y - 8.0 * MM, &weather.condition, &CONDITION.right(), None);
        let high_low = format!("H {}°  L {}°", weather.high as i64, weather.low as i64);
        canvas.draw_text(g.margin_right, y - 14.0 * MM, &high_low, &HIGH_LOW.right(), None);
    } else {
        canvas.draw_text(g.margin_right, y, "Weather unavailable", &PLACEHOLDER.right(), None);
    }

    y -= 9.0 * MM;
    let date_line = content.date.format("%-d %B %Y").to_string();
    canvas.draw_text(g.margin_left, y, &date_line, &DATE_LINE, None);

    y -= 5.0 * MM;
    canvas.draw_text(g.margin_left, y, &content.location_name, &LOCATION, None);

    y -= 8.0 * MM;
    canvas.draw_divider(g.margin_left, g.margin_right, y);
}

fn draw_news(canvas: &mut PageCanvas<'_>, news: &NewsBundle, g: &PageGeometry) {
    let content_width = g.content_width();
    let mut y = g.news_top();

    canvas.draw_text(g.margin_left, y, "THE GUARDIAN", &SECTION_LABEL, None);
    y -= NEWS_LABEL_HEIGHT;

    if news.is_empty() {
        canvas.draw_text(g.margin_left, y, "News unavailable", &PLACEHOLDER, None);
        return;
    }

    let headline_style = TextStyle::new(TOP_HEADLINE_FONT, PRIMARY);
    let summary_style = TextStyle::new(SUMMARY_FONT, SECONDARY);

    for story in news.visible_top_stories() {
        if y < g.quotation_top + 3.0 * CM {
            warn!(headline = %story.headline, "No room left for top story");
            break;
        }
        y = canvas.draw_text(g.margin_left, y, &story.headline, &headline_style, Some(content_width));
        y -= TOP_HEADLINE_GAP;
        y = canvas.draw_text(g.margin_left, y, &story.summary, &summary_style, Some(content_width));
        y -= TOP_STORY_GAP;
    }

    if y <= g.quotation_top + 1.0 * CM || (news.third_story.is_none() && news.headlines.is_empty()) {
        return;
    }

    let col_width = column_width(content_width);
    let left_x = g.margin_left;
    let right_x = g.margin_left + col_width + COLUMN_GUTTER;

    if let Some(third) = &news.third_story {
        let third_headline = TextStyle::new(THIRD_HEADLINE_FONT, PRIMARY);
        let left_y = canvas.draw_text(left_x, y, &third.headline, &third_headline, Some(col_width));
        canvas.draw_text(
            left_x,
            left_y - THIRD_HEADLINE_GAP,
            &third.summary,
            &summary_style,
            Some(col_width),
        );
    }

    if !news.headlines.is_empty() {
        let brief_style = TextStyle::new(BRIEF_FONT, PRIMARY);
        canvas.draw_text(right_x, y, "IN BRIEF", &BRIEF_LABEL, None);
        let mut right_y = y - BRIEF_LABEL_HEIGHT;

        for headline in &news.headlines {
            if right_y < g.quotation_top {
                break;
            }
            canvas.draw_text(right_x, right_y, "•", &BULLET, None);
            right_y = canvas.draw_text(
                right_x + BULLET_INDENT,
                right_y,
                headline,
                &brief_style,
                Some(col_width - BULLET_INDENT),
            );
            right_y -= BRIEF_ITEM_GAP;
        }
    }
}

fn draw_quotation(canvas: &mut PageCanvas<'_>, content: &DailyContent, g: &PageGeometry) {
    canvas.draw_divider(g.margin_left, g.margin_right, g.quotation_divider_y());

    let Some(highlight) = &content.highlight else {
        canvas.draw_text(
            g.width / 2.0,
            g.quotation_anchor,
            "No highlight today",
            &PLACEHOLDER.centered(),
            None,
        );
        return;
    };

    let quote_width = g.content_width() - 10.0 * MM;
    let text = truncate_text(&highlight.text, max_quote_chars(g, quote_width));

    let mut y = canvas.draw_text(
        g.margin_left + 5.0 * MM,
        g.quotation_anchor,
        &format!("\"{text}\""),
        &QUOTE,
        Some(quote_width),
    );
    y -= 6.0 * MM;

    canvas.draw_text(
        g.margin_right,
        y,
        &format!("— {}", highlight.author),
        &ATTRIBUTION.right(),
        None,
    );
    canvas.draw_text(g.margin_right, y - 4.0 * MM, &highlight.title, &SOURCE_TITLE.right(), None);
}

/// Rough character budget for the quotation: half-em characters, 13pt lines.
fn max_quote_chars(g: &PageGeometry, quote_width: f32) -> usize {
    let available_height = g.quotation_anchor - g.footer_anchor - 1.0 * CM;
    let chars_per_line = (quote_width / (10.0 * 0.5)) as usize;
    let max_lines = (available_height / (10.0 * 1.3)) as usize;
    QUOTE_MAX_CHARS.min(chars_per_line * max_lines)
}

fn draw_footer(canvas: &mut PageCanvas<'_>, content: &DailyContent, g: &PageGeometry) {
    let footer_y = g.footer_anchor;
    let mid_x = g.width / 2.0;

    canvas.draw_divider(g.margin_left, g.margin_right, g.footer_divider_y());

    if let Some(verse) = &content.verse {
        let short = truncate_text(&verse.text, VERSE_MAX_CHARS);
        let left_y = canvas.draw_text(
            g.margin_left,
            footer_y,
            &format!("\"{short}\""),
            &VERSE,
            Some(mid_x - g.margin_left - 10.0 * MM),
        );
        canvas.draw_text(
            g.margin_left,
            left_y - 4.0 * MM,
            &format!("— {}", verse.reference),
            &VERSE_REF,
            None,
        );
    }

    let readings_x = mid_x + 5.0 * MM;
    canvas.draw_text(readings_x, footer_y, "TODAY'S READINGS", &READINGS_LABEL, None);

    let line_y = footer_y - 5.0 * MM;
    match &content.readings {
        Some(readings) => {
            let valid: Vec<&str> = readings
                .iter()
                .map(String::as_str)
                .filter(|r| !r.is_empty())
                .collect();
            if valid.is_empty() {
                canvas.draw_text(readings_x, line_y, "End of year", &READINGS_NOTE, None);
            } else {
                canvas.draw_text(readings_x, line_y, &valid.join(READINGS_SEPARATOR), &READINGS, None);
            }
        }
        None => {
            canvas.draw_text(readings_x, line_y, "Weekend", &READINGS_NOTE, None);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Highlight, Story, Verse, WeatherSnapshot};
    use crate::news::shortener::NoShortener;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn bare_content() -> DailyContent {
        DailyContent {
            date: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap(),
            location_name: "Witney, Oxfordshire".into(),
            weather: None,
            news: NewsBundle::default(),
            readings: None,
            verse: None,
            highlight: None,
        }
    }

    fn full_content() -> DailyContent {
        let long = "Negotiators worked through the night to agree the text of the accord, \
                    which commits signatories to halving methane emissions within a decade. ";
        DailyContent {
            weather: Some(WeatherSnapshot {
                temperature: 12.6,
                condition: "Partly cloudy".into(),
                high: 14.0,
                low: 6.0,
                sunrise: "06:31".into(),
                sunset: "18:07".into(),
                feels_like: Some(11.0),
            }),
            news: NewsBundle {
                top_stories: vec![
                    Story::new("Climate accord signed in Geneva", long.repeat(4)),
                    Story::new("Chancellor sets out spring budget", long.repeat(3)),
                ],
                third_story: Some(Story::new("Museum returns bronzes", long.repeat(2))),
                headlines: (1..=5).map(|i| format!("Brief item number {i}")).collect(),
            },
            readings: Some(vec!["Gen 12".into(), "Ps 19".into(), "Matt 4".into()]),
            verse: Some(Verse {
                text: "The Lord is my shepherd; I shall not want.".into(),
                reference: "Psalm 23:1".into(),
            }),
            highlight: Some(Highlight {
                text: "We are what we repeatedly do. Excellence, then, is not an act, but a habit.".into(),
                title: "The Story of Philosophy".into(),
                author: "Will Durant".into(),
            }),
            ..bare_content()
        }
    }

    fn render(content: &DailyContent) -> Vec<u8> {
        let fonts = FontRegistry::builtin();
        render_page(content, &content.news, &fonts, &PageGeometry::a4())
    }

    // ── geometry ────────────────────────────────────────────────────────────

    #[test]
    fn test_zones_ordered_and_non_overlapping() {
        let zones = PageGeometry::a4().zones();
        let kinds: Vec<ZoneKind> = zones.iter().map(|z| z.kind).collect();
        assert_eq!(
            kinds,
            vec![ZoneKind::Header, ZoneKind::News, ZoneKind::Quotation, ZoneKind::Footer]
        );
        for pair in zones.windows(2) {
            assert!(pair[0].bottom >= pair[1].top, "{:?} overlaps {:?}", pair[0].kind, pair[1].kind);
        }
        for zone in &zones {
            assert!(zone.top >= zone.anchor && zone.anchor >= zone.bottom, "{:?}", zone.kind);
        }
        assert_eq!(zones.iter().filter(|z| z.elastic).count(), 1);
    }

    #[test]
    fn test_news_budget_leaves_safety_margin() {
        let g = PageGeometry::a4();
        let expected = g.news_top() - 7.0 * CM - 1.0 * CM;
        assert!((g.news_available_height() - expected).abs() < 1e-3);
        assert!(g.news_available_height() > 0.0);
    }

    #[test]
    fn test_quote_budget_capped_at_250() {
        let g = PageGeometry::a4();
        assert_eq!(max_quote_chars(&g, g.content_width() - 10.0 * MM), 250);
    }

    // ── rendered page ───────────────────────────────────────────────────────

    #[test]
    fn test_all_optional_content_absent_renders_one_page() {
        let bytes = render(&bare_content());
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"(News unavailable) Tj"));
        assert!(contains(&bytes, b"(Weekend) Tj"));
        assert!(contains(&bytes, b"(WEDNESDAY) Tj"));
        assert!(contains(&bytes, b"(12 March 2025) Tj"));
        assert!(contains(&bytes, b"(No highlight today) Tj"));
        assert!(contains(&bytes, b"(Weather unavailable) Tj"));
    }

    #[test]
    fn test_missing_highlight_fills_quotation_zone_with_placeholder() {
        let content = bare_content();
        let fonts = FontRegistry::builtin();
        let g = PageGeometry::a4();
        let mut canvas = PageCanvas::a4(&fonts);
        compose(&mut canvas, &content, &content.news, &g);

        let placeholder = canvas
            .placed_lines()
            .iter()
            .find(|l| l.text == "No highlight today")
            .expect("quotation placeholder drawn");
        assert_eq!(placeholder.y, g.quotation_anchor);
        assert!(placeholder.y < g.quotation_top && placeholder.y > g.footer_divider_y());
        let width = canvas.measurer().text_width("No highlight today", PLACEHOLDER.font);
        assert!((placeholder.x + width / 2.0 - g.width / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_present_highlight_replaces_placeholder() {
        let fonts = FontRegistry::builtin();
        let mut canvas = PageCanvas::a4(&fonts);
        let content = full_content();
        compose(&mut canvas, &content, &content.news, &PageGeometry::a4());
        let texts: Vec<&str> = canvas.placed_lines().iter().map(|l| l.text.as_str()).collect();
        assert!(!texts.contains(&"No highlight today"));
        assert!(!texts.contains(&"Weather unavailable"));
    }

    #[test]
    fn test_exhausted_plan_renders_end_of_year() {
        let content = DailyContent {
            readings: Some(vec![String::new(), String::new(), String::new()]),
            ..bare_content()
        };
        let bytes = render(&content);
        assert!(contains(&bytes, b"(End of year) Tj"));
        assert!(!contains(&bytes, b"(Weekend) Tj"));
    }

    #[test]
    fn test_end_of_year_survives_text_extraction() {
        let content = DailyContent {
            readings: Some(vec![String::new(), String::new(), String::new()]),
            ..bare_content()
        };
        let text = pdf_extract::extract_text_from_mem(&render(&content)).expect("extractable pdf");
        assert!(text.contains("End of year"), "extracted: {text}");
    }

    #[test]
    fn test_partial_readings_skip_empty_entries() {
        let content = DailyContent {
            readings: Some(vec!["Neh 1".into(), String::new(), "Rev 3".into()]),
            ..bare_content()
        };
        let fonts = FontRegistry::builtin();
        let mut canvas = PageCanvas::a4(&fonts);
        compose(&mut canvas, &content, &content.news, &PageGeometry::a4());
        assert!(canvas
            .placed_lines()
            .iter()
            .any(|l| l.text == "Neh 1  ·  Rev 3"));
    }

    #[test]
    fn test_full_page_draws_every_section() {
        let content = full_content();
        let fonts = FontRegistry::builtin();
        let mut canvas = PageCanvas::a4(&fonts);
        compose(&mut canvas, &content, &content.news, &PageGeometry::a4());
        let texts: Vec<&str> = canvas.placed_lines().iter().map(|l| l.text.as_str()).collect();

        for expected in [
            "12°C",
            "Partly cloudy",
            "H 14°  L 6°",
            "THE GUARDIAN",
            "Climate accord signed in Geneva",
            "IN BRIEF",
            "— Will Durant",
            "— Psalm 23:1",
            "TODAY'S READINGS",
            "Gen 12  ·  Ps 19  ·  Matt 4",
        ] {
            assert!(texts.contains(&expected), "missing {expected:?}");
        }
        assert!(!texts.contains(&"News unavailable"));
    }

    #[test]
    fn test_temperature_right_aligned_to_margin() {
        let content = full_content();
        let fonts = FontRegistry::builtin();
        let g = PageGeometry::a4();
        let mut canvas = PageCanvas::a4(&fonts);
        compose(&mut canvas, &content, &content.news, &g);
        let temp = canvas
            .placed_lines()
            .iter()
            .find(|l| l.text == "12°C")
            .expect("temperature drawn");
        let width = canvas.measurer().text_width("12°C", TEMPERATURE.font);
        assert!((temp.x + width - g.margin_right).abs() < 1e-3);
        assert_eq!(temp.y, g.margin_top);
    }

    #[tokio::test]
    async fn test_fitted_news_stays_above_quotation_zone() {
        let mut content = full_content();
        content.highlight = None;
        content.verse = None;
        content.news.top_stories[1].summary = content.news.top_stories[1].summary.repeat(7);

        let fonts = Arc::new(FontRegistry::builtin());
        let g = PageGeometry::a4();
        let fit = fit_news_to_space(
            &content.news,
            g.news_available_height(),
            g.content_width(),
            &fonts,
            &NoShortener,
        )
        .await;
        assert!(fit.headlines_dropped > 0);

        let mut canvas = PageCanvas::a4(&fonts);
        compose(&mut canvas, &content, &fit.bundle, &g);

        // Between the footer and the quotation top only the quotation placeholder may appear.
        for line in canvas.placed_lines() {
            if line.text == "No highlight today" {
                continue;
            }
            assert!(
                line.y >= g.quotation_top || line.y <= g.footer_anchor,
                "{:?} drawn at {} inside the quotation zone",
                line.text,
                line.y
            );
        }
    }

    #[tokio::test]
    async fn test_generate_pdf_end_to_end() {
        let fonts = Arc::new(FontRegistry::builtin());
        let bytes = generate_pdf(full_content(), fonts, &NoShortener)
            .await
            .expect("page renders");
        assert!(bytes.starts_with(b"%PDF"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"(TODAY'S READINGS) Tj"));
    }
}
