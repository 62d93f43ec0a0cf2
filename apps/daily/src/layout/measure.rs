//! Text measurement: greedy word-wrap and rendered height.
//!
//! `TextMeasurer::wrap` is the only line-breaking routine in the crate. The
//! block renderer draws exactly the lines it returns, so a measured height
//! can never disagree with what lands on the page.

use crate::layout::font_metrics::{FontDescriptor, FontRegistry};

/// Stateless measuring view over the loaded fonts.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasurer<'a> {
    fonts: &'a FontRegistry,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(fonts: &'a FontRegistry) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &'a FontRegistry {
        self.fonts
    }

    /// Unwrapped width of `text` in points.
    pub fn text_width(&self, text: &str, font: FontDescriptor) -> f32 {
        self.fonts.metrics(font.family).measure_str(text) * font.size_pt
    }

    /// Splits `text` into the lines it occupies at `max_width`.
    ///
    /// Text that fits unwrapped comes back as a single untouched line. Longer
    /// text is broken greedily at whitespace; a word wider than `max_width`
    /// gets a line of its own. Empty text yields no lines.
    pub fn wrap(&self, text: &str, font: FontDescriptor, max_width: f32) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        if self.text_width(text, font) <= max_width {
            return vec![text.to_string()];
        }

        let metrics = self.fonts.metrics(font.family);
        let space_w = metrics.space_width * font.size_pt;

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = metrics.measure_str(word) * font.size_pt;

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    pub fn line_count(&self, text: &str, font: FontDescriptor, max_width: f32) -> usize {
        self.wrap(text, font, max_width).len()
    }

    /// Height `text` occupies when rendered at `max_width`: lines × line height.
    pub fn measure_height(&self, text: &str, font: FontDescriptor, max_width: f32) -> f32 {
        self.line_count(text, font, max_width) as f32 * font.line_height()
    }
}

/// Cuts `text` to at most `max_chars` characters, ending in `...`.
///
/// Breaks at the last space when that keeps more than half the budget,
/// otherwise cuts mid-word.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    let cut = match truncated.rfind(' ') {
        Some(idx) if truncated[..idx].chars().count() > max_chars / 2 => &truncated[..idx],
        _ => truncated.as_str(),
    };
    format!("{cut}...")
}

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;
/// Points per centimetre.
pub const CM: f32 = 10.0 * MM;

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
