//! Block renderer: positioned text runs and hairlines on a single PDF page.
//!
//! Coordinates are PDF points with the origin at the bottom-left. The canvas
//! owns its content stream exclusively and is consumed by `finish`, which
//! serialises the whole document.

use pdf_writer::types::FontFlags;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::font_metrics::{encode_winansi, FontDescriptor, FontProgram, FontRegistry};
use crate::layout::measure::TextMeasurer;

/// A4 in points.
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

const DIVIDER_LINE_WIDTH: f32 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Styling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    fn components(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

pub const PRIMARY: Colour = Colour::from_hex(0x1A1D21);
pub const SECONDARY: Colour = Colour::from_hex(0x4A5568);
pub const MUTED: Colour = Colour::from_hex(0x718096);
pub const DIVIDER: Colour = Colour::from_hex(0xE2E8F0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub font: FontDescriptor,
    pub colour: Colour,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(font: FontDescriptor, colour: Colour) -> Self {
        Self {
            font,
            colour,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// One line of text as it was placed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: FontDescriptor,
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas
// ────────────────────────────────────────────────────────────────────────────

pub struct PageCanvas<'a> {
    content: Content,
    measurer: TextMeasurer<'a>,
    width: f32,
    height: f32,
    placed: Vec<PlacedLine>,
}

impl<'a> PageCanvas<'a> {
    pub fn new(fonts: &'a FontRegistry, width: f32, height: f32) -> Self {
        Self {
            content: Content::new(),
            measurer: TextMeasurer::new(fonts),
            width,
            height,
            placed: Vec::new(),
        }
    }

    pub fn a4(fonts: &'a FontRegistry) -> Self {
        Self::new(fonts, A4_WIDTH, A4_HEIGHT)
    }

    pub fn measurer(&self) -> TextMeasurer<'a> {
        self.measurer
    }

    /// Every line drawn so far, in drawing order.
    pub fn placed_lines(&self) -> &[PlacedLine] {
        &self.placed
    }

    /// Draws `text` with its baseline at `y` and returns the new cursor.
    ///
    /// When `max_width` is given and the text is wider, it is wrapped with the
    /// measurer, drawn left-aligned one line height apart, and the baseline of
    /// the last line is returned. Otherwise the single line honours the style's
    /// alignment relative to `x` and `y` comes back unchanged.
    pub fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
    ) -> f32 {
        if text.is_empty() {
            return y;
        }

        let width = self.measurer.text_width(text, style.font);

        if let Some(max_width) = max_width.filter(|&max| width > max) {
            let line_height = style.font.line_height();
            let lines = self.measurer.wrap(text, style.font, max_width);
            if lines.is_empty() {
                return y;
            }
            let mut line_y = y;
            for line in &lines {
                self.show_line(x, line_y, line, style);
                line_y -= line_height;
            }
            return line_y + line_height;
        }

        let x = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.show_line(x, y, text, style);
        y
    }

    /// A horizontal hairline in the divider colour.
    pub fn draw_divider(&mut self, x1: f32, x2: f32, y: f32) {
        let (r, g, b) = DIVIDER.components();
        self.content.save_state();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(DIVIDER_LINE_WIDTH);
        self.content.move_to(x1, y);
        self.content.line_to(x2, y);
        self.content.stroke();
        self.content.restore_state();
    }

    fn show_line(&mut self, x: f32, y: f32, line: &str, style: &TextStyle) {
        let (r, g, b) = style.colour.components();
        self.content.set_fill_rgb(r, g, b);
        self.content.begin_text();
        self.content.set_font(
            Name(style.font.family.resource_name().as_bytes()),
            style.font.size_pt,
        );
        self.content.next_line(x, y);
        self.content.show(Str(&encode_winansi(line)));
        self.content.end_text();

        self.placed.push(PlacedLine {
            x,
            y,
            text: line.to_string(),
            font: style.font,
        });
    }

    /// Serialises the page into a complete single-page PDF document.
    pub fn finish(self) -> Vec<u8> {
        let fonts = self.measurer.fonts();

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let info_id = Ref::new(5);
        // Each face takes three refs: font dict, descriptor, font file.
        let font_ref = |slot: usize| Ref::new(6 + 3 * slot as i32);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        {
            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, self.width, self.height));
            page.parent(page_tree_id);
            page.contents(content_id);

            let mut resources = page.resources();
            let mut font_dict = resources.fonts();
            for face in fonts.faces() {
                font_dict.pair(
                    Name(face.family.resource_name().as_bytes()),
                    font_ref(face.family.index()),
                );
            }
            font_dict.finish();
            resources.finish();
            page.finish();
        }

        pdf.stream(content_id, &self.content.finish());
        pdf.document_info(info_id)
            .title(TextStr("Daily Print"))
            .producer(TextStr(env!("CARGO_PKG_NAME")));

        for face in fonts.faces() {
            let id = font_ref(face.family.index());
            match &face.program {
                FontProgram::Standard { base_font } => {
                    pdf.type1_font(id)
                        .base_font(Name(base_font.as_bytes()))
                        .first_char(32)
                        .last_char(255)
                        .widths(face.metrics.pdf_widths())
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                }
                FontProgram::TrueType(program) => {
                    let descriptor_id = Ref::new(id.get() + 1);
                    let file_id = Ref::new(id.get() + 2);
                    let base_font = Name(program.postscript_name.as_bytes());

                    let mut dict = pdf.indirect(id).dict();
                    dict.pair(Name(b"Type"), Name(b"Font"));
                    dict.pair(Name(b"Subtype"), Name(b"TrueType"));
                    dict.pair(Name(b"BaseFont"), base_font);
                    dict.pair(Name(b"FirstChar"), 32);
                    dict.pair(Name(b"LastChar"), 255);
                    dict.insert(Name(b"Widths"))
                        .array()
                        .items(face.metrics.pdf_widths());
                    dict.pair(Name(b"Encoding"), Name(b"WinAnsiEncoding"));
                    dict.pair(Name(b"FontDescriptor"), descriptor_id);
                    dict.finish();

                    pdf.font_descriptor(descriptor_id)
                        .name(base_font)
                        .flags(FontFlags::NON_SYMBOLIC)
                        .bbox(Rect::new(0.0, program.descent, 1000.0, program.ascent))
                        .italic_angle(0.0)
                        .ascent(program.ascent)
                        .descent(program.descent)
                        .cap_height(program.cap_height)
                        .stem_v(80.0)
                        .font_file2(file_id);

                    pdf.stream(file_id, &program.data)
                        .pair(Name(b"Length1"), program.data.len() as i32);
                }
            }
        }

        pdf.finish()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
