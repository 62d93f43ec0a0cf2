//! Font registry and per-character width tables for the four page families.
//!
//! Widths are stored in em units (relative to font size) for every WinAnsi
//! code point from 0x20 to 0xFF. The same table feeds both line-wrapping
//! decisions and the `/Widths` array written into the PDF, so what the
//! measurer predicts is exactly what the renderer draws.
//!
//! Two sources are supported:
//! - built-in: PDF base-14 Helvetica / Helvetica-Bold with static AFM widths
//! - directory: the Montserrat TTF files, measured with `fontdue` and embedded

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::errors::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Font family + descriptor
// ────────────────────────────────────────────────────────────────────────────

/// The four weights used on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Day name, section labels.
    Bold,
    /// Headlines, temperature, attribution.
    SemiBold,
    /// Body copy.
    Medium,
    /// Quotation text, muted captions.
    Light,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Bold,
        FontFamily::SemiBold,
        FontFamily::Medium,
        FontFamily::Light,
    ];

    pub fn index(self) -> usize {
        match self {
            FontFamily::Bold => 0,
            FontFamily::SemiBold => 1,
            FontFamily::Medium => 2,
            FontFamily::Light => 3,
        }
    }

    /// Name of the font in the page's resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFamily::Bold => "F1",
            FontFamily::SemiBold => "F2",
            FontFamily::Medium => "F3",
            FontFamily::Light => "F4",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            FontFamily::Bold => "Montserrat-Bold.ttf",
            FontFamily::SemiBold => "Montserrat-SemiBold.ttf",
            FontFamily::Medium => "Montserrat-Medium.ttf",
            FontFamily::Light => "Montserrat-Light.ttf",
        }
    }

    fn standard_font(self) -> &'static str {
        match self {
            FontFamily::Bold | FontFamily::SemiBold => "Helvetica-Bold",
            FontFamily::Medium | FontFamily::Light => "Helvetica",
        }
    }
}

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.3;

/// A family at a specific point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontDescriptor {
    pub family: FontFamily,
    pub size_pt: f32,
}

impl FontDescriptor {
    pub const fn new(family: FontFamily, size_pt: f32) -> Self {
        Self { family, size_pt }
    }

    pub fn line_height(&self) -> f32 {
        self.size_pt * LINE_HEIGHT_FACTOR
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Code points 0x80..=0x9F that WinAnsiEncoding maps away from Latin-1.
const WINANSI_HIGH: [(u8, char); 27] = [
    (0x80, '€'),
    (0x82, '‚'),
    (0x83, 'ƒ'),
    (0x84, '„'),
    (0x85, '…'),
    (0x86, '†'),
    (0x87, '‡'),
    (0x88, 'ˆ'),
    (0x89, '‰'),
    (0x8A, 'Š'),
    (0x8B, '‹'),
    (0x8C, 'Œ'),
    (0x8E, 'Ž'),
    (0x91, '‘'),
    (0x92, '’'),
    (0x93, '“'),
    (0x94, '”'),
    (0x95, '•'),
    (0x96, '–'),
    (0x97, '—'),
    (0x98, '˜'),
    (0x99, '™'),
    (0x9A, 'š'),
    (0x9B, '›'),
    (0x9C, 'œ'),
    (0x9E, 'ž'),
    (0x9F, 'Ÿ'),
];

/// Maps a character to its WinAnsi byte. Other whitespace becomes a space.
pub fn encode_char(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        c if c.is_whitespace() => Some(b' '),
        c => WINANSI_HIGH
            .iter()
            .find(|(_, high)| *high == c)
            .map(|(code, _)| *code),
    }
}

pub fn decode_char(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        _ => WINANSI_HIGH
            .iter()
            .find(|(high, _)| *high == code)
            .map(|(_, c)| *c),
    }
}

/// Encodes text for a simple-font `Tj` operand. Unrepresentable characters become `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| encode_char(c).unwrap_or(b'?')).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

const FIRST_CODE: u8 = 0x20;
const TABLE_LEN: usize = 256 - FIRST_CODE as usize;

/// Character widths in em units, indexed by `WinAnsi code - 0x20`.
#[derive(Debug, Clone)]
pub struct FontMetricTable {
    widths: [f32; TABLE_LEN],
    pub space_width: f32,
}

impl FontMetricTable {
    /// Builds a table from a per-code advance lookup. Missing advances are
    /// filled with the mean of the known ones.
    fn from_advances(advance: impl Fn(u8, char) -> Option<f32>) -> Self {
        let advances: Vec<Option<f32>> = (FIRST_CODE..=0xFF)
            .map(|code| decode_char(code).and_then(|c| advance(code, c)))
            .collect();

        let known: Vec<f32> = advances.iter().flatten().copied().collect();
        let fallback = if known.is_empty() {
            0.5
        } else {
            known.iter().sum::<f32>() / known.len() as f32
        };

        let mut widths = [fallback; TABLE_LEN];
        for (slot, width) in widths.iter_mut().zip(&advances) {
            if let Some(w) = width {
                *slot = *w;
            }
        }

        Self {
            space_width: widths[0],
            widths,
        }
    }

    fn code_width(&self, code: u8) -> f32 {
        self.widths[(code - FIRST_CODE) as usize]
    }

    /// Width of one character in em units, matching what `encode_winansi` emits.
    pub fn char_width(&self, c: char) -> f32 {
        self.code_width(encode_char(c).unwrap_or(b'?'))
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Widths in thousandths of an em for codes 0x20..=0xFF, as the PDF `/Widths` array wants them.
    pub fn pdf_widths(&self) -> impl Iterator<Item = f32> + '_ {
        self.widths.iter().map(|w| (w * 1000.0).round())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables (base-14 AFM, ASCII 0x20..=0x7E, thousandths of an em)
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
static HELVETICA_ASCII: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_ASCII: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

/// Punctuation above 0x7F that actually shows up in news copy: `(code, regular, bold)`.
#[rustfmt::skip]
static HELVETICA_EXTRAS: [(u8, u16, u16); 15] = [
    (0x80, 556, 556),   // €
    (0x85, 1000, 1000), // …
    (0x91, 222, 278),   // ‘
    (0x92, 222, 278),   // ’
    (0x93, 333, 500),   // “
    (0x94, 333, 500),   // ”
    (0x95, 350, 350),   // •
    (0x96, 556, 556),   // –
    (0x97, 1000, 1000), // —
    (0x99, 1000, 1000), // ™
    (0xA0, 278, 278),   // nbsp
    (0xA3, 556, 556),   // £
    (0xA9, 737, 737),   // ©
    (0xB0, 400, 400),   // °
    (0xB7, 278, 278),   // ·
];

fn standard_advance(code: u8, bold: bool) -> Option<u16> {
    let ascii = if bold {
        &HELVETICA_BOLD_ASCII
    } else {
        &HELVETICA_ASCII
    };
    match code {
        0x20..=0x7E => Some(ascii[(code - FIRST_CODE) as usize]),
        0xD7 | 0xF7 => Some(584), // × ÷
        0xEC..=0xEF => Some(278), // ì í î ï
        0xE7 => Some(if bold { 556 } else { 500 }), // ç
        0xC0..=0xDE => Some(if bold { 722 } else { 667 }),
        0xDF..=0xFF => Some(if bold { 611 } else { 556 }),
        _ => HELVETICA_EXTRAS
            .iter()
            .find(|entry| entry.0 == code)
            .map(|&(_, regular, heavy)| if bold { heavy } else { regular }),
    }
}

fn standard_table(bold: bool) -> FontMetricTable {
    FontMetricTable::from_advances(|code, _| standard_advance(code, bold).map(|w| w as f32 / 1000.0))
}

// ────────────────────────────────────────────────────────────────────────────
// Registry
// ────────────────────────────────────────────────────────────────────────────

/// An embeddable TrueType program plus the descriptor values the PDF needs.
#[derive(Debug, Clone)]
pub struct TrueTypeProgram {
    pub postscript_name: String,
    pub data: Vec<u8>,
    /// Thousandths of an em.
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
}

#[derive(Debug, Clone)]
pub enum FontProgram {
    /// One of the PDF base-14 fonts; nothing is embedded.
    Standard { base_font: &'static str },
    TrueType(TrueTypeProgram),
}

#[derive(Debug, Clone)]
pub struct FontFace {
    pub family: FontFamily,
    pub metrics: FontMetricTable,
    pub program: FontProgram,
}

/// The four loaded faces, one per `FontFamily`.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    faces: Vec<FontFace>,
}

impl FontRegistry {
    /// Loads the Montserrat set from `fonts_dir` when configured, otherwise the built-in set.
    pub fn load(fonts_dir: Option<&Path>) -> Result<Self, RenderError> {
        match fonts_dir {
            Some(dir) => Self::from_dir(dir),
            None => Ok(Self::builtin()),
        }
    }

    /// Base-14 Helvetica faces. Always available.
    pub fn builtin() -> Self {
        let faces = FontFamily::ALL
            .iter()
            .map(|&family| {
                let bold = matches!(family, FontFamily::Bold | FontFamily::SemiBold);
                FontFace {
                    family,
                    metrics: standard_table(bold),
                    program: FontProgram::Standard {
                        base_font: family.standard_font(),
                    },
                }
            })
            .collect();
        Self { faces }
    }

    /// Loads `Montserrat-*.ttf` from a directory.
    ///
    /// A family whose file is missing or unreadable borrows the first face that
    /// did load. Fails only when no face loads at all.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let loaded: Vec<Option<FontFace>> = FontFamily::ALL
            .iter()
            .map(|&family| match load_true_type(family, &dir.join(family.file_name())) {
                Ok(face) => {
                    debug!(font = family.file_name(), "Registered font");
                    Some(face)
                }
                Err(e) => {
                    error!(font = family.file_name(), error = %e, "Could not register font");
                    None
                }
            })
            .collect();

        let Some(fallback) = loaded.iter().flatten().next().cloned() else {
            return Err(RenderError::FontsUnavailable {
                dir: dir.to_path_buf(),
                expected: FontFamily::ALL
                    .iter()
                    .map(|f| f.file_name())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };

        let faces = FontFamily::ALL
            .iter()
            .zip(loaded)
            .map(|(&family, face)| {
                face.unwrap_or_else(|| {
                    warn!(
                        missing = family.file_name(),
                        substitute = fallback.family.file_name(),
                        "Substituting font"
                    );
                    FontFace {
                        family,
                        ..fallback.clone()
                    }
                })
            })
            .collect();

        info!(dir = %dir.display(), "Loaded page fonts");
        Ok(Self { faces })
    }

    pub fn face(&self, family: FontFamily) -> &FontFace {
        &self.faces[family.index()]
    }

    pub fn metrics(&self, family: FontFamily) -> &FontMetricTable {
        &self.face(family).metrics
    }

    pub fn faces(&self) -> impl Iterator<Item = &FontFace> {
        self.faces.iter()
    }
}

fn load_true_type(family: FontFamily, path: &Path) -> Result<FontFace, RenderError> {
    let data = std::fs::read(path).map_err(|source| RenderError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;

    let font = fontdue::Font::from_bytes(data.as_slice(), fontdue::FontSettings::default())
        .map_err(|reason| RenderError::FontParse {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })?;

    let metrics = FontMetricTable::from_advances(|_, c| {
        let glyph = font.lookup_glyph_index(c);
        (glyph != 0).then(|| font.metrics_indexed(glyph, 1000.0).advance_width / 1000.0)
    });

    let (ascent, descent) = font
        .horizontal_line_metrics(1000.0)
        .map(|m| (m.ascent, m.descent))
        .unwrap_or((800.0, -200.0));

    let postscript_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(family.file_name())
        .to_string();

    Ok(FontFace {
        family,
        metrics,
        program: FontProgram::TrueType(TrueTypeProgram {
            postscript_name,
            data,
            ascent,
            descent,
            cap_height: ascent * 0.9,
        }),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
