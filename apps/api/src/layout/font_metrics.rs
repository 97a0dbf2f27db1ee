//! Static font-metric tables for the PDF base fonts that back each résumé font family.
//!
//! Character widths are in em units (relative to font size), taken from the Adobe core
//! font metrics. The renderer only emits base-14 fonts, so wrapping with these tables
//! matches what a PDF viewer draws. Italic faces reuse the upright widths; the error is
//! well under one character per line.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / style enums
// ────────────────────────────────────────────────────────────────────────────

/// Logical font families referenced by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontFamily {
    /// Simple headings, Elegant body text.
    Roboto,
    /// Simple and Vibrant body text.
    SourceSans,
    /// Elegant name and section headings.
    Merriweather,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [
        FontFamily::Roboto,
        FontFamily::SourceSans,
        FontFamily::Merriweather,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Regular,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Regular,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (true, true) => FontStyle::BoldItalic,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a PDF base font.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
#[derive(Debug)]
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for encodable characters without an explicit entry.
    pub average_char_width: f32,
    pub space_width: f32,
    pub en_dash_width: f32,
    pub em_dash_width: f32,
    pub middle_dot_width: f32,
}

impl FontMetricTable {
    /// Width of a single character in em units.
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '\u{2013}' => self.en_dash_width,
            '\u{2014}' => self.em_dash_width,
            '\u{00B7}' | '\u{2022}' => self.middle_dot_width,
            '\u{00A0}' => self.space_width,
            _ => accent_base(c).map_or(self.average_char_width, |base| self.char_width(base)),
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// The 0x80..=0x9F block of WinAnsiEncoding (CP1252); the rest of the byte range is Latin-1.
#[rustfmt::skip]
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80), ('\u{201A}', 0x82), ('\u{0192}', 0x83), ('\u{201E}', 0x84),
    ('\u{2026}', 0x85), ('\u{2020}', 0x86), ('\u{2021}', 0x87), ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89), ('\u{0160}', 0x8A), ('\u{2039}', 0x8B), ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E), ('\u{2018}', 0x91), ('\u{2019}', 0x92), ('\u{201C}', 0x93),
    ('\u{201D}', 0x94), ('\u{2022}', 0x95), ('\u{2013}', 0x96), ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98), ('\u{2122}', 0x99), ('\u{0161}', 0x9A), ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C), ('\u{017E}', 0x9E), ('\u{0178}', 0x9F),
];

/// WinAnsiEncoding byte for `c`, or `None` when the base-14 faces have no glyph for it.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find_map(|&(ch, byte)| (ch == c).then_some(byte)),
    }
}

/// Unaccented letters for U+00C0..=U+00FF; `.` marks characters with no single base letter.
const LATIN1_BASE: &[u8; 64] =
    b"AAAAAA.CEEEEIIIIDNOOOOO.OUUUUY..aaaaaa.ceeeeiiii.nooooo.ouuuuy.y";

/// ASCII letter an accented letter shares its advance width with.
fn accent_base(c: char) -> Option<char> {
    match c {
        '\u{C0}'..='\u{FF}' => {
            let base = LATIN1_BASE[c as usize - 0xC0];
            (base != b'.').then_some(base as char)
        }
        '\u{0160}' => Some('S'),
        '\u{0161}' => Some('s'),
        '\u{017D}' => Some('Z'),
        '\u{017E}' => Some('z'),
        '\u{0178}' => Some('Y'),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica: backs Roboto and SourceSans (regular and oblique).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
    en_dash_width: 0.556,
    em_dash_width: 1.0,
    middle_dot_width: 0.278,
};

/// Helvetica-Bold: backs bold Roboto and SourceSans.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
    en_dash_width: 0.556,
    em_dash_width: 1.0,
    middle_dot_width: 0.278,
};

/// Times-Roman: backs Merriweather (regular and italic).
static TIMES_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.500,
    space_width: 0.250,
    en_dash_width: 0.500,
    em_dash_width: 1.0,
    middle_dot_width: 0.250,
};

/// Times-Bold: backs bold Merriweather.
static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.555, 0.500, 0.500, 1.000, 0.833, 0.278, 0.333, 0.333, 0.500, 0.570, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.570, 0.570, 0.570, 0.500, 0.930,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.778, 0.389, 0.500, 0.778, 0.667, 0.944,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.611, 0.778, 0.722, 0.556, 0.667, 0.722, 0.722, 1.000, 0.722, 0.722, 0.667,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.581, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.500, 0.556, 0.444, 0.556, 0.444, 0.333, 0.500, 0.556, 0.278, 0.333, 0.556, 0.278, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.500, 0.556, 0.556, 0.444, 0.389, 0.333, 0.556, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.394, 0.220, 0.394, 0.520,
    ],
    average_char_width: 0.540,
    space_width: 0.250,
    en_dash_width: 0.500,
    em_dash_width: 1.0,
    middle_dot_width: 0.250,
};

/// Returns the PDF base font name for a family and style.
pub fn base_font(family: FontFamily, style: FontStyle) -> &'static str {
    match (family, style) {
        (FontFamily::Roboto | FontFamily::SourceSans, FontStyle::Regular) => "Helvetica",
        (FontFamily::Roboto | FontFamily::SourceSans, FontStyle::Bold) => "Helvetica-Bold",
        (FontFamily::Roboto | FontFamily::SourceSans, FontStyle::Italic) => "Helvetica-Oblique",
        (FontFamily::Roboto | FontFamily::SourceSans, FontStyle::BoldItalic) => {
            "Helvetica-BoldOblique"
        }
        (FontFamily::Merriweather, FontStyle::Regular) => "Times-Roman",
        (FontFamily::Merriweather, FontStyle::Bold) => "Times-Bold",
        (FontFamily::Merriweather, FontStyle::Italic) => "Times-Italic",
        (FontFamily::Merriweather, FontStyle::BoldItalic) => "Times-BoldItalic",
    }
}

/// Returns the static metric table for a family and style.
pub fn get_metrics(family: FontFamily, style: FontStyle) -> &'static FontMetricTable {
    match (family, style.is_bold()) {
        (FontFamily::Roboto | FontFamily::SourceSans, false) => &HELVETICA_TABLE,
        (FontFamily::Roboto | FontFamily::SourceSans, true) => &HELVETICA_BOLD_TABLE,
        (FontFamily::Merriweather, false) => &TIMES_TABLE,
        (FontFamily::Merriweather, true) => &TIMES_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Roboto, FontStyle::Regular);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFamily::SourceSans, FontStyle::Regular);
        // "Acme" = A(0.667) + c(0.500) + m(0.833) + e(0.556) = 2.556
        let width = metrics.measure_str("Acme");
        assert!((width - 2.556).abs() < 1e-3, "Acme width should be ~2.556, got {width}");
    }

    #[test]
    fn test_dashes_have_explicit_widths() {
        let metrics = get_metrics(FontFamily::Merriweather, FontStyle::Regular);
        assert_eq!(metrics.char_width('–'), 0.5);
        assert_eq!(metrics.char_width('—'), 1.0);
    }

    #[test]
    fn test_accented_letters_measure_like_their_base() {
        let metrics = get_metrics(FontFamily::Roboto, FontStyle::Regular);
        assert_eq!(metrics.char_width('é'), metrics.char_width('e'));
        assert_eq!(metrics.char_width('Ö'), metrics.char_width('O'));
        assert_eq!(metrics.char_width('š'), metrics.char_width('s'));
        assert_eq!(metrics.char_width('Æ'), metrics.average_char_width);
    }

    #[test]
    fn test_win_ansi_bytes() {
        assert_eq!(win_ansi_byte('a'), Some(b'a'));
        assert_eq!(win_ansi_byte('é'), Some(0xE9));
        assert_eq!(win_ansi_byte('€'), Some(0x80));
        assert_eq!(win_ansi_byte('Ž'), Some(0x8E));
        assert_eq!(win_ansi_byte('–'), Some(0x96));
        assert_eq!(win_ansi_byte('Ł'), None);
        assert_eq!(win_ansi_byte('ć'), None);
        assert_eq!(win_ansi_byte('\u{7F}'), None);
        assert_eq!(win_ansi_byte('日'), None);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior Platform Engineer";
        let regular = get_metrics(FontFamily::Roboto, FontStyle::Regular).measure_str(text);
        let bold = get_metrics(FontFamily::Roboto, FontStyle::Bold).measure_str(text);
        assert!(bold > regular);
    }

    #[test]
    fn test_serif_family_maps_to_times() {
        assert_eq!(base_font(FontFamily::Merriweather, FontStyle::Bold), "Times-Bold");
        assert_eq!(base_font(FontFamily::SourceSans, FontStyle::Italic), "Helvetica-Oblique");
    }
}
