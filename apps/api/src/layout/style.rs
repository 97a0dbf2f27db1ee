//! Paragraph styles and colors.

use super::font_metrics::FontFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xFFFFFF);

    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Parses `#RRGGBB` or one of the few named colors markup may use.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            return u32::from_str_radix(hex, 16).ok().map(Color::hex);
        }
        #[rustfmt::skip]
        let named = match value.to_ascii_lowercase().as_str() {
            "black"    => 0x000000,
            "white"    => 0xFFFFFF,
            "blue"     => 0x0000FF,
            "darkblue" => 0x00008B,
            "navy"     => 0x000080,
            "gray" | "grey" => 0x808080,
            "red"      => 0xFF0000,
            _ => return None,
        };
        Some(Color::hex(named))
    }

    /// RGB components in the 0..=1 range used by PDF color operators.
    pub fn components(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// What a paragraph is for. Only `SectionHeading` changes behavior (heading discovery);
/// the rest label styles for readers of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Name,
    Title,
    Meta,
    Body,
    SectionHeading,
}

/// Tinted background behind a paragraph, with an optional accent bar on the left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub background: Color,
    pub accent: Option<(f32, Color)>,
    pub padding_left: f32,
    pub padding_vertical: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub role: TextRole,
    pub family: FontFamily,
    pub bold: bool,
    pub size: f32,
    pub leading: f32,
    pub color: Color,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub band: Option<Band>,
}

impl ParagraphStyle {
    pub fn new(role: TextRole, family: FontFamily, size: f32, leading: f32, color: Color) -> Self {
        Self {
            role,
            family,
            bold: false,
            size,
            leading,
            color,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            band: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn indent(mut self, left: f32) -> Self {
        self.left_indent = left;
        self
    }

    pub fn band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }
}
