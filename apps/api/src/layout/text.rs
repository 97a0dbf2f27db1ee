//! Greedy line breaking over styled words.
//!
//! A paragraph is measured once into [`Word`]s, whose widths do not depend on the frame.
//! Lines are then broken for a given width, so a paragraph split across frames of
//! different widths can be re-broken from any word.

use super::font_metrics::{win_ansi_byte, FontStyle};
use super::fonts::{FontHandle, FontRegistry};
use super::markup::Run;
use super::style::{Color, ParagraphStyle};
use super::RenderError;

/// A stretch of a word drawn in one font and color.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub text: String,
    pub font: FontHandle,
    pub size: f32,
    pub color: Color,
    pub link: Option<String>,
    pub width: f32,
}

/// Text between two whitespace boundaries. Styling may change mid-word.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub pieces: Vec<Piece>,
    pub width: f32,
    /// Width of the space drawn before this word when it does not start a line.
    pub space_width: f32,
}

/// Words `start..end` of a paragraph, `width` points wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: usize,
    pub end: usize,
    pub width: f32,
}

/// A positioned piece of text on a line, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub font: FontHandle,
    pub size: f32,
    pub color: Color,
    pub link: Option<String>,
    /// Offset from the line start.
    pub x: f32,
    pub width: f32,
}

impl Fragment {
    fn continues_with(&self, piece: &Piece) -> bool {
        self.font == piece.font
            && self.size == piece.size
            && self.color == piece.color
            && self.link == piece.link
    }
}

/// Measures runs into words using the paragraph's family and size.
///
/// Fails with `UnsupportedCharacter` on the first character the built-in fonts cannot draw.
pub fn tokenize(
    runs: &[Run],
    style: &ParagraphStyle,
    fonts: &FontRegistry,
) -> Result<Vec<Word>, RenderError> {
    let mut words: Vec<Word> = Vec::new();
    let mut current: Vec<Piece> = Vec::new();

    for run in runs {
        let font = fonts.resolve(
            style.family,
            FontStyle::from_flags(style.bold || run.bold, run.italic),
        )?;
        let color = run.color.unwrap_or(style.color);
        for c in run.text.chars() {
            if c.is_whitespace() && c != '\u{00A0}' {
                finish_word(&mut words, &mut current);
                continue;
            }
            if win_ansi_byte(c).is_none() {
                return Err(RenderError::unsupported(c));
            }
            match current.last_mut() {
                Some(piece) if piece.font == font && piece.color == color && piece.link == run.link => {
                    piece.text.push(c);
                }
                _ => current.push(Piece {
                    text: c.to_string(),
                    font,
                    size: style.size,
                    color,
                    link: run.link.clone(),
                    width: 0.0,
                }),
            }
        }
    }
    finish_word(&mut words, &mut current);
    Ok(words)
}

fn finish_word(words: &mut Vec<Word>, current: &mut Vec<Piece>) {
    if current.is_empty() {
        return;
    }
    let mut pieces = std::mem::take(current);
    for piece in &mut pieces {
        piece.width = piece.font.width(&piece.text, piece.size);
    }
    let width = pieces.iter().map(|p| p.width).sum();
    let space_width = pieces[0].font.metrics.space_width * pieces[0].size;
    words.push(Word {
        pieces,
        width,
        space_width,
    });
}

/// Breaks words into lines no wider than `max_width`.
///
/// Fails with `BlockTooWide` when a single word cannot fit on a line by itself.
pub fn break_lines(words: &[Word], max_width: f32) -> Result<Vec<Line>, RenderError> {
    let mut lines: Vec<Line> = Vec::new();
    let mut start = 0;
    let mut current_width = 0.0_f32;

    for (i, word) in words.iter().enumerate() {
        if word.width > max_width + f32::EPSILON {
            return Err(RenderError::BlockTooWide {
                width: word.width,
                available: max_width,
            });
        }
        let first_on_line = i == start;
        let space_w = if first_on_line { 0.0 } else { word.space_width };

        if !first_on_line && current_width + space_w + word.width > max_width {
            lines.push(Line {
                start,
                end: i,
                width: current_width,
            });
            start = i;
            current_width = word.width;
        } else {
            current_width += space_w + word.width;
        }
    }
    if start < words.len() {
        lines.push(Line {
            start,
            end: words.len(),
            width: current_width,
        });
    }
    Ok(lines)
}

/// Positions the words of one line, merging neighbours that share a style.
pub fn line_fragments(words: &[Word], line: &Line) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut x = 0.0_f32;

    for (i, word) in words[line.start..line.end].iter().enumerate() {
        let mut gap = 0.0;
        if i > 0 {
            gap = word.space_width;
            x += gap;
        }
        for (j, piece) in word.pieces.iter().enumerate() {
            let joins_previous = fragments.last().is_some_and(|last| last.continues_with(piece));
            match fragments.last_mut() {
                Some(last) if joins_previous => {
                    if j == 0 && gap > 0.0 {
                        last.text.push(' ');
                    }
                    last.text.push_str(&piece.text);
                    last.width = x + piece.width - last.x;
                }
                _ => fragments.push(Fragment {
                    text: piece.text.clone(),
                    font: piece.font,
                    size: piece.size,
                    color: piece.color,
                    link: piece.link.clone(),
                    x,
                    width: piece.width,
                }),
            }
            x += piece.width;
        }
    }
    fragments
}
