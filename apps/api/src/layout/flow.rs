//! Flow engine: places a story of blocks into the frames of successive pages.
//!
//! # Rules
//! - Frames fill top to bottom, in geometry order; then a new page starts.
//! - Paragraphs split between lines. Banded paragraphs, rules and grid rows stay whole.
//! - A spacer that does not fit fills the rest of the frame and is otherwise dropped.
//! - `FrameBreak` jumps to the next frame (or page). `FrameBreakTo` jumps to a named frame
//!   and stays put when the flow already sits in it.
//! - `NextPageGeometry` picks the geometry of every page created after it.
//! - `Fill` grid columns are sized against the frame the grid is in.
//!
//! Output is a list of pages holding absolute drawing operations for the PDF writer.

use tracing::trace;

use super::blocks::{CellPadding, Grid, GridRow, LayoutBlock, Paragraph, Rule};
use super::fonts::{FontHandle, FontRegistry};
use super::geometry::{Frame, PageGeometry};
use super::markup;
use super::style::{Color, ParagraphStyle};
use super::text::{self, Line, Word};
use super::{RenderError, MAX_PAGES};

const EPS: f32 = 0.01;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        font: FontHandle,
        size: f32,
        color: Color,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        uri: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPage {
    pub geometry: String,
    pub ops: Vec<DrawOp>,
}

impl PlacedPage {
    /// All text drawn on the page, in drawing order.
    pub fn text(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Paginates `story` over `geometries`, starting on the first geometry.
pub fn paginate(
    story: &[LayoutBlock],
    geometries: &[PageGeometry],
    fonts: &FontRegistry,
) -> Result<Vec<PlacedPage>, RenderError> {
    let mut flow = Flow::new(geometries, fonts)?;
    for block in story {
        flow.place(block)?;
    }
    Ok(flow.pages)
}

// ────────────────────────────────────────────────────────────────────────────
// Measured content
// ────────────────────────────────────────────────────────────────────────────

/// A paragraph measured for one width.
struct Measured {
    words: Vec<Word>,
    lines: Vec<Line>,
}

fn measure_paragraph(
    paragraph: &Paragraph,
    width: f32,
    fonts: &FontRegistry,
) -> Result<Measured, RenderError> {
    let runs = markup::parse(&paragraph.markup)?;
    let words = text::tokenize(&runs, &paragraph.style, fonts)?;
    let lines = text::break_lines(&words, text_width(&paragraph.style, width))?;
    Ok(Measured { words, lines })
}

fn text_width(style: &ParagraphStyle, width: f32) -> f32 {
    let band_pad = style.band.map_or(0.0, |b| b.padding_left);
    width - style.left_indent - band_pad
}

fn paragraph_height(style: &ParagraphStyle, line_count: usize) -> f32 {
    let band_pad = style.band.map_or(0.0, |b| 2.0 * b.padding_vertical);
    style.space_before + band_pad + line_count as f32 * style.leading + style.space_after
}

// ────────────────────────────────────────────────────────────────────────────
// Painting (position-only, no flow state)
// ────────────────────────────────────────────────────────────────────────────

/// Draws `lines` with the first line's top edge at `top`.
fn paint_lines(
    ops: &mut Vec<DrawOp>,
    words: &[Word],
    lines: &[Line],
    style: &ParagraphStyle,
    x: f32,
    top: f32,
) {
    for (i, line) in lines.iter().enumerate() {
        let line_top = top - i as f32 * style.leading;
        let baseline = line_top - (style.leading - style.size) / 2.0 - style.size * 0.8;
        for frag in text::line_fragments(words, line) {
            let frag_x = x + frag.x;
            if let Some(uri) = &frag.link {
                ops.push(DrawOp::Link {
                    x: frag_x,
                    y: baseline - frag.size * 0.2,
                    width: frag.width,
                    height: frag.size,
                    uri: uri.clone(),
                });
            }
            ops.push(DrawOp::Text {
                x: frag_x,
                baseline,
                font: frag.font,
                size: frag.size,
                color: frag.color,
                text: frag.text,
            });
        }
    }
}

/// Draws a whole paragraph, band included, inside a box of `width` whose top is `top`.
fn paint_paragraph(
    ops: &mut Vec<DrawOp>,
    measured: &Measured,
    style: &ParagraphStyle,
    x: f32,
    width: f32,
    top: f32,
) {
    let mut text_top = top - style.space_before;
    let mut text_x = x + style.left_indent;
    if let Some(band) = style.band {
        let height = 2.0 * band.padding_vertical + measured.lines.len() as f32 * style.leading;
        ops.push(DrawOp::FillRect {
            x,
            y: text_top - height,
            width,
            height,
            color: band.background,
        });
        if let Some((bar_width, bar_color)) = band.accent {
            ops.push(DrawOp::Line {
                x1: x + bar_width / 2.0,
                y1: text_top,
                x2: x + bar_width / 2.0,
                y2: text_top - height,
                width: bar_width,
                color: bar_color,
            });
        }
        text_top -= band.padding_vertical;
        text_x += band.padding_left;
    }
    paint_lines(ops, &measured.words, &measured.lines, style, text_x, text_top);
}

fn paint_rule(ops: &mut Vec<DrawOp>, rule: &Rule, x: f32, width: f32, top: f32) {
    let y = top - rule.space_before - rule.thickness / 2.0;
    ops.push(DrawOp::Line {
        x1: x,
        y1: y,
        x2: x + width,
        y2: y,
        width: rule.thickness,
        color: rule.color,
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Grid cells
// ────────────────────────────────────────────────────────────────────────────

enum CellItem<'a> {
    Text(Measured, &'a ParagraphStyle),
    Gap(f32),
    Rule(&'a Rule),
}

impl CellItem<'_> {
    fn height(&self) -> f32 {
        match self {
            CellItem::Text(m, style) => paragraph_height(style, m.lines.len()),
            CellItem::Gap(h) => *h,
            CellItem::Rule(rule) => rule.height(),
        }
    }
}

struct MeasuredRow<'a> {
    cells: Vec<Vec<CellItem<'a>>>,
    height: f32,
}

fn measure_row<'a>(
    row: &'a GridRow,
    col_widths: &[f32],
    padding: CellPadding,
    fonts: &FontRegistry,
) -> Result<MeasuredRow<'a>, RenderError> {
    let mut cells = Vec::with_capacity(row.cells.len());
    let mut content_height = 0.0_f32;
    for (cell, col_width) in row.cells.iter().zip(col_widths) {
        let inner = col_width - padding.left - padding.right;
        let mut items = Vec::with_capacity(cell.len());
        for block in cell {
            let item = match block {
                LayoutBlock::Paragraph(p) => {
                    CellItem::Text(measure_paragraph(p, inner, fonts)?, &p.style)
                }
                LayoutBlock::Spacer(h) => CellItem::Gap(*h),
                LayoutBlock::Rule(rule) => CellItem::Rule(rule),
                LayoutBlock::FrameBreak
                | LayoutBlock::FrameBreakTo(_)
                | LayoutBlock::NextPageGeometry(_)
                | LayoutBlock::Grid(_) => return Err(RenderError::ControlBlockInCell),
            };
            items.push(item);
        }
        content_height = content_height.max(items.iter().map(CellItem::height).sum());
        cells.push(items);
    }
    Ok(MeasuredRow {
        cells,
        height: padding.top + content_height + padding.bottom,
    })
}

fn paint_row(
    ops: &mut Vec<DrawOp>,
    row: &MeasuredRow<'_>,
    col_widths: &[f32],
    padding: CellPadding,
    x: f32,
    top: f32,
) {
    let mut cell_x = x;
    for (items, col_width) in row.cells.iter().zip(col_widths) {
        let inner_x = cell_x + padding.left;
        let inner_w = col_width - padding.left - padding.right;
        let mut y = top - padding.top;
        for item in items {
            match item {
                CellItem::Text(measured, style) => {
                    paint_paragraph(ops, measured, style, inner_x, inner_w, y)
                }
                CellItem::Gap(_) => {}
                CellItem::Rule(rule) => paint_rule(ops, rule, inner_x, inner_w, y),
            }
            y -= item.height();
        }
        cell_x += col_width;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flow state
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'a> {
    geometries: &'a [PageGeometry],
    fonts: &'a FontRegistry,
    pages: Vec<PlacedPage>,
    geometry: usize,
    next_geometry: usize,
    frame: usize,
    /// Height already used in the current frame, measured from its top.
    used: f32,
}

impl<'a> Flow<'a> {
    fn new(geometries: &'a [PageGeometry], fonts: &'a FontRegistry) -> Result<Self, RenderError> {
        let first = geometries
            .first()
            .ok_or_else(|| RenderError::EmptyGeometry(String::new()))?;
        if first.frames.is_empty() {
            return Err(RenderError::EmptyGeometry(first.id.clone()));
        }
        Ok(Self {
            geometries,
            fonts,
            pages: vec![PlacedPage {
                geometry: first.id.clone(),
                ops: Vec::new(),
            }],
            geometry: 0,
            next_geometry: 0,
            frame: 0,
            used: 0.0,
        })
    }

    fn current_frame(&self) -> &'a Frame {
        &self.geometries[self.geometry].frames[self.frame]
    }

    fn remaining(&self) -> f32 {
        self.current_frame().height - self.used
    }

    fn cursor_y(&self) -> f32 {
        self.current_frame().top() - self.used
    }

    fn is_fresh(&self) -> bool {
        self.used <= EPS
    }

    fn ops(&mut self) -> &mut Vec<DrawOp> {
        // `pages` always holds the current page.
        let last = self.pages.len() - 1;
        &mut self.pages[last].ops
    }

    fn consume(&mut self, height: f32) {
        self.used = (self.used + height).min(self.current_frame().height);
    }

    fn advance_frame(&mut self) -> Result<(), RenderError> {
        if self.frame + 1 < self.geometries[self.geometry].frames.len() {
            self.frame += 1;
        } else {
            self.new_page()?;
        }
        self.used = 0.0;
        Ok(())
    }

    fn advance_to(&mut self, id: &str) -> Result<(), RenderError> {
        let frames = &self.geometries[self.geometry].frames;
        if frames[self.frame].id == id {
            return Ok(());
        }
        match frames[self.frame + 1..].iter().position(|f| f.id == id) {
            Some(offset) => {
                self.frame += offset + 1;
                self.used = 0.0;
                Ok(())
            }
            None => self.advance_frame(),
        }
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        if self.pages.len() >= MAX_PAGES {
            return Err(RenderError::PageLimitExceeded);
        }
        let geometry = &self.geometries[self.next_geometry];
        if geometry.frames.is_empty() {
            return Err(RenderError::EmptyGeometry(geometry.id.clone()));
        }
        self.geometry = self.next_geometry;
        self.frame = 0;
        trace!(page = self.pages.len() + 1, geometry = %geometry.id, "new page");
        self.pages.push(PlacedPage {
            geometry: geometry.id.clone(),
            ops: Vec::new(),
        });
        Ok(())
    }

    fn place(&mut self, block: &LayoutBlock) -> Result<(), RenderError> {
        match block {
            LayoutBlock::Paragraph(p) if p.style.band.is_some() => self.place_whole_paragraph(p),
            LayoutBlock::Paragraph(p) => self.place_paragraph(p),
            LayoutBlock::Spacer(height) => {
                self.consume(*height);
                Ok(())
            }
            LayoutBlock::Rule(rule) => self.place_rule(rule),
            LayoutBlock::FrameBreak => self.advance_frame(),
            LayoutBlock::FrameBreakTo(id) => self.advance_to(id),
            LayoutBlock::NextPageGeometry(id) => {
                self.next_geometry = self
                    .geometries
                    .iter()
                    .position(|g| g.id == *id)
                    .ok_or_else(|| RenderError::UnknownGeometry(id.clone()))?;
                Ok(())
            }
            LayoutBlock::Grid(grid) => self.place_grid(grid),
        }
    }

    /// Makes room for an unsplittable block of `height`, moving on at most once.
    fn fit_whole(&mut self, height: impl Fn(&Self) -> Result<f32, RenderError>) -> Result<(), RenderError> {
        let h = height(self)?;
        if h <= self.remaining() + EPS {
            return Ok(());
        }
        if self.is_fresh() {
            return Err(RenderError::BlockTooTall {
                height: h,
                available: self.remaining(),
            });
        }
        self.advance_frame()?;
        let h = height(self)?;
        if h > self.remaining() + EPS {
            return Err(RenderError::BlockTooTall {
                height: h,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    fn place_rule(&mut self, rule: &Rule) -> Result<(), RenderError> {
        self.fit_whole(|_| Ok(rule.height()))?;
        let frame = self.current_frame();
        let top = self.cursor_y();
        paint_rule(self.ops(), rule, frame.x, frame.width, top);
        self.consume(rule.height());
        Ok(())
    }

    fn place_whole_paragraph(&mut self, paragraph: &Paragraph) -> Result<(), RenderError> {
        let fonts = self.fonts;
        self.fit_whole(|flow| {
            let m = measure_paragraph(paragraph, flow.current_frame().width, fonts)?;
            Ok(paragraph_height(&paragraph.style, m.lines.len()))
        })?;
        let frame = self.current_frame();
        let measured = measure_paragraph(paragraph, frame.width, fonts)?;
        let top = self.cursor_y();
        paint_paragraph(self.ops(), &measured, &paragraph.style, frame.x, frame.width, top);
        self.consume(paragraph_height(&paragraph.style, measured.lines.len()));
        Ok(())
    }

    fn place_paragraph(&mut self, paragraph: &Paragraph) -> Result<(), RenderError> {
        let style = &paragraph.style;
        let runs = markup::parse(&paragraph.markup)?;
        let words = text::tokenize(&runs, style, self.fonts)?;
        let mut rest: &[Word] = &words;
        let mut first = true;

        loop {
            let frame = self.current_frame();
            let lines = text::break_lines(rest, text_width(style, frame.width))?;
            let before = if first { style.space_before } else { 0.0 };

            if lines.is_empty() {
                self.consume(before + style.space_after);
                return Ok(());
            }

            let fit = ((self.remaining() - before + EPS) / style.leading).floor().max(0.0) as usize;
            if fit == 0 {
                if self.is_fresh() {
                    return Err(RenderError::BlockTooTall {
                        height: before + style.leading,
                        available: self.remaining(),
                    });
                }
                self.advance_frame()?;
                first = false;
                continue;
            }

            let take = fit.min(lines.len());
            let top = self.cursor_y() - before;
            paint_lines(self.ops(), rest, &lines[..take], style, frame.x + style.left_indent, top);
            self.consume(before + take as f32 * style.leading);

            if take == lines.len() {
                self.consume(style.space_after);
                return Ok(());
            }
            rest = &rest[lines[take].start..];
            first = false;
            self.advance_frame()?;
        }
    }

    fn place_grid(&mut self, grid: &Grid) -> Result<(), RenderError> {
        let fonts = self.fonts;
        self.check_grid_width(grid)?;
        for row in &grid.rows {
            loop {
                let frame = self.current_frame();
                let widths = grid.resolve_widths(frame.width);
                let measured = measure_row(row, &widths, grid.padding, fonts)?;
                if measured.height <= self.remaining() + EPS {
                    let top = self.cursor_y();
                    paint_row(self.ops(), &measured, &widths, grid.padding, frame.x, top);
                    self.consume(measured.height);
                    break;
                }
                if self.is_fresh() {
                    return Err(RenderError::BlockTooTall {
                        height: measured.height,
                        available: self.remaining(),
                    });
                }
                self.advance_frame()?;
                self.check_grid_width(grid)?;
            }
        }
        Ok(())
    }

    fn check_grid_width(&self, grid: &Grid) -> Result<(), RenderError> {
        let available = self.current_frame().width;
        if grid.fixed_width() > available + EPS {
            return Err(RenderError::BlockTooWide {
                width: grid.fixed_width(),
                available,
            });
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::{ColumnWidth, GridRow};
    use crate::layout::font_metrics::FontFamily;
    use crate::layout::fonts::FONTS;
    use crate::layout::style::{Band, TextRole};

    fn body() -> ParagraphStyle {
        ParagraphStyle::new(TextRole::Body, FontFamily::SourceSans, 10.0, 12.0, Color::BLACK)
    }

    fn single(width: f32, height: f32) -> Vec<PageGeometry> {
        vec![PageGeometry {
            id: "only".into(),
            frames: vec![Frame::new("f", 0.0, 0.0, width, height)],
        }]
    }

    fn para(text: &str) -> LayoutBlock {
        LayoutBlock::paragraph(text, &body())
    }

    #[test]
    fn test_empty_story_is_one_blank_page() {
        let pages = paginate(&[], &single(200.0, 200.0), &FONTS).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ops.is_empty());
    }

    #[test]
    fn test_paragraph_splits_across_pages_by_line() {
        // 5 lines of 12pt in a 30pt frame: 2 lines per page.
        let story = vec![para("aaa bbb ccc ddd eee")];
        let pages = paginate(&story, &single(25.0, 30.0), &FONTS).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].text(), vec!["aaa", "bbb"]);
        assert_eq!(pages[2].text(), vec!["eee"]);
    }

    #[test]
    fn test_text_is_drawn_inside_the_frame() {
        let geometries = vec![PageGeometry {
            id: "g".into(),
            frames: vec![Frame::new("f", 40.0, 100.0, 300.0, 200.0)],
        }];
        let pages = paginate(&[para("Hello")], &geometries, &FONTS).unwrap();
        match &pages[0].ops[0] {
            DrawOp::Text { x, baseline, .. } => {
                assert_eq!(*x, 40.0);
                assert!(*baseline < 300.0 && *baseline > 280.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_break_moves_to_next_frame_then_next_page() {
        let geometries = vec![PageGeometry {
            id: "two".into(),
            frames: vec![
                Frame::new("left", 0.0, 0.0, 100.0, 100.0),
                Frame::new("right", 100.0, 0.0, 100.0, 100.0),
            ],
        }];
        let story = vec![
            para("one"),
            LayoutBlock::FrameBreak,
            para("two"),
            LayoutBlock::FrameBreak,
            para("three"),
        ];
        let pages = paginate(&story, &geometries, &FONTS).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text(), vec!["one", "two"]);
        assert_eq!(pages[1].text(), vec!["three"]);
    }

    fn three_frames() -> Vec<PageGeometry> {
        vec![PageGeometry {
            id: "cols".into(),
            frames: vec![
                Frame::new("header", 0.0, 100.0, 200.0, 12.0),
                Frame::new("left", 0.0, 0.0, 100.0, 100.0),
                Frame::new("right", 100.0, 0.0, 100.0, 100.0),
            ],
        }]
    }

    fn x_of(page: &PlacedPage, needle: &str) -> Option<f32> {
        page.ops.iter().find_map(|op| match op {
            DrawOp::Text { x, text, .. } if text == needle => Some(*x),
            _ => None,
        })
    }

    #[test]
    fn test_frame_break_to_jumps_ahead_to_named_frame() {
        let story = vec![
            para("head"),
            LayoutBlock::FrameBreakTo("left".into()),
            para("side"),
            LayoutBlock::FrameBreakTo("right".into()),
            para("main"),
        ];
        let pages = paginate(&story, &three_frames(), &FONTS).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(x_of(&pages[0], "side"), Some(0.0));
        assert_eq!(x_of(&pages[0], "main"), Some(100.0));
    }

    #[test]
    fn test_frame_break_to_current_frame_stays_put() {
        // Two lines overflow the 12pt header, so the flow is already in `left`.
        let story = vec![
            para("aaa bbb"),
            LayoutBlock::FrameBreakTo("left".into()),
            para("side"),
            LayoutBlock::FrameBreak,
            para("main"),
        ];
        let mut geometries = three_frames();
        geometries[0].frames[0].width = 25.0;
        let pages = paginate(&story, &geometries, &FONTS).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(x_of(&pages[0], "bbb"), Some(0.0));
        assert_eq!(x_of(&pages[0], "side"), Some(0.0));
        assert_eq!(x_of(&pages[0], "main"), Some(100.0));
    }

    #[test]
    fn test_frame_break_to_frame_behind_starts_new_page() {
        let story = vec![
            LayoutBlock::FrameBreakTo("right".into()),
            para("a"),
            LayoutBlock::FrameBreakTo("left".into()),
            para("b"),
        ];
        let pages = paginate(&story, &three_frames(), &FONTS).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].text(), vec!["b"]);
    }

    #[test]
    fn test_next_page_geometry_applies_to_later_pages() {
        let geometries = vec![
            PageGeometry {
                id: "first".into(),
                frames: vec![Frame::new("f", 0.0, 0.0, 100.0, 100.0)],
            },
            PageGeometry {
                id: "next".into(),
                frames: vec![Frame::new("f", 0.0, 0.0, 200.0, 100.0)],
            },
        ];
        let story = vec![
            LayoutBlock::NextPageGeometry("next".into()),
            para("a"),
            LayoutBlock::FrameBreak,
            para("b"),
        ];
        let pages = paginate(&story, &geometries, &FONTS).unwrap();
        assert_eq!(pages[0].geometry, "first");
        assert_eq!(pages[1].geometry, "next");
    }

    #[test]
    fn test_unknown_geometry_fails() {
        let story = vec![LayoutBlock::NextPageGeometry("nope".into())];
        let err = paginate(&story, &single(100.0, 100.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::UnknownGeometry(id) if id == "nope"));
    }

    #[test]
    fn test_overwide_word_fails_with_block_too_wide() {
        let story = vec![para("Incomprehensibilities")];
        let err = paginate(&story, &single(30.0, 100.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::BlockTooWide { .. }));
    }

    #[test]
    fn test_line_taller_than_empty_frame_fails() {
        let err = paginate(&[para("x")], &single(100.0, 5.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::BlockTooTall { .. }));
    }

    #[test]
    fn test_spacer_that_does_not_fit_is_dropped() {
        let story = vec![para("a"), LayoutBlock::Spacer(500.0), para("b")];
        let pages = paginate(&story, &single(100.0, 50.0), &FONTS).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].text(), vec!["b"]);
    }

    #[test]
    fn test_grid_rows_are_kept_whole_and_split_between_rows() {
        let row = |label: &str| GridRow {
            cells: vec![vec![para(label)], vec![para("x"), para("y")]],
        };
        let grid = LayoutBlock::Grid(Grid {
            col_widths: vec![ColumnWidth::Fixed(40.0), ColumnWidth::Fixed(60.0)],
            rows: vec![row("r1"), row("r2"), row("r3")],
            padding: CellPadding::default(),
        });
        // Each row is 24pt tall; a 50pt frame holds two.
        let pages = paginate(&[grid], &single(100.0, 50.0), &FONTS).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text(), vec!["r1", "x", "y", "r2", "x", "y"]);
        assert_eq!(pages[1].text(), vec!["r3", "x", "y"]);
    }

    #[test]
    fn test_grid_wider_than_frame_fails() {
        let grid = LayoutBlock::Grid(Grid {
            col_widths: vec![ColumnWidth::Fixed(80.0), ColumnWidth::Fixed(80.0)],
            rows: vec![],
            padding: CellPadding::default(),
        });
        let err = paginate(&[grid], &single(100.0, 100.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::BlockTooWide { .. }));
    }

    #[test]
    fn test_fill_column_reaches_the_frame_edge() {
        let rule = Rule {
            thickness: 1.0,
            color: Color::BLACK,
            space_before: 0.0,
            space_after: 0.0,
        };
        let grid = LayoutBlock::Grid(Grid {
            col_widths: vec![ColumnWidth::Fixed(40.0), ColumnWidth::Fill],
            rows: vec![GridRow {
                cells: vec![vec![para("k")], vec![LayoutBlock::Rule(rule)]],
            }],
            padding: CellPadding::default(),
        });
        for width in [100.0, 160.0] {
            let pages = paginate(std::slice::from_ref(&grid), &single(width, 50.0), &FONTS).unwrap();
            let x2 = pages[0].ops.iter().find_map(|op| match op {
                DrawOp::Line { x1, x2, .. } => Some((*x1, *x2)),
                _ => None,
            });
            assert_eq!(x2, Some((40.0, width)));
        }
    }

    #[test]
    fn test_frame_break_to_in_cell_fails() {
        let grid = LayoutBlock::Grid(Grid {
            col_widths: vec![ColumnWidth::Fill],
            rows: vec![GridRow {
                cells: vec![vec![LayoutBlock::FrameBreakTo("left".into())]],
            }],
            padding: CellPadding::default(),
        });
        let err = paginate(&[grid], &single(100.0, 100.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::ControlBlockInCell));
    }

    #[test]
    fn test_control_block_in_cell_fails() {
        let grid = LayoutBlock::Grid(Grid {
            col_widths: vec![ColumnWidth::Fixed(50.0)],
            rows: vec![GridRow {
                cells: vec![vec![LayoutBlock::FrameBreak]],
            }],
            padding: CellPadding::default(),
        });
        let err = paginate(&[grid], &single(100.0, 100.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::ControlBlockInCell));
    }

    #[test]
    fn test_banded_paragraph_draws_background_and_accent() {
        let style = body().band(Band {
            background: Color::hex(0xEEF2FF),
            accent: Some((1.5, Color::hex(0x3B82F6))),
            padding_left: 3.0,
            padding_vertical: 2.0,
        });
        let story = vec![LayoutBlock::paragraph("PROFILE", &style)];
        let pages = paginate(&story, &single(200.0, 100.0), &FONTS).unwrap();
        assert!(matches!(pages[0].ops[0], DrawOp::FillRect { .. }));
        assert!(matches!(pages[0].ops[1], DrawOp::Line { .. }));
        assert_eq!(pages[0].text(), vec!["PROFILE"]);
    }

    #[test]
    fn test_links_produce_annotations() {
        let story = vec![para("<link href='https://example.com'>site</link>")];
        let pages = paginate(&story, &single(200.0, 100.0), &FONTS).unwrap();
        assert!(pages[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Link { uri, .. } if uri == "https://example.com")));
    }

    #[test]
    fn test_page_limit_is_enforced() {
        let story: Vec<LayoutBlock> = (0..=MAX_PAGES).map(|_| LayoutBlock::FrameBreak).collect();
        let err = paginate(&story, &single(100.0, 100.0), &FONTS).unwrap_err();
        assert!(matches!(err, RenderError::PageLimitExceeded));
    }
}
