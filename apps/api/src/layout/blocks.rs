//! The block vocabulary templates build stories from.

use super::markup;
use super::style::{Color, ParagraphStyle, TextRole};

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub markup: String,
    pub style: ParagraphStyle,
}

/// Horizontal line across the full width of its frame or cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub thickness: f32,
    pub color: Color,
    pub space_before: f32,
    pub space_after: f32,
}

impl Rule {
    pub fn height(&self) -> f32 {
        self.space_before + self.thickness + self.space_after
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellPadding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub cells: Vec<Vec<LayoutBlock>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Fixed(f32),
    /// Shares what the fixed columns leave of the frame width.
    Fill,
}

/// Column table. Rows are placed whole; a grid may split between rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub col_widths: Vec<ColumnWidth>,
    pub rows: Vec<GridRow>,
    pub padding: CellPadding,
}

impl Grid {
    /// Width taken by the fixed columns alone.
    pub fn fixed_width(&self) -> f32 {
        self.col_widths
            .iter()
            .map(|w| match w {
                ColumnWidth::Fixed(w) => *w,
                ColumnWidth::Fill => 0.0,
            })
            .sum()
    }

    /// Concrete column widths inside a frame `available` wide.
    pub fn resolve_widths(&self, available: f32) -> Vec<f32> {
        let fills = self
            .col_widths
            .iter()
            .filter(|w| matches!(w, ColumnWidth::Fill))
            .count();
        let share = if fills == 0 {
            0.0
        } else {
            (available - self.fixed_width()).max(0.0) / fills as f32
        };
        self.col_widths
            .iter()
            .map(|w| match w {
                ColumnWidth::Fixed(w) => *w,
                ColumnWidth::Fill => share,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutBlock {
    Paragraph(Paragraph),
    Spacer(f32),
    Rule(Rule),
    /// Continue in the next frame, or on a new page after the last one.
    FrameBreak,
    /// Jump ahead to the named frame of the current page. Nothing happens when the flow is
    /// already there; a frame that is not ahead on this page acts like `FrameBreak`.
    FrameBreakTo(String),
    /// Geometry id used for every page created from here on.
    NextPageGeometry(String),
    Grid(Grid),
}

impl LayoutBlock {
    pub fn paragraph(markup: impl Into<String>, style: &ParagraphStyle) -> Self {
        LayoutBlock::Paragraph(Paragraph {
            markup: markup.into(),
            style: style.clone(),
        })
    }

    /// Spacers and rules: blocks that only separate content.
    pub fn is_spacing(&self) -> bool {
        matches!(self, LayoutBlock::Spacer(_) | LayoutBlock::Rule(_))
    }

    /// Blocks that steer the flow rather than draw anything.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            LayoutBlock::FrameBreak
                | LayoutBlock::FrameBreakTo(_)
                | LayoutBlock::NextPageGeometry(_)
        )
    }
}

/// Plain text of every section heading in story order, including those inside grid cells.
pub fn section_headings(story: &[LayoutBlock]) -> Vec<String> {
    let mut out = Vec::new();
    collect_headings(story, &mut out);
    out
}

fn collect_headings(blocks: &[LayoutBlock], out: &mut Vec<String>) {
    for block in blocks {
        match block {
            LayoutBlock::Paragraph(p) if p.style.role == TextRole::SectionHeading => {
                out.push(markup::plain_text(&p.markup).unwrap_or_else(|_| p.markup.clone()));
            }
            LayoutBlock::Grid(grid) => {
                for row in &grid.rows {
                    for cell in &row.cells {
                        collect_headings(cell, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Removes leading, trailing and back-to-back spacing blocks.
pub fn strip_spacing(blocks: Vec<LayoutBlock>) -> Vec<LayoutBlock> {
    let mut out: Vec<LayoutBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if block.is_spacing() && out.last().map_or(true, LayoutBlock::is_spacing) {
            continue;
        }
        out.push(block);
    }
    while out.last().is_some_and(LayoutBlock::is_spacing) {
        out.pop();
    }
    out
}
