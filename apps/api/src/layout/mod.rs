// Document layout engine.
// Templates build a story of blocks; the flow engine places them into page frames.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod dates;
pub mod flow;
pub mod font_metrics;
pub mod fonts;
pub mod geometry;
pub mod markup;
pub mod style;
pub mod text;

use thiserror::Error;

pub use blocks::{LayoutBlock, Rule};
pub use font_metrics::{FontFamily, FontStyle};
pub use geometry::{Frame, Margins, PageGeometry, PageLayout, PageSize};
pub use markup::MarkupError;
pub use style::{Band, Color, ParagraphStyle, TextRole};

impl RenderError {
    pub fn unsupported(ch: char) -> Self {
        RenderError::UnsupportedCharacter { ch, code: ch as u32 }
    }
}

/// Hard stop for runaway stories.
pub const MAX_PAGES: usize = 500;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("block is {width:.1}pt wide but the frame only has {available:.1}pt")]
    BlockTooWide { width: f32, available: f32 },

    #[error("block is {height:.1}pt tall but an empty frame only has {available:.1}pt")]
    BlockTooTall { height: f32, available: f32 },

    #[error("unknown page geometry '{0}'")]
    UnknownGeometry(String),

    #[error("page geometry '{0}' has no frames")]
    EmptyGeometry(String),

    #[error("grid cells may not contain frame breaks, geometry switches or nested grids")]
    ControlBlockInCell,

    #[error("malformed markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("font {family:?}/{style:?} is not registered")]
    FontNotRegistered { family: FontFamily, style: FontStyle },

    #[error("character {ch:?} (U+{code:04X}) has no glyph in the built-in PDF fonts")]
    UnsupportedCharacter { ch: char, code: u32 },

    #[error("document exceeds {} pages", MAX_PAGES)]
    PageLimitExceeded,

    #[error("PDF serialization failed: {0}")]
    Pdf(String),
}
