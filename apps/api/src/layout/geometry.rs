//! Page sizes, margins and frame geometry. Units are PDF points, origin bottom-left.

use serde::Deserialize;

use super::RenderError;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0 * MM,
        height: 297.0 * MM,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

/// Page size as named in configuration and query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizeName {
    #[default]
    A4,
    Letter,
}

impl PageSizeName {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(PageSizeName::A4),
            "letter" => Some(PageSizeName::Letter),
            _ => None,
        }
    }

    pub fn size(self) -> PageSize {
        match self {
            PageSizeName::A4 => PageSize::A4,
            PageSizeName::Letter => PageSize::LETTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 16.0 * MM,
            right: 14.0 * MM,
            bottom: 14.0 * MM,
            left: 14.0 * MM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(id: &str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.to_string(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// A named arrangement of frames, filled in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub id: String,
    pub frames: Vec<Frame>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageLayout {
    /// One frame covering the page inside the margins.
    Default,
    /// Explicit geometries; the document starts on the first one.
    Custom(Vec<PageGeometry>),
}

impl PageLayout {
    pub const DEFAULT_GEOMETRY: &'static str = "default";

    /// Concrete geometries for a page size. Fails on an empty layout or a frameless geometry.
    pub fn resolve(self, page: PageSize, margins: Margins) -> Result<Vec<PageGeometry>, RenderError> {
        let geometries = match self {
            PageLayout::Default => vec![PageGeometry {
                id: Self::DEFAULT_GEOMETRY.to_string(),
                frames: vec![Frame::new(
                    "body",
                    margins.left,
                    margins.bottom,
                    page.width - margins.left - margins.right,
                    page.height - margins.top - margins.bottom,
                )],
            }],
            PageLayout::Custom(geometries) => geometries,
        };
        if geometries.is_empty() {
            return Err(RenderError::EmptyGeometry(String::new()));
        }
        if let Some(empty) = geometries.iter().find(|g| g.frames.is_empty()) {
            return Err(RenderError::EmptyGeometry(empty.id.clone()));
        }
        Ok(geometries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions_in_points() {
        assert!((PageSize::A4.width - 595.2756).abs() < 0.01);
        assert!((PageSize::A4.height - 841.8898).abs() < 0.01);
    }

    #[test]
    fn test_page_size_name_parse() {
        assert_eq!(PageSizeName::parse("Letter"), Some(PageSizeName::Letter));
        assert_eq!(PageSizeName::parse(" a4 "), Some(PageSizeName::A4));
        assert_eq!(PageSizeName::parse("legal"), None);
    }

    #[test]
    fn test_default_layout_is_one_frame_inside_margins() {
        let margins = Margins::default();
        let geometries = PageLayout::Default.resolve(PageSize::LETTER, margins).unwrap();
        assert_eq!(geometries.len(), 1);
        let frame = &geometries[0].frames[0];
        assert_eq!(frame.x, margins.left);
        assert_eq!(frame.y, margins.bottom);
        assert!((frame.top() - (792.0 - margins.top)).abs() < 1e-3);
    }

    #[test]
    fn test_frameless_geometry_is_rejected() {
        let layout = PageLayout::Custom(vec![PageGeometry {
            id: "blank".into(),
            frames: vec![],
        }]);
        assert!(matches!(
            layout.resolve(PageSize::A4, Margins::default()),
            Err(RenderError::EmptyGeometry(id)) if id == "blank"
        ));
    }
}
