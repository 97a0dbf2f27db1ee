//! Process-wide font registry.
//!
//! Maps a logical `(FontFamily, FontStyle)` pair to the PDF base font that renders it.
//! Registration is insert-if-absent, so repeated calls from `main`, tests, or the render
//! path are harmless.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::debug;

use super::font_metrics::{base_font, get_metrics, FontFamily, FontMetricTable, FontStyle};
use super::RenderError;

/// Resource names used inside the PDF page resources, one per base font.
#[rustfmt::skip]
const RESOURCES: [(&str, &str); 8] = [
    ("Helvetica",             "F1"),
    ("Helvetica-Bold",        "F2"),
    ("Helvetica-Oblique",     "F3"),
    ("Helvetica-BoldOblique", "F4"),
    ("Times-Roman",           "F5"),
    ("Times-Bold",            "F6"),
    ("Times-Italic",          "F7"),
    ("Times-BoldItalic",      "F8"),
];

/// A renderable font: the PDF resource name, its base font and its width table.
#[derive(Debug, Clone, Copy)]
pub struct FontHandle {
    pub resource: &'static str,
    pub base_font: &'static str,
    pub metrics: &'static FontMetricTable,
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

impl FontHandle {
    fn for_face(family: FontFamily, style: FontStyle) -> Self {
        let base = base_font(family, style);
        let resource = RESOURCES
            .iter()
            .find(|(name, _)| *name == base)
            .map(|(_, res)| *res)
            .unwrap_or("F1");
        Self {
            resource,
            base_font: base,
            metrics: get_metrics(family, style),
        }
    }

    /// Width of `text` in points at `size`.
    pub fn width(&self, text: &str, size: f32) -> f32 {
        self.metrics.measure_str(text) * size
    }
}

#[derive(Debug, Default)]
pub struct FontRegistry {
    faces: RwLock<HashMap<(FontFamily, FontStyle), FontHandle>>,
}

impl FontRegistry {
    /// An empty registry. Most callers want the global [`FONTS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one face. Returns `true` when it was not registered before.
    pub fn register(&self, family: FontFamily, style: FontStyle) -> bool {
        let mut faces = self.faces.write().unwrap_or_else(|e| e.into_inner());
        if faces.contains_key(&(family, style)) {
            return false;
        }
        faces.insert((family, style), FontHandle::for_face(family, style));
        true
    }

    /// Registers all four styles of a family. Returns how many were new.
    pub fn register_family(&self, family: FontFamily) -> usize {
        FontStyle::ALL
            .iter()
            .filter(|style| self.register(family, **style))
            .count()
    }

    pub fn is_registered(&self, family: FontFamily, style: FontStyle) -> bool {
        self.faces
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&(family, style))
    }

    pub fn resolve(&self, family: FontFamily, style: FontStyle) -> Result<FontHandle, RenderError> {
        self.faces
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&(family, style))
            .copied()
            .ok_or(RenderError::FontNotRegistered { family, style })
    }

    pub fn len(&self) -> usize {
        self.faces.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Global registry with every template family registered on first use.
pub static FONTS: Lazy<FontRegistry> = Lazy::new(|| {
    let registry = FontRegistry::new();
    for family in FontFamily::ALL {
        registry.register_family(family);
    }
    registry
});

/// Makes sure every template family is registered. Safe to call any number of times.
pub fn register_defaults() -> usize {
    let added: usize = FontFamily::ALL
        .iter()
        .map(|family| FONTS.register_family(*family))
        .sum();
    debug!(added, total = FONTS.len(), "font registry ready");
    FONTS.len()
}
