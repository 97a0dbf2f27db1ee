use std::sync::Arc;

use crate::config::Config;
use crate::layout::geometry::PageSizeName;
use crate::tailoring::TailoringService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no LLM key is configured; tailoring routes then answer 503.
    pub tailoring: Option<Arc<dyn TailoringService>>,
}

impl AppState {
    pub fn default_page_size(&self) -> PageSizeName {
        self.config.default_page_size
    }
}
