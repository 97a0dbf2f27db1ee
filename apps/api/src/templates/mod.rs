//! Résumé templates and the registry that selects them by key.
//!
//! A template turns a [`ProfileDocument`] into a story of layout blocks plus the page
//! layout the story flows through. Templates hold only immutable styles, so one instance
//! per key is shared by every request.

mod common;
pub mod elegant;
pub mod simple;
pub mod vibrant;

use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

use crate::layout::{LayoutBlock, PageLayout, PageSize};
use crate::models::profile::ProfileDocument;

pub use elegant::ElegantTemplate;
pub use simple::SimpleTemplate;
pub use vibrant::VibrantTemplate;

pub trait ResumeTemplate: Send + Sync {
    fn key(&self) -> &'static str;

    fn label(&self) -> &'static str;

    /// Pure and deterministic: the same profile always yields the same story.
    fn build_story(&self, profile: &ProfileDocument) -> Vec<LayoutBlock>;

    fn page_layout(&self, page_size: PageSize) -> PageLayout;
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown template '{key}' (available: {})", .available.join(", "))]
pub struct TemplateNotFound {
    pub key: String,
    pub available: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub key: &'static str,
    pub label: &'static str,
}

/// Fixed, ordered set of templates.
pub struct TemplateRegistry {
    templates: Vec<Box<dyn ResumeTemplate>>,
}

impl TemplateRegistry {
    fn new() -> Self {
        Self {
            templates: vec![
                Box::new(SimpleTemplate::new()),
                Box::new(VibrantTemplate::new()),
                Box::new(ElegantTemplate::new()),
            ],
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.key()).collect()
    }

    pub fn entries(&self) -> Vec<TemplateEntry> {
        self.templates
            .iter()
            .map(|t| TemplateEntry {
                key: t.key(),
                label: t.label(),
            })
            .collect()
    }

    pub fn resolve(&self, key: &str) -> Result<&dyn ResumeTemplate, TemplateNotFound> {
        self.templates
            .iter()
            .find(|t| t.key() == key)
            .map(|t| t.as_ref())
            .ok_or_else(|| TemplateNotFound {
                key: key.to_string(),
                available: self.keys(),
            })
    }
}

pub static TEMPLATES: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::new);
