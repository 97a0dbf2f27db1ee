use anyhow::{Context, Result};

use crate::layout::geometry::PageSizeName;
use crate::llm_client::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tailoring is disabled when absent.
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub default_page_size: PageSizeName,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_page_size = match get("DEFAULT_PAGE_SIZE") {
            Some(raw) => PageSizeName::parse(&raw)
                .with_context(|| format!("DEFAULT_PAGE_SIZE must be 'a4' or 'letter', got '{raw}'"))?,
            None => PageSizeName::default(),
        };

        Ok(Config {
            llm_api_key: get("LLM_API_KEY").filter(|k| !k.trim().is_empty()),
            llm_base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            default_page_size,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
