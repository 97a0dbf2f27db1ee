use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::geometry::PageSizeName;
use crate::layout::Margins;
use crate::models::job_posting::JobPosting;
use crate::models::profile::ProfileDocument;
use crate::models::resume::ResumePayload;
use crate::render::generate_pdf_bytes;
use crate::state::AppState;
use crate::tailoring::build_profile;
use crate::templates::{TemplateEntry, TEMPLATES};

const DEFAULT_STYLE: &str = "simple";

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Junior,
    Mid,
    Senior,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Mid => "mid",
            Level::Senior => "senior",
        }
    }

    fn fixture(self) -> &'static str {
        match self {
            Level::Junior => include_str!("../../fixtures/resume_junior.json"),
            Level::Mid => include_str!("../../fixtures/resume_mid.json"),
            Level::Senior => include_str!("../../fixtures/resume_senior.json"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExampleQuery {
    pub style: Option<String>,
    #[serde(default)]
    pub level: Level,
    pub page_size: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub style: Option<String>,
    pub page_size: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub job: JobPosting,
    pub resume: ResumePayload,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateEntry>> {
    Json(TEMPLATES.entries())
}

/// GET /api/v1/example-resume
pub async fn handle_example_resume(
    State(state): State<AppState>,
    Query(params): Query<ExampleQuery>,
) -> Result<Response, AppError> {
    let style = params.style.unwrap_or_else(|| DEFAULT_STYLE.to_string());
    let page_size = page_size(&state, params.page_size.as_deref())?;
    let payload: ResumePayload = serde_json::from_str(params.level.fixture())
        .with_context(|| format!("fixture for level '{}' is invalid", params.level.as_str()))?;

    let filename = format!("resume_{}_{}", params.level.as_str(), style);
    let bytes = render_pdf(payload.into(), style, page_size).await?;
    Ok(pdf_response(bytes, &filename))
}

/// POST /api/v1/render
pub async fn handle_render(
    State(state): State<AppState>,
    Query(params): Query<RenderQuery>,
    Json(resume): Json<ResumePayload>,
) -> Result<Response, AppError> {
    let style = params.style.unwrap_or_else(|| DEFAULT_STYLE.to_string());
    let page_size = page_size(&state, params.page_size.as_deref())?;
    let filename = params
        .filename
        .unwrap_or_else(|| default_filename(&resume.fullname));

    let bytes = render_pdf(resume.into(), style, page_size).await?;
    Ok(pdf_response(bytes, &filename))
}

/// POST /api/v1/tailored-profile
pub async fn handle_tailored_profile(
    State(state): State<AppState>,
    Query(params): Query<RenderQuery>,
    Json(req): Json<TailorRequest>,
) -> Result<Response, AppError> {
    let service = state.tailoring.clone().ok_or(AppError::TailoringUnavailable)?;
    let style = params.style.unwrap_or_else(|| DEFAULT_STYLE.to_string());
    // Reject bad style/page size before spending model calls.
    TEMPLATES.resolve(&style)?;
    let page_size = page_size(&state, params.page_size.as_deref())?;

    let profile = build_profile(service.as_ref(), &req.job, &req.resume).await?;
    let filename = params
        .filename
        .unwrap_or_else(|| default_filename(&req.resume.fullname));

    let bytes = render_pdf(profile, style, page_size).await?;
    Ok(pdf_response(bytes, &filename))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn page_size(state: &AppState, raw: Option<&str>) -> Result<PageSizeName, AppError> {
    match raw {
        None => Ok(state.default_page_size()),
        Some(raw) => PageSizeName::parse(raw).ok_or_else(|| {
            AppError::Validation(format!("page_size must be 'a4' or 'letter', got '{raw}'"))
        }),
    }
}

/// Renders off the async executor; layout and serialization are CPU-bound.
async fn render_pdf(
    profile: ProfileDocument,
    style: String,
    page_size: PageSizeName,
) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || {
        generate_pdf_bytes(&profile, &style, page_size.size(), Margins::default())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(bytes = bytes.len(), "pdf rendered");
    Ok(bytes)
}

/// Fullname words plus `resume`, joined by `_`.
fn default_filename(fullname: &str) -> String {
    fullname
        .split_whitespace()
        .chain(std::iter::once("resume"))
        .collect::<Vec<_>>()
        .join("_")
}

/// Keeps the header value plain ASCII; everything else becomes `_`.
fn sanitize_filename(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_suffix(".pdf").unwrap_or(name);
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

fn pdf_response(bytes: Vec<u8>, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}.pdf\"", sanitize_filename(filename));
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        Bytes::from(bytes),
    )
        .into_response()
}
