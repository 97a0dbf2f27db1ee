pub mod health;
pub mod resumes;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(resumes::handle_list_templates))
        .route("/api/v1/example-resume", get(resumes::handle_example_resume))
        .route("/api/v1/render", post(resumes::handle_render))
        .route(
            "/api/v1/tailored-profile",
            post(resumes::handle_tailored_profile),
        )
        .fallback(handle_not_found)
        .with_state(state)
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
