//! Axum route handlers for the Emails API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateEmailsRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmailsResponse {
    pub emails: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct PortfolioCountResponse {
    pub count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/emails
///
/// Runs the full pipeline for one careers-page URL and returns one email per
/// detected job (failed generations appear as placeholder strings, so
/// `count` always equals the number of extracted jobs).
pub async fn handle_generate_emails(
    State(state): State<AppState>,
    Json(request): Json<GenerateEmailsRequest>,
) -> Result<Json<GenerateEmailsResponse>, AppError> {
    let emails = state.pipeline.process_url(&request.url).await?;
    let count = emails.len();
    Ok(Json(GenerateEmailsResponse { emails, count }))
}

/// GET /api/v1/portfolio/count
///
/// Number of records currently in the portfolio index.
pub async fn handle_portfolio_count(
    State(state): State<AppState>,
) -> Result<Json<PortfolioCountResponse>, AppError> {
    let count = state.portfolio.count().await?;
    Ok(Json(PortfolioCountResponse { count }))
}

/// POST /api/v1/portfolio/clear
///
/// Deletes and recreates the portfolio index. The next pipeline run reloads
/// it from the CSV.
pub async fn handle_portfolio_clear(
    State(state): State<AppState>,
) -> Result<Json<PortfolioCountResponse>, AppError> {
    state.portfolio.clear().await?;
    let count = state.portfolio.count().await?;
    Ok(Json(PortfolioCountResponse { count }))
}
