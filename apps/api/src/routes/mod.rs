pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::emails::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Emails API
        .route("/api/v1/emails", post(handlers::handle_generate_emails))
        // Portfolio maintenance
        .route(
            "/api/v1/portfolio/count",
            get(handlers::handle_portfolio_count),
        )
        .route(
            "/api/v1/portfolio/clear",
            post(handlers::handle_portfolio_clear),
        )
        .with_state(state)
}
