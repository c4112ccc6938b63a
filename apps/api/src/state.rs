use std::sync::Arc;

use crate::emails::pipeline::EmailPipeline;
use crate::portfolio::Portfolio;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EmailPipeline>,
    /// Shared with the pipeline; exposed separately for the maintenance routes.
    pub portfolio: Arc<Portfolio>,
}
