use std::sync::Arc;

use crate::analysis::courses::CourseFinder;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
    /// Pluggable course lookup. Default: ScraperCourseFinder. Tests inject fakes.
    pub course_finder: Arc<dyn CourseFinder>,
}
