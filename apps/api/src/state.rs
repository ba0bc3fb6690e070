use std::sync::Arc;

use crate::references::ReferenceLibrary;
use crate::review::CvReviewer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable reviewer. Default: GeminiReviewer.
    pub reviewer: Arc<dyn CvReviewer>,
    pub references: ReferenceLibrary,
    /// Number of configured API keys, reported by /health.
    pub api_key_count: usize,
    pub max_upload_bytes: usize,
}
