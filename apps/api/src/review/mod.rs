//! CV review — pluggable, trait-based reviewer that compares a CV against reference CVs.
//!
//! Default: `GeminiReviewer` (schema-constrained Gemini completion).
//! `AppState` holds an `Arc<dyn CvReviewer>`, so handlers can be driven without the network.

pub mod models;
pub mod prompts;
pub mod schema;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError};
use crate::review::models::CvReview;
use crate::review::prompts::build_review_prompt;
use crate::review::schema::review_schema;

/// Produces a structured review of `cv_text` benchmarked against `examples_text`.
#[async_trait]
pub trait CvReviewer: Send + Sync {
    async fn review(&self, cv_text: &str, examples_text: &str) -> Result<CvReview, AppError>;
}

pub struct GeminiReviewer {
    llm: GeminiClient,
    language: String,
    schema: serde_json::Value,
}

impl GeminiReviewer {
    pub fn new(llm: GeminiClient, language: impl Into<String>) -> Self {
        Self {
            llm,
            language: language.into(),
            schema: review_schema(),
        }
    }
}

#[async_trait]
impl CvReviewer for GeminiReviewer {
    async fn review(&self, cv_text: &str, examples_text: &str) -> Result<CvReview, AppError> {
        let prompt = build_review_prompt(examples_text, cv_text, &self.language);

        info!("Sending review request to Gemini ({})", self.llm.model());
        let review = self
            .llm
            .generate_json::<CvReview>(&prompt, &self.schema)
            .await
            .map_err(|e| match e {
                LlmError::NoCredentials => {
                    AppError::Configuration("no API keys available".to_string())
                }
                other => AppError::Llm(format!("CV review failed: {other}")),
            })?;

        info!("CV review generated (overall_score={:?})", review.overall_score);
        Ok(review)
    }
}
