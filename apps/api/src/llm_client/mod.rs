/// LLM Client — the single point of entry for all Gemini API calls in the service.
///
/// No other module talks to the Gemini API directly. Every call takes the next
/// key from the shared [`KeyRing`], so load spreads across all configured keys.
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::credentials::{ApiKey, KeyRing};

pub mod prompts;

const MAX_ATTEMPTS: usize = 3;
const BASE_BACKOFF_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API keys configured")]
    NoCredentials,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("prompt blocked by the model: {0}")]
    Blocked(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> Result<String, LlmError> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LlmError::Blocked(reason.to_string()));
        }

        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Wraps the Gemini `generateContent` endpoint with key rotation and
/// schema-constrained JSON output.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
    keys: Arc<KeyRing>,
}

impl GeminiClient {
    pub fn new(
        api_base: &str,
        model: &str,
        keys: Arc<KeyRing>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            keys,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Requests a completion constrained to `schema` and deserializes it as `T`.
    ///
    /// Retries on 429 and 5xx, moving to the next key on every attempt.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<T, LlmError> {
        let request_body = build_request(prompt, Some(schema));
        let attempts = MAX_ATTEMPTS.min(self.keys.len());

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = Duration::from_millis(BASE_BACKOFF_MS * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying with next key after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let key = self.keys.next().ok_or(LlmError::NoCredentials)?;
            info!("Using API key ending in '...{}'", key.suffix());

            match self.send(&key, &request_body).await {
                Ok(response) => {
                    let text = response.text()?;
                    return serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse);
                }
                Err(e) if is_retryable(&e) => last_error = Some(e),
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::NoCredentials))
    }

    /// Plain-text completion with an explicit key. Used to verify individual keys.
    pub async fn generate_text_with_key(&self, key: &ApiKey, prompt: &str) -> Result<String, LlmError> {
        let request_body = build_request(prompt, None);
        self.send(key, &request_body).await?.text()
    }

    async fn send(
        &self,
        key: &ApiKey,
        request_body: &GenerateRequest<'_>,
    ) -> Result<GenerateResponse, LlmError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", key.expose())
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        Ok(parsed)
    }
}

fn build_request<'a>(prompt: &'a str, schema: Option<&'a serde_json::Value>) -> GenerateRequest<'a> {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: schema.map(|response_schema| GenerationConfig {
            response_mime_type: "application/json",
            response_schema,
        }),
    }
}

fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Api { status, .. } => *status == 429 || *status >= 500,
        LlmError::Http(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}
