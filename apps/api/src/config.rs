use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::credentials::parse_key_list;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REFERENCE_CV: &str = "contoh_cv_1.pdf";
pub const DEFAULT_LANGUAGE: &str = "Bahasa Indonesia";

/// The subset of configuration needed to talk to Gemini.
/// The key checker loads only this, so server-only variables cannot break it.
#[derive(Clone)]
pub struct GeminiSettings {
    pub api_keys: Vec<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl GeminiSettings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(get: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(GeminiSettings {
            api_keys: parse_key_list(&get("GOOGLE_API_KEYS").unwrap_or_default()),
            model: value_or(get, "GEMINI_MODEL", DEFAULT_MODEL),
            api_base: value_or(get, "GEMINI_API_BASE", DEFAULT_API_BASE),
            timeout_secs: value_or(get, "LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

/// Application configuration loaded from environment variables.
/// Missing API keys are tolerated at startup; review calls fail until keys are set.
#[derive(Clone)]
pub struct Config {
    pub api_keys: Vec<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub reference_cvs: Vec<PathBuf>,
    pub review_language: String,
    pub max_upload_bytes: usize,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(&env_lookup)
    }

    fn from_lookup(get: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let gemini = GeminiSettings::from_lookup(get)?;

        Ok(Config {
            api_keys: gemini.api_keys,
            gemini_model: gemini.model,
            gemini_api_base: gemini.api_base,
            reference_cvs: parse_path_list(&value_or(get, "REFERENCE_CVS", DEFAULT_REFERENCE_CV)),
            review_language: value_or(get, "REVIEW_LANGUAGE", DEFAULT_LANGUAGE),
            max_upload_bytes: value_or(get, "MAX_UPLOAD_BYTES", "10485760")
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            llm_timeout_secs: gemini.timeout_secs,
            port: value_or(get, "PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: value_or(get, "RUST_LOG", "info"),
        })
    }
}

// Keys stay out of Debug output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("reference_cvs", &self.reference_cvs)
            .field("review_language", &self.review_language)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

// Blank values count as unset.
fn value_or(get: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Splits a comma-separated list of file paths, dropping blank entries.
pub fn parse_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
