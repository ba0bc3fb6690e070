//! Verifies every key in GOOGLE_API_KEYS by sending a short prompt with each one.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cv_review_api::config::GeminiSettings;
use cv_review_api::credentials::KeyRing;
use cv_review_api::llm_client::prompts::KEY_CHECK_PROMPT;
use cv_review_api::llm_client::GeminiClient;

#[derive(Debug, Parser)]
#[command(name = "check-keys", about = "Check connectivity for each configured Gemini API key")]
struct Args {
    /// Model to test against (defaults to GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = GeminiSettings::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("--- Checking Gemini API keys ---");

    let keys = Arc::new(KeyRing::new(settings.api_keys.clone()));
    if keys.is_empty() {
        println!("[FAILED] GOOGLE_API_KEYS is not set or empty.");
        println!("         Set your keys in .env (comma-separated for more than one).");
        std::process::exit(1);
    }
    println!("[INFO] Found {} API key(s) to test.", keys.len());

    let model = args.model.unwrap_or(settings.model.clone());
    let client = GeminiClient::new(
        &settings.api_base,
        &model,
        keys.clone(),
        Duration::from_secs(settings.timeout_secs),
    )?;

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for (i, key) in keys.iter().enumerate() {
        let label = format!("Key #{} (ending in '...{}')", i + 1, key.suffix());
        println!("\n--- Testing {label} ---");

        match client.generate_text_with_key(key, KEY_CHECK_PROMPT).await {
            Ok(_) => {
                println!("[OK] {label}: received a response from {model}.");
                succeeded += 1;
            }
            Err(e) => {
                println!("[FAILED] {label}: {e}");
                failed += 1;
            }
        }
    }

    let rule = "=".repeat(20);
    println!("\n{rule} Summary {rule}");
    println!("Total keys tested: {}", keys.len());
    println!("Succeeded: {succeeded}");
    println!("Failed: {failed}");
    println!("{}\n", "=".repeat(49));

    if failed > 0 {
        bail!("{failed} of {} API key(s) failed validation", keys.len());
    }
    println!("All API keys validated successfully!");
    Ok(())
}
