//! Posts a CV to a running service and prints the review.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::multipart::{Form, Part};

use cv_review_api::routes::review::CV_FIELD;

#[derive(Debug, Parser)]
#[command(name = "review-client", about = "Submit a CV PDF to the review service")]
struct Args {
    /// PDF file to submit
    file: PathBuf,

    /// Review endpoint
    #[arg(long, env = "CV_REVIEW_URL", default_value = "http://localhost:8080/review")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cv.pdf".to_string());

    println!("Sending '{}' to {}...", args.file.display(), args.url);

    let part = Part::bytes(bytes)
        .file_name(filename)
        .mime_str("application/pdf")?;
    let form = Form::new().part(CV_FIELD, part);

    let response = reqwest::Client::new()
        .post(&args.url)
        .multipart(form)
        .send()
        .await
        .context("request to review service failed")?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        println!("\nHTTP error: {status}");
        println!("Response body: {body}");
        bail!("review service returned {status}");
    }

    println!("\nResponse received!");
    println!("Status code: {status}");

    let review: serde_json::Value =
        serde_json::from_str(&body).context("review service returned invalid JSON")?;
    println!("\n--- CV REVIEW ---");
    println!("{}", serde_json::to_string_pretty(&review)?);

    Ok(())
}
