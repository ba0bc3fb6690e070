use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_review_api::config::Config;
use cv_review_api::credentials::KeyRing;
use cv_review_api::llm_client::GeminiClient;
use cv_review_api::references::ReferenceLibrary;
use cv_review_api::review::GeminiReviewer;
use cv_review_api::routes::build_router;
use cv_review_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Review API v{}", env!("CARGO_PKG_VERSION"));

    let keys = Arc::new(KeyRing::new(config.api_keys.clone()));
    if keys.is_empty() {
        warn!("GOOGLE_API_KEYS is not set; review requests will fail until keys are configured");
    } else {
        info!("Loaded {} API key(s) for round-robin use", keys.len());
    }

    let llm = GeminiClient::new(
        &config.gemini_api_base,
        &config.gemini_model,
        keys.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let references = ReferenceLibrary::new(config.reference_cvs.clone());
    for path in references.paths() {
        if !path.exists() {
            warn!("Reference CV {} does not exist yet", path.display());
        }
    }

    let state = AppState {
        reviewer: Arc::new(GeminiReviewer::new(llm, config.review_language.clone())),
        references,
        api_key_count: keys.len(),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
