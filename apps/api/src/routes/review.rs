use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::document::{extract_text_from_upload, is_pdf, DocumentError};
use crate::errors::AppError;
use crate::review::models::CvReview;
use crate::state::AppState;

/// Multipart field that carries the CV.
pub const CV_FIELD: &str = "user_cv";

struct Upload {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// POST /review
///
/// Extracts the uploaded CV, benchmarks it against the reference CVs and
/// returns the structured review.
pub async fn handle_review(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CvReview>, AppError> {
    let multipart = multipart?;
    let request_id = Uuid::new_v4();
    review_upload(state, multipart)
        .instrument(info_span!("review", %request_id))
        .await
}

async fn review_upload(state: AppState, multipart: Multipart) -> Result<Json<CvReview>, AppError> {
    let upload = read_cv_field(multipart).await?;
    info!(
        "Received '{}' ({} bytes, content_type={:?})",
        upload.filename,
        upload.data.len(),
        upload.content_type
    );

    if !is_pdf(upload.content_type.as_deref(), &upload.data) {
        warn!("Rejected non-PDF upload '{}'", upload.filename);
        return Err(DocumentError::NotPdf.into());
    }

    let cv_text = extract_text_from_upload(upload.data).await?;
    if cv_text.trim().is_empty() {
        return Err(DocumentError::NoText.into());
    }

    let examples_text = state.references.combined_text().await?;

    let review = state.reviewer.review(&cv_text, &examples_text).await?;
    info!("Review complete");
    Ok(Json(review))
}

async fn read_cv_field(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(CV_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("cv.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::Validation(format!(
                "Form field '{CV_FIELD}' contains an empty file"
            )));
        }

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(AppError::Validation(format!(
        "Request must include a file in form field '{CV_FIELD}'"
    )))
}
