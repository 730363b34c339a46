//! Axum route handlers for the Analysis API.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::state::AppState;
use crate::upload::{read_pdf_upload, MAX_UPLOAD_BYTES};

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: Value,
}

/// POST /analyze
///
/// Upload gate → text extraction → LLM analysis, strictly in sequence.
/// Any failure ends the request; nothing is retried or cached.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();

    let multipart = multipart.map_err(|e| {
        AppError::Validation(format!("Expected a multipart form upload: {}", e.body_text()))
    })?;

    let file = read_pdf_upload(multipart, MAX_UPLOAD_BYTES).await?;
    info!(
        %request_id,
        size = file.size(),
        content_type = %file.content_type,
        file_name = file.file_name.as_deref().unwrap_or("<unnamed>"),
        "Accepted resume upload"
    );

    let text = extract_resume_text(state.extractor.as_ref(), &file).await?;
    debug!(%request_id, chars = text.as_str().len(), "Extracted resume text");

    let analysis = state
        .analyzer
        .request_analysis(text.as_str(), state.schema)
        .await?;
    info!(%request_id, "Resume analysis complete");

    Ok(Json(AnalyzeResponse { analysis }))
}
