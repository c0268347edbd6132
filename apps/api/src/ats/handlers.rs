//! Axum route handlers for the ATS API.

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::ats::models::{ScoreInput, ScoreResult};
use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AtsResponse {
    pub result: ScoreResult,
}

/// The `resume` file part of an upload.
struct ResumeUpload {
    file_name: String,
    kind: DocumentKind,
    bytes: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ats-score
///
/// Scores already-extracted resume text against a job description.
/// Empty strings are accepted; the engine degrades instead of failing.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreInput>,
) -> Result<Json<AtsResponse>, AppError> {
    let result =
        score_on_blocking_pool(&state, request.resume_text, request.job_description).await?;

    Ok(Json(AtsResponse { result }))
}

/// POST /api/ats-check
///
/// Multipart upload: a `resume` file (PDF, DOCX or plain text) and an optional
/// `jobDescription` text field. Text is extracted, then scored.
pub async fn handle_ats_check(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AtsResponse>, AppError> {
    let mut upload: Option<ResumeUpload> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or("unnamed").to_string();
                let kind = DocumentKind::detect(field.file_name(), field.content_type());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                upload = Some(ResumeUpload {
                    file_name,
                    kind,
                    bytes: bytes.to_vec(),
                });
            }
            "jobDescription" | "job_description" => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let file_name = upload.file_name;
    let kind = upload.kind;
    let size = upload.bytes.len();

    let resume_text = tokio::task::spawn_blocking(move || extract_text(&upload.bytes, kind))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Text extraction task failed: {e}")))??;

    let extracted_chars = resume_text.trim().chars().count();
    info!(
        "Extracted '{}' (type={}): {} bytes, {} chars",
        file_name,
        kind.as_str(),
        size,
        extracted_chars
    );

    if extracted_chars < state.config.min_resume_chars {
        return Err(AppError::UnprocessableEntity(
            "Could not extract sufficient text from resume".to_string(),
        ));
    }

    let result = score_on_blocking_pool(&state, resume_text, job_description).await?;

    Ok(Json(AtsResponse { result }))
}

/// Scoring cost is linear in resume length, which only the body limit bounds.
async fn score_on_blocking_pool(
    state: &AppState,
    resume_text: String,
    job_description: String,
) -> Result<ScoreResult, AppError> {
    let scorer = Arc::clone(&state.scorer);
    tokio::task::spawn_blocking(move || scorer.score(&resume_text, &job_description))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Scoring task failed: {e}")))
}
