//! Axum route handlers for the Screening API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::db::{find_job, find_resume, insert_screening, list_jobs};
use crate::errors::AppError;
use crate::models::screening::NewScreening;
use crate::screening::extractor::{DocumentFormat, ResumeDocument};
use crate::screening::result::{JobPosting, ScreeningResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    pub resume_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    /// `None` when the record could not be saved; the result is still valid.
    pub screening_id: Option<Uuid>,
    pub owner_name: Option<String>,
    #[serde(flatten)]
    pub result: ScreeningResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Screens a stored resume against a stored job or free-text description and
/// records the outcome.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Json<ScreeningResponse>, AppError> {
    let resume_id = request
        .resume_id
        .ok_or_else(|| AppError::Validation("Please select a resume to screen.".to_string()))?;

    let resume = find_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found in database.".to_string()))?;

    // An unknown job id falls back to the free-text description.
    let job = match request.job_id {
        Some(id) => find_job(&state.db, id).await?,
        None => None,
    };
    let free_text = request
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let job_description = match (&job, free_text) {
        (Some(job), _) => job.description.clone(),
        (None, Some(text)) => text.to_string(),
        (None, None) => {
            return Err(AppError::Validation(
                "Please select a job or provide a job description for screening.".to_string(),
            ))
        }
    };

    let bytes = state.resumes.fetch(&resume.filename).await?;
    let format = DocumentFormat::detect(&resume.filename, &bytes).unwrap_or(DocumentFormat::Pdf);
    let catalog = load_catalog(&state).await?;

    let result = Arc::clone(&state.engine)
        .screen(
            ResumeDocument::new(bytes, format),
            job_description.clone(),
            state.entity_tagger.as_ref(),
            &catalog,
        )
        .await;

    let record = NewScreening::from_result(
        resume.id,
        job.as_ref().map(|j| j.id),
        resume.owner_name.clone(),
        &job_description,
        &result,
    );
    let screening_id = match insert_screening(&state.db, &record).await {
        Ok(id) => Some(id),
        Err(e) => {
            error!("Error saving screening result for resume {}: {e}", resume.id);
            None
        }
    };

    info!(
        "Screened resume {} ({} backend): score {}",
        resume.id,
        state.resumes.backend(),
        result.match_score
    );

    Ok(Json(ScreeningResponse {
        screening_id,
        owner_name: resume.owner_name,
        result,
    }))
}

/// POST /api/v1/screenings/upload
///
/// Multipart form: `resume` (PDF or .txt file) and `job_description` (text).
/// Screens an ad hoc document. Nothing is persisted.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResult>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("resume") => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
                upload = Some((filename, data));
            }
            Some("job_description") => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_description: {e}")))?;
            }
            _ => {}
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No resume file uploaded.".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded resume is empty.".to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    let format = DocumentFormat::detect(&filename, &data).ok_or_else(|| {
        AppError::Validation("Only PDF or plain-text resumes are supported".to_string())
    })?;

    let catalog = load_catalog(&state).await?;
    let result = Arc::clone(&state.engine)
        .screen(
            ResumeDocument::new(data, format),
            job_description,
            state.entity_tagger.as_ref(),
            &catalog,
        )
        .await;

    Ok(Json(result))
}

async fn load_catalog(state: &AppState) -> Result<Vec<JobPosting>, AppError> {
    Ok(list_jobs(&state.db)
        .await?
        .into_iter()
        .map(JobPosting::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_missing_fields() {
        let req: ScreeningRequest = serde_json::from_str("{}").unwrap();
        assert!(req.resume_id.is_none());
        assert!(req.job_id.is_none());
        assert!(req.job_description.is_none());
    }

    #[test]
    fn test_response_flattens_result() {
        let response = ScreeningResponse {
            screening_id: None,
            owner_name: Some("Jane".to_string()),
            result: ScreeningResult {
                matched_skills: ["python".to_string()].into_iter().collect(),
                match_score: 61.25,
                email: "jane@x.com".to_string(),
                phone: "Not detected".to_string(),
                highlighted_text: String::new(),
                matched_jobs: vec![],
                skills_count: 26,
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["match_score"], 61.25);
        assert_eq!(json["matched_skills"][0], "python");
        assert_eq!(json["owner_name"], "Jane");
        assert!(json["screening_id"].is_null());
    }
}
