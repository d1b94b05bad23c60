use uuid::Uuid;

use crate::screening::result::ScreeningResult;

/// Insert parameters for a screening record.
#[derive(Debug, Clone)]
pub struct NewScreening {
    pub resume_id: Uuid,
    pub job_id: Option<Uuid>,
    pub owner_name: Option<String>,
    pub job_description_text: String,
    /// Comma-separated, as shown on dashboards.
    pub matched_skills: String,
    pub match_score: f64,
}

impl NewScreening {
    pub fn from_result(
        resume_id: Uuid,
        job_id: Option<Uuid>,
        owner_name: Option<String>,
        job_description_text: &str,
        result: &ScreeningResult,
    ) -> Self {
        Self {
            resume_id,
            job_id,
            owner_name,
            job_description_text: job_description_text.to_string(),
            matched_skills: result
                .matched_skills
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            match_score: result.match_score,
        }
    }
}
