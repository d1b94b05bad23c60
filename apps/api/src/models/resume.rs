use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded resume. `filename` addresses the file in resume storage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub filename: String,
    pub owner_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
