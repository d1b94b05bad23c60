use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::screening::result::JobPosting;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub status: String,
    pub employer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        JobPosting {
            id: row.id,
            title: row.title,
            company: row.company,
            description: row.description,
            location: row.location,
            job_type: row.job_type,
            salary: row.salary,
            status: row.status,
        }
    }
}
