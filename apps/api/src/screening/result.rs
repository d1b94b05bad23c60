use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A job posting as seen by the matched-jobs cross-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub salary: String,
    pub status: String,
}

/// Output of one screening. Built once by the assembler, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Matched skills and professions, merged.
    pub matched_skills: BTreeSet<String>,
    /// TF-IDF cosine similarity as a percentage, two decimals.
    pub match_score: f64,
    pub email: String,
    pub phone: String,
    /// HTML-escaped resume text with matched terms wrapped in `<mark>`.
    pub highlighted_text: String,
    /// Catalog jobs mentioning any matched term, in catalog order.
    pub matched_jobs: Vec<JobPosting>,
    /// Total vocabulary size (skills + professions). Display only; not a match count
    /// and never used for scoring.
    pub skills_count: usize,
}
