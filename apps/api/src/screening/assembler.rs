use std::collections::BTreeSet;

use crate::screening::result::JobPosting;

/// Matched skills ∪ matched professions.
pub fn merge_terms(skills: &[String], professions: &BTreeSet<String>) -> BTreeSet<String> {
    skills.iter().cloned().chain(professions.iter().cloned()).collect()
}

/// Catalog jobs whose title, company or description contains any term.
/// Keeps catalog order; no ranking.
pub fn match_jobs(catalog: &[JobPosting], terms: &BTreeSet<String>) -> Vec<JobPosting> {
    if terms.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|job| {
            let combined = format!("{} {} {}", job.title, job.company, job.description).to_lowercase();
            terms.iter().any(|t| combined.contains(&t.to_lowercase()))
        })
        .cloned()
        .collect()
}
