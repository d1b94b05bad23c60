//! Screening pipeline.
//!
//! `ScreeningEngine::screen_text` is the pure core. `ScreeningEngine::screen`
//! wraps it for request handlers: PDF extraction and text analysis run on
//! `spawn_blocking` under a timeout, entity tagging runs concurrently with the
//! analysis, and every failure degrades to a default instead of an error.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::screening::assembler::{match_jobs, merge_terms};
use crate::screening::contact::{extract_contact_info, ContactInfo};
use crate::screening::entities::{EntitySpan, EntityTagger};
use crate::screening::extractor::{extract_text, ResumeDocument};
use crate::screening::highlight::highlight;
use crate::screening::professions::{entity_professions, keyword_professions};
use crate::screening::result::{JobPosting, ScreeningResult};
use crate::screening::similarity::similarity_score;
use crate::screening::skills::SkillMatcher;
use crate::screening::text::normalize;
use crate::screening::vocabulary::Vocabulary;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Everything computed from the two texts alone.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnalysis {
    pub contact: ContactInfo,
    pub skills: Vec<String>,
    pub keyword_professions: BTreeSet<String>,
    pub score: f64,
}

impl TextAnalysis {
    /// What a screening reports when analysis could not run at all.
    pub fn degraded() -> Self {
        Self {
            contact: ContactInfo::not_detected(),
            skills: Vec::new(),
            keyword_professions: BTreeSet::new(),
            score: 0.0,
        }
    }
}

pub struct ScreeningEngine {
    vocabulary: Vocabulary,
    skill_matcher: SkillMatcher,
    extraction_timeout: Duration,
    analysis_timeout: Duration,
}

impl ScreeningEngine {
    pub fn new(vocabulary: Vocabulary) -> Self {
        let skill_matcher = SkillMatcher::new(&vocabulary.skills);
        Self {
            vocabulary,
            skill_matcher,
            extraction_timeout: DEFAULT_TIMEOUT,
            analysis_timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, extraction: Duration, analysis: Duration) -> Self {
        self.extraction_timeout = extraction;
        self.analysis_timeout = analysis;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Contacts, skills, keyword professions and similarity. Pure and CPU-bound.
    pub fn analyze(&self, resume_text: &str, job_description: &str) -> TextAnalysis {
        let resume_clean = normalize(resume_text);
        let job_clean = normalize(job_description);

        TextAnalysis {
            contact: extract_contact_info(resume_text),
            skills: self.skill_matcher.find(&resume_clean),
            keyword_professions: keyword_professions(&self.vocabulary.professions, resume_text),
            score: similarity_score(&resume_clean, &job_clean),
        }
    }

    /// Merges the analysis with the entity pass, highlights, and cross-references jobs.
    pub fn assemble(
        &self,
        resume_text: &str,
        analysis: TextAnalysis,
        entities: &[EntitySpan],
        catalog: &[JobPosting],
    ) -> ScreeningResult {
        let mut result = self.merge(analysis, entities);
        result.highlighted_text =
            highlight(resume_text, result.matched_skills.iter().map(String::as_str));
        result.matched_jobs = match_jobs(catalog, &result.matched_skills);
        result
    }

    /// The result before highlighting and job matching: text left empty, no jobs.
    fn merge(&self, analysis: TextAnalysis, entities: &[EntitySpan]) -> ScreeningResult {
        let mut professions = analysis.keyword_professions;
        professions.extend(entity_professions(&self.vocabulary.professions, entities));

        ScreeningResult {
            matched_skills: merge_terms(&analysis.skills, &professions),
            match_score: analysis.score,
            email: analysis.contact.email,
            phone: analysis.contact.phone,
            highlighted_text: String::new(),
            matched_jobs: Vec::new(),
            skills_count: self.vocabulary.skills_count(),
        }
    }

    /// The whole core on already-extracted text.
    pub fn screen_text(
        &self,
        resume_text: &str,
        job_description: &str,
        entities: &[EntitySpan],
        catalog: &[JobPosting],
    ) -> ScreeningResult {
        let analysis = self.analyze(resume_text, job_description);
        self.assemble(resume_text, analysis, entities, catalog)
    }

    /// Screens a document end to end with bounded extraction and analysis time.
    pub async fn screen(
        self: Arc<Self>,
        document: ResumeDocument,
        job_description: String,
        tagger: &dyn EntityTagger,
        catalog: &[JobPosting],
    ) -> ScreeningResult {
        let resume_text = self.extract_bounded(document).await;

        let analysis = Arc::clone(&self).analyze_bounded(resume_text.clone(), job_description);
        let entities = tag_entities(tagger, &resume_text);
        let (analysis, entities) = tokio::join!(analysis, entities);

        let result = self
            .assemble_bounded(resume_text, analysis, &entities, catalog.to_vec())
            .await;
        info!(
            score = result.match_score,
            matched = result.matched_skills.len(),
            jobs = result.matched_jobs.len(),
            "Screening complete"
        );
        result
    }

    async fn extract_bounded(&self, document: ResumeDocument) -> String {
        let size = document.bytes.len();
        let task = tokio::task::spawn_blocking(move || extract_text(&document));
        match tokio::time::timeout(self.extraction_timeout, task).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Text extraction task failed: {e}");
                String::new()
            }
            Err(_) => {
                warn!(
                    "Text extraction exceeded {:?} for a {size}-byte document",
                    self.extraction_timeout
                );
                String::new()
            }
        }
    }

    async fn analyze_bounded(
        self: Arc<Self>,
        resume_text: String,
        job_description: String,
    ) -> TextAnalysis {
        let limit = self.analysis_timeout;
        let task = tokio::task::spawn_blocking(move || self.analyze(&resume_text, &job_description));
        match tokio::time::timeout(limit, task).await {
            Ok(Ok(analysis)) => analysis,
            Ok(Err(e)) => {
                warn!("Text analysis task failed: {e}");
                TextAnalysis::degraded()
            }
            Err(_) => {
                warn!("Text analysis exceeded {limit:?}");
                TextAnalysis::degraded()
            }
        }
    }

    /// Highlighting and job matching off the async worker, under the analysis timeout.
    /// On timeout the text is returned escaped but unmarked, with no matched jobs.
    async fn assemble_bounded(
        &self,
        resume_text: String,
        analysis: TextAnalysis,
        entities: &[EntitySpan],
        catalog: Vec<JobPosting>,
    ) -> ScreeningResult {
        let mut result = self.merge(analysis, entities);
        let terms = result.matched_skills.clone();
        let text = resume_text.clone();
        let task = tokio::task::spawn_blocking(move || {
            let highlighted = highlight(&text, terms.iter().map(String::as_str));
            (highlighted, match_jobs(&catalog, &terms))
        });

        match tokio::time::timeout(self.analysis_timeout, task).await {
            Ok(Ok((highlighted, jobs))) => {
                result.highlighted_text = highlighted;
                result.matched_jobs = jobs;
            }
            Ok(Err(e)) => {
                warn!("Highlighting task failed: {e}");
                result.highlighted_text = html_escape::encode_text(&resume_text).into_owned();
            }
            Err(_) => {
                warn!("Highlighting exceeded {:?}", self.analysis_timeout);
                result.highlighted_text = html_escape::encode_text(&resume_text).into_owned();
            }
        }
        result
    }
}

/// Runs the tagger over the lowercased text. Failures mean no entities.
async fn tag_entities(tagger: &dyn EntityTagger, resume_text: &str) -> Vec<EntitySpan> {
    if resume_text.trim().is_empty() {
        return Vec::new();
    }
    match tagger.tag(&resume_text.to_lowercase()).await {
        Ok(entities) => entities,
        Err(e) => {
            warn!("Entity tagger '{}' failed: {e}", tagger.name());
            Vec::new()
        }
    }
}
