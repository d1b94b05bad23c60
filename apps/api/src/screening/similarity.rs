//! Lexical similarity between a resume and a job description.
//!
//! TF-IDF over the two-document corpus {resume, job}:
//! - tokens: runs of two or more word characters, lowercased, stop words removed
//! - tf: raw counts
//! - idf: ln((1 + n) / (1 + df)) + 1 (smoothed, n = 2)
//! - rows L2-normalised; cosine is their dot product
//!
//! `similarity_score` never fails; degenerate input scores 0.0.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::screening::stop_words::is_stop_word;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern"));

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("one of the documents is empty")]
    EmptyDocument,

    #[error("empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,

    #[error("document has no weighted terms")]
    ZeroVector,
}

type TermCounts = BTreeMap<String, u32>;

fn term_counts(text: &str) -> TermCounts {
    let lowered = text.to_lowercase();
    let mut counts = TermCounts::new();
    for token in TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()) {
        if !is_stop_word(token) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Cosine similarity in [0, 1] of the TF-IDF vectors of `a` and `b`.
pub fn tfidf_cosine(a: &str, b: &str) -> Result<f64, SimilarityError> {
    if a.trim().is_empty() || b.trim().is_empty() {
        return Err(SimilarityError::EmptyDocument);
    }

    let docs = [term_counts(a), term_counts(b)];
    let vocabulary: BTreeSet<&str> = docs
        .iter()
        .flat_map(|d| d.keys().map(String::as_str))
        .collect();
    if vocabulary.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }

    let n = docs.len() as f64;
    let vectors: Vec<Vec<f64>> = docs
        .iter()
        .map(|doc| {
            vocabulary
                .iter()
                .map(|term| {
                    let tf = f64::from(doc.get(*term).copied().unwrap_or(0));
                    let df = docs.iter().filter(|d| d.contains_key(*term)).count() as f64;
                    tf * (((1.0 + n) / (1.0 + df)).ln() + 1.0)
                })
                .collect()
        })
        .collect();

    let norm = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let (na, nb) = (norm(&vectors[0]), norm(&vectors[1]));
    if na == 0.0 || nb == 0.0 {
        return Err(SimilarityError::ZeroVector);
    }

    let dot: f64 = vectors[0].iter().zip(&vectors[1]).map(|(x, y)| x * y).sum();
    Ok((dot / (na * nb)).clamp(0.0, 1.0))
}

/// Percentage score rounded to two decimals. Any failure scores 0.0.
pub fn similarity_score(resume: &str, job_description: &str) -> f64 {
    match tfidf_cosine(resume, job_description) {
        Ok(cosine) => round2(cosine * 100.0),
        Err(e) => {
            warn!("TF-IDF similarity error: {e}");
            0.0
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::text::normalize;

    #[test]
    fn test_identical_text_scores_100() {
        let text = normalize("Senior Rust engineer building distributed storage engines");
        assert_eq!(similarity_score(&text, &text), 100.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(similarity_score("", "python developer"), 0.0);
        assert_eq!(similarity_score("python developer", "   "), 0.0);
        assert_eq!(tfidf_cosine("", "x"), Err(SimilarityError::EmptyDocument));
    }

    #[test]
    fn test_stop_words_only_scores_zero() {
        assert_eq!(
            tfidf_cosine("the and of", "with for the"),
            Err(SimilarityError::EmptyVocabulary)
        );
        assert_eq!(similarity_score("the and of", "with for the"), 0.0);
    }

    #[test]
    fn test_one_side_all_stop_words_scores_zero() {
        assert_eq!(
            tfidf_cosine("python developer", "the and of"),
            Err(SimilarityError::ZeroVector)
        );
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        assert_eq!(similarity_score("python sql", "chef kitchen"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between_bounds() {
        let resume = normalize("Experienced Python developer with SQL and AWS skills");
        let job = normalize("Looking for a Python developer with SQL experience");
        let score = similarity_score(&resume, &job);
        assert!(score > 0.0 && score < 100.0, "score was {score}");
    }

    #[test]
    fn test_score_is_symmetric() {
        let a = normalize("rust tokio axum services");
        let b = normalize("axum web services in rust and go");
        assert_eq!(similarity_score(&a, &b), similarity_score(&b, &a));
    }

    #[test]
    fn test_score_has_two_decimals() {
        let score = similarity_score("alpha beta gamma", "alpha delta");
        assert_eq!(score, round2(score));
    }

    #[test]
    fn test_single_letter_tokens_are_ignored() {
        assert_eq!(
            tfidf_cosine("a b c", "x y z"),
            Err(SimilarityError::EmptyVocabulary)
        );
    }
}
