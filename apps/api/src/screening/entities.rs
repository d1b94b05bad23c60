//! Named-entity tagging, used only as an optional recall boost for professions.
//!
//! Default: `NoopEntityTagger`, which finds nothing.
//! Opt-in: `LlmEntityTagger` (ENABLE_LLM_ENTITY_TAGGING=true).
//!
//! `AppState` holds an `Arc<dyn EntityTagger>`, swapped at startup via config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::prompts::{ENTITY_PROMPT_TEMPLATE, ENTITY_SYSTEM};

/// Upper bound on text sent to a remote tagger.
const MAX_TAGGED_CHARS: usize = 12_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    #[serde(rename = "ORG")]
    Organization,
    WorkOfArt,
    Product,
    Person,
    #[serde(rename = "GPE", alias = "LOC", alias = "LOCATION")]
    Location,
    #[serde(other)]
    Other,
}

impl EntityLabel {
    /// Labels whose spans may embed a job title.
    pub fn may_name_role(self) -> bool {
        matches!(self, EntityLabel::Organization | EntityLabel::WorkOfArt | EntityLabel::Product)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("LLM entity tagging failed: {0}")]
    Llm(#[from] LlmError),
}

#[async_trait]
pub trait EntityTagger: Send + Sync {
    async fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, TaggerError>;

    /// Backend label for logs.
    fn name(&self) -> &'static str;
}

pub struct NoopEntityTagger;

#[async_trait]
impl EntityTagger for NoopEntityTagger {
    async fn tag(&self, _text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

pub struct LlmEntityTagger(pub LlmClient);

#[async_trait]
impl EntityTagger for LlmEntityTagger {
    async fn tag(&self, text: &str) -> Result<Vec<EntitySpan>, TaggerError> {
        let prompt = ENTITY_PROMPT_TEMPLATE.replace("{text}", truncate_chars(text, MAX_TAGGED_CHARS));
        Ok(self.0.complete_json::<Vec<EntitySpan>>(&prompt, ENTITY_SYSTEM).await?)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_deserialize_from_ner_tags() {
        let spans: Vec<EntitySpan> = serde_json::from_str(
            r#"[
                {"text": "acme engineering", "label": "ORG"},
                {"text": "the analyst's handbook", "label": "WORK_OF_ART"},
                {"text": "designer pro", "label": "PRODUCT"},
                {"text": "may 2021", "label": "DATE"}
            ]"#,
        )
        .unwrap();
        assert_eq!(spans[0].label, EntityLabel::Organization);
        assert_eq!(spans[1].label, EntityLabel::WorkOfArt);
        assert_eq!(spans[2].label, EntityLabel::Product);
        assert_eq!(spans[3].label, EntityLabel::Other);
    }

    #[test]
    fn test_place_tags_map_to_location() {
        for tag in ["GPE", "LOC", "LOCATION"] {
            let span: EntitySpan =
                serde_json::from_str(&format!(r#"{{"text": "berlin", "label": "{tag}"}}"#)).unwrap();
            assert_eq!(span.label, EntityLabel::Location);
            assert!(!span.label.may_name_role());
        }
        assert_eq!(
            serde_json::to_string(&EntityLabel::Organization).unwrap(),
            r#""ORG""#
        );
    }

    #[test]
    fn test_role_bearing_labels() {
        assert!(EntityLabel::Organization.may_name_role());
        assert!(EntityLabel::Product.may_name_role());
        assert!(!EntityLabel::Person.may_name_role());
        assert!(!EntityLabel::Other.may_name_role());
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[tokio::test]
    async fn test_noop_tagger_finds_nothing() {
        let spans = NoopEntityTagger.tag("acme engineering corp").await.unwrap();
        assert!(spans.is_empty());
    }
}
