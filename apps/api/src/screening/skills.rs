use regex::Regex;
use tracing::warn;

use crate::screening::text::whole_word_pattern;

/// Whole-word matcher over a fixed skill list. Patterns compile once, at construction.
pub struct SkillMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SkillMatcher {
    pub fn new(skills: &[String]) -> Self {
        let patterns = skills
            .iter()
            .filter_map(|skill| match Regex::new(&whole_word_pattern(skill)) {
                Ok(re) => Some((skill.clone(), re)),
                Err(e) => {
                    warn!("Skipping skill '{skill}': {e}");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Skills present in `normalized` (see `text::normalize`), in vocabulary order.
    pub fn find(&self, normalized: &str) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(normalized))
            .map(|(skill, _)| skill.clone())
            .collect()
    }
}
