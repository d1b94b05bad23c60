use std::collections::BTreeSet;

use crate::screening::entities::EntitySpan;

/// Keyword pass: every term contained in the lowercased text.
/// Substring containment on purpose, so "engineering" yields "engineer".
pub fn keyword_professions(professions: &[String], text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    professions
        .iter()
        .filter(|p| lowered.contains(p.as_str()))
        .cloned()
        .collect()
}

/// Entity pass: terms contained in organization, work-of-art or product spans.
pub fn entity_professions(professions: &[String], entities: &[EntitySpan]) -> BTreeSet<String> {
    let mut matched = BTreeSet::new();
    for entity in entities.iter().filter(|e| e.label.may_name_role()) {
        let span = entity.text.to_lowercase();
        for prof in professions {
            if span.contains(prof.as_str()) {
                matched.insert(prof.clone());
            }
        }
    }
    matched
}

/// Union of both passes. With no entities this is exactly the keyword pass.
pub fn extract_professions(
    professions: &[String],
    text: &str,
    entities: &[EntitySpan],
) -> BTreeSet<String> {
    let mut matched = keyword_professions(professions, text);
    matched.extend(entity_professions(professions, entities));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::entities::EntityLabel;
    use crate::screening::vocabulary::Vocabulary;

    fn vocab() -> Vec<String> {
        Vocabulary::default().professions
    }

    fn span(text: &str, label: EntityLabel) -> EntitySpan {
        EntitySpan {
            text: text.to_string(),
            label,
        }
    }

    #[test]
    fn test_keyword_pass_is_case_insensitive_substring() {
        let found = keyword_professions(&vocab(), "Software ENGINEERING lead, Data Analyst");
        assert!(found.contains("engineer"));
        assert!(found.contains("analyst"));
        assert!(!found.contains("manager"));
    }

    #[test]
    fn test_entity_pass_only_uses_role_bearing_labels() {
        let entities = vec![
            span("consultant partners llc", EntityLabel::Organization),
            span("officer jones", EntityLabel::Person),
        ];
        let found = entity_professions(&vocab(), &entities);
        assert_eq!(found, BTreeSet::from(["consultant".to_string()]));
    }

    #[test]
    fn test_entity_pass_never_removes_keyword_matches() {
        let text = "intern at a studio; built a tool called designerkit";
        let entities = vec![span("designerkit", EntityLabel::Product)];

        let without = extract_professions(&vocab(), text, &[]);
        let with = extract_professions(&vocab(), text, &entities);

        assert!(without.is_subset(&with));
        assert_eq!(without, keyword_professions(&vocab(), text));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_professions(&vocab(), "", &[]).is_empty());
    }
}
