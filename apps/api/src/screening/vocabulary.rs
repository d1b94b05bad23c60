use serde::{Deserialize, Serialize};

pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "flask",
    "django",
    "machine learning",
    "deep learning",
    "data analysis",
    "sql",
    "nlp",
    "react",
    "aws",
];

pub const DEFAULT_PROFESSIONS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "designer",
    "consultant",
    "technician",
    "administrator",
    "specialist",
    "scientist",
    "coordinator",
    "assistant",
    "officer",
    "intern",
];

/// Fixed term lists the matchers run against. Lowercase, ordered, no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub skills: Vec<String>,
    pub professions: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS, DEFAULT_PROFESSIONS)
    }
}

impl Vocabulary {
    pub fn new<S: AsRef<str>>(skills: &[S], professions: &[S]) -> Self {
        Self {
            skills: clean_terms(skills),
            professions: clean_terms(professions),
        }
    }

    /// UI-only statistic: how many terms the resume was checked against.
    pub fn skills_count(&self) -> usize {
        self.skills.len() + self.professions.len()
    }
}

fn clean_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let term = term.as_ref().trim().to_lowercase();
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.skills.len(), 12);
        assert_eq!(vocab.professions.len(), 14);
        assert_eq!(vocab.skills_count(), 26);
    }

    #[test]
    fn test_new_lowercases_and_keeps_order() {
        let vocab = Vocabulary::new(&["Rust", "SQL", "rust"], &["Engineer"]);
        assert_eq!(vocab.skills, vec!["rust", "sql"]);
        assert_eq!(vocab.professions, vec!["engineer"]);
    }
}
