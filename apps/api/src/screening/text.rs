//! Text helpers shared by the matchers.

/// Lowercases and replaces every ASCII punctuation character with a space,
/// so punctuation can neither glue nor split tokens.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_punctuation() { ' ' } else { c })
        .collect()
}

/// Regex source matching `term` as a whole word or phrase.
///
/// `\b` is only asserted next to a word character of the term: a boundary
/// after a trailing `+` would require a following word character.
pub fn whole_word_pattern(term: &str) -> String {
    let leading = if term.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trailing = if term.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{leading}{}{trailing}", regex::escape(term))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Python, SQL & AWS."), "python  sql   aws ");
    }

    #[test]
    fn test_normalize_keeps_non_ascii_letters() {
        assert_eq!(normalize("Café-Owner"), "café owner");
    }

    #[test]
    fn test_pattern_for_plain_term() {
        assert_eq!(whole_word_pattern("sql"), r"\bsql\b");
    }

    #[test]
    fn test_pattern_for_symbol_suffix() {
        assert_eq!(whole_word_pattern("c++"), r"\bc\+\+");
    }
}
