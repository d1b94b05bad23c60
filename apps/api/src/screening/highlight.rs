//! Re-renders resume text as HTML with matched terms marked.

use std::collections::BTreeMap;

use regex::RegexBuilder;
use tracing::debug;

use crate::screening::text::whole_word_pattern;

pub const MARK_OPEN: &str =
    "<mark style='background:#FFD54F;padding:0.05rem 0.15rem;border-radius:0.15rem;'>";
pub const MARK_CLOSE: &str = "</mark>";

/// Wraps every case-insensitive whole-word occurrence of each term in `<mark>`.
///
/// Longer terms claim their spans first; a shorter term overlapping a claimed
/// span is not marked, so markers never nest. Terms whose pattern fails to
/// compile are skipped. All text, marked or not, is HTML-escaped.
pub fn highlight<'a, I>(text: &str, terms: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ordered: Vec<&str> = terms.into_iter().filter(|t| !t.trim().is_empty()).collect();
    // Stable sort: ties keep caller order.
    ordered.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

    // start -> end of every claimed span; claimed spans never overlap.
    let mut spans: BTreeMap<usize, usize> = BTreeMap::new();
    for term in ordered {
        let re = match RegexBuilder::new(&whole_word_pattern(term))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                debug!("Skipping highlight for '{term}': {e}");
                continue;
            }
        };
        for m in re.find_iter(text) {
            if m.start() < m.end() && !overlaps_claimed(&spans, m.start(), m.end()) {
                spans.insert(m.start(), m.end());
            }
        }
    }

    let mut out = String::with_capacity(text.len() + spans.len() * (MARK_OPEN.len() + 8));
    let mut cursor = 0;
    for (start, end) in spans {
        out.push_str(&html_escape::encode_text(&text[cursor..start]));
        out.push_str(MARK_OPEN);
        out.push_str(&html_escape::encode_text(&text[start..end]));
        out.push_str(MARK_CLOSE);
        cursor = end;
    }
    out.push_str(&html_escape::encode_text(&text[cursor..]));
    out
}

/// Only the last span starting before `end` can reach into `[start, end)`.
fn overlaps_claimed(spans: &BTreeMap<usize, usize>, start: usize, end: usize) -> bool {
    spans
        .range(..end)
        .next_back()
        .is_some_and(|(_, &claimed_end)| claimed_end > start)
}
