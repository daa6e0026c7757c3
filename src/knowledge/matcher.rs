//! Tier 1: tag and question-prefix matching

use super::KnowledgeEntry;

/// Number of leading question characters compared against the input
pub const QUESTION_PREFIX_CHARS: usize = 10;

/// Return the first entry whose tags or question prefix occur in `normalized`
///
/// An entry matches when any of its tags is a substring of the input, or when
/// the first [`QUESTION_PREFIX_CHARS`] characters of its lowercased question
/// are. Scanning stops at the first hit, so earlier entries shadow later ones
/// that would also match: KB order is the priority order.
///
/// `normalized` must already be lowercased and trimmed.
#[must_use]
pub fn match_entry<'a>(normalized: &str, entries: &'a [KnowledgeEntry]) -> Option<&'a KnowledgeEntry> {
    if normalized.is_empty() {
        return None;
    }

    entries.iter().find(|entry| {
        entry.tags.iter().any(|tag| normalized.contains(tag.as_str()))
            || normalized.contains(&question_prefix(&entry.question))
    })
}

/// Lowercased leading characters of a question
fn question_prefix(question: &str) -> String {
    question
        .to_lowercase()
        .chars()
        .take(QUESTION_PREFIX_CHARS)
        .collect()
}
