//! Substring search used by the knowledge base browsing view

use super::KnowledgeEntry;

/// Return every entry whose question, answer, or any tag contains `query`
///
/// Comparison is case-insensitive. Results keep KB order and are never
/// re-ranked; an empty query returns every entry.
#[must_use]
pub fn search<'a>(query: &str, entries: &'a [KnowledgeEntry]) -> Vec<&'a KnowledgeEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry_contains(entry, &needle))
        .collect()
}

/// Like [`search`], restricted to entries in `category` when one is given
///
/// A blank category means no filter.
#[must_use]
pub fn search_in<'a>(
    query: &str,
    category: Option<&str>,
    entries: &'a [KnowledgeEntry],
) -> Vec<&'a KnowledgeEntry> {
    let needle = query.to_lowercase();
    let category = category.filter(|c| !c.trim().is_empty());
    entries
        .iter()
        .filter(|entry| category.is_none_or(|c| entry.in_category(c)))
        .filter(|entry| entry_contains(entry, &needle))
        .collect()
}

fn entry_contains(entry: &KnowledgeEntry, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    entry.question.to_lowercase().contains(needle)
        || entry.answer.to_lowercase().contains(needle)
        || entry.tags.iter().any(|tag| tag.contains(needle))
}
