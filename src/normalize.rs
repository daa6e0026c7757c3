//! Query normalization applied before any matching

/// Lowercase and trim raw user input
///
/// Interior whitespace and punctuation are left untouched; matching is plain
/// substring containment, so `"what's"` stays `"what's"`.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Whether input is empty or whitespace-only and must not reach the matchers
#[must_use]
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
