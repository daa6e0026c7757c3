//! Knowledge entry schema

use serde::{Deserialize, Serialize};

/// A single question/answer record in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KnowledgeEntry {
    /// Stable identifier, unique across the knowledge base
    pub id: String,

    /// Canonical phrasing of the question
    pub question: String,

    /// Canned answer shown to the user
    pub answer: String,

    /// Grouping label used for filter shortcuts
    pub category: String,

    /// Lowercase keywords used for matching and search
    pub tags: Vec<String>,
}

impl KnowledgeEntry {
    /// Build an entry from borrowed parts
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
        tags: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    /// Whether this entry belongs to `category` (case-insensitive)
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.trim().to_lowercase()
    }
}
