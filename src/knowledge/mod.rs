//! Knowledge base for the help widget
//!
//! - **entry**: the question/answer record schema
//! - **matcher**: Tier 1 tag and question-prefix matching
//! - **search**: substring filter behind the browse view
//!
//! The knowledge base is validated once when built and is read-only after
//! that. Entry order is significant: it is the tie-break order for Tier 1
//! matching and the display order for search results.

mod entry;
mod matcher;
mod search;

pub use entry::KnowledgeEntry;
pub use matcher::{QUESTION_PREFIX_CHARS, match_entry};
pub use search::{search, search_in};

use std::collections::HashSet;
use std::path::Path;

use crate::{Error, Result};

/// Knowledge base compiled into the binary
const EMBEDDED_KNOWLEDGE_BASE: &str = include_str!("../../data/knowledge_base.json");

/// Validated, ordered, immutable collection of knowledge entries
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Validate entries and build a knowledge base
    ///
    /// Tags are lowercased but otherwise kept as authored, so padding such as
    /// `" go "` still restricts a match to whole words. Question and answer are
    /// stored verbatim; id and category are trimmed. Entry order is preserved.
    ///
    /// # Errors
    ///
    /// Returns error if an id is empty or duplicated, if an entry has no
    /// question, answer or category, or if its tag list is empty or holds a
    /// blank tag
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut validated = Vec::with_capacity(entries.len());

        for entry in entries {
            let entry = Self::validate(entry)?;
            if !seen.insert(entry.id.clone()) {
                return Err(Error::DuplicateEntryId(entry.id));
            }
            validated.push(entry);
        }

        Ok(Self { entries: validated })
    }

    /// Load the knowledge base compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns error if the embedded data fails to parse or validate
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_KNOWLEDGE_BASE)
    }

    /// Parse and validate a JSON array of entries
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or an entry fails validation
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Load a knowledge base from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let kb = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            entries = kb.len(),
            "loaded knowledge base from file"
        );
        Ok(kb)
    }

    /// Entries in priority order
    #[must_use]
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Look up an entry by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct categories in order of first appearance
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the knowledge base has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(mut entry: KnowledgeEntry) -> Result<KnowledgeEntry> {
        let invalid = |id: &str, reason: &str| Error::InvalidEntry {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        entry.id = entry.id.trim().to_string();
        if entry.id.is_empty() {
            return Err(invalid("", "id is empty"));
        }

        if entry.question.trim().is_empty() {
            return Err(invalid(&entry.id, "question is empty"));
        }

        if entry.answer.trim().is_empty() {
            return Err(invalid(&entry.id, "answer is empty"));
        }

        entry.category = entry.category.trim().to_string();
        if entry.category.is_empty() {
            return Err(invalid(&entry.id, "category is empty"));
        }

        if entry.tags.is_empty() {
            return Err(invalid(&entry.id, "tags are empty"));
        }
        for tag in &mut entry.tags {
            if tag.trim().is_empty() {
                return Err(invalid(&entry.id, "blank tag"));
            }
            *tag = tag.to_lowercase();
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, tags: &[&str]) -> KnowledgeEntry {
        KnowledgeEntry::new(id, format!("Question {id}"), "An answer", "general", tags)
    }

    #[test]
    fn test_embedded_knowledge_base_is_valid() {
        let kb = KnowledgeBase::embedded().unwrap();
        assert!(kb.len() >= 40);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = KnowledgeBase::new(vec![entry("a", &["x"]), entry("a", &["y"])]).unwrap_err();
        assert!(matches!(err, Error::DuplicateEntryId(id) if id == "a"));
    }

    #[test]
    fn test_empty_tags_rejected() {
        let err = KnowledgeBase::new(vec![entry("a", &[])]).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry { ref id, .. } if id == "a"));
    }

    #[test]
    fn test_blank_tag_rejected() {
        let err = KnowledgeBase::new(vec![entry("a", &["ok", "  "])]).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry { .. }));
    }

    #[test]
    fn test_empty_question_rejected() {
        let mut e = entry("a", &["x"]);
        e.question = "   ".to_string();
        assert!(KnowledgeBase::new(vec![e]).is_err());
    }

    #[test]
    fn test_missing_tags_field_fails_to_parse() {
        let json = r#"[{"id":"a","question":"Q","answer":"A","category":"c"}]"#;
        assert!(matches!(
            KnowledgeBase::from_json(json),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_tags_are_lowercased_and_keep_padding() {
        let kb = KnowledgeBase::new(vec![entry("a", &[" Go ", "HOOKS"])]).unwrap();
        assert_eq!(kb.entries()[0].tags, vec![" go ", "hooks"]);
    }

    #[test]
    fn test_padded_tag_matches_whole_word_only() {
        let kb = KnowledgeBase::new(vec![entry("go", &[" go "])]).unwrap();
        assert!(match_entry("should i google it", kb.entries()).is_none());
        assert_eq!(
            match_entry("is go fast enough", kb.entries()).unwrap().id,
            "go"
        );
    }

    #[test]
    fn test_question_and_answer_stored_verbatim() {
        let mut e = entry("a", &["x"]);
        e.question = "  Padded question?  ".to_string();
        e.answer = "Line one.\n  Indented line.\n".to_string();
        let kb = KnowledgeBase::new(vec![e.clone()]).unwrap();
        assert_eq!(kb.entries()[0].question, e.question);
        assert_eq!(kb.entries()[0].answer, e.answer);
    }

    #[test]
    fn test_order_preserved_and_lookup() {
        let kb = KnowledgeBase::new(vec![entry("b", &["x"]), entry("a", &["y"])]).unwrap();
        let ids: Vec<_> = kb.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(kb.get("a").unwrap().tags, vec!["y"]);
        assert!(kb.get("missing").is_none());
    }

    #[test]
    fn test_categories_in_first_appearance_order() {
        let mut a = entry("a", &["x"]);
        a.category = "testing".to_string();
        let mut b = entry("b", &["y"]);
        b.category = "cloud".to_string();
        let mut c = entry("c", &["z"]);
        c.category = "testing".to_string();

        let kb = KnowledgeBase::new(vec![a, b, c]).unwrap();
        assert_eq!(kb.categories(), vec!["testing", "cloud"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","question":"Q","answer":"A","category":"c","tags":["t"]}]"#,
        )
        .unwrap();

        let kb = KnowledgeBase::load(&path).unwrap();
        assert_eq!(kb.len(), 1);
    }
}
