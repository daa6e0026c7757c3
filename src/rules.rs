//! Tier 2: topic-level keyword rules
//!
//! Rules are evaluated in declaration order and the first rule with any
//! keyword contained in the input wins. They are deliberately coarser than
//! knowledge base tags and only run when Tier 1 found nothing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Rule table compiled into the binary
const EMBEDDED_RULES: &str = include_str!("../data/keyword_rules.json");

/// Keyword rule: any keyword found in the input emits the static response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeywordRule {
    /// Lowercase substrings that trigger this rule
    pub keywords: Vec<String>,

    /// Response text emitted verbatim
    pub response: String,
}

impl KeywordRule {
    /// Build a rule from borrowed parts
    #[must_use]
    pub fn new(keywords: &[&str], response: impl Into<String>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            response: response.into(),
        }
    }

    /// Whether any keyword occurs in `normalized`
    fn fires(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

/// Validated, ordered rule table
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<KeywordRule>,
}

impl RuleTable {
    /// Validate rules and build a table, preserving order
    ///
    /// Keywords are lowercased but otherwise kept as authored; padding such
    /// as `" go "` limits a keyword to whole-word hits.
    ///
    /// # Errors
    ///
    /// Returns error if a rule has no keywords, a blank keyword, or an empty
    /// response
    pub fn new(rules: Vec<KeywordRule>) -> Result<Self> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| Self::validate(index, rule))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Load the rule table compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns error if the embedded data fails to parse or validate
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_RULES)
    }

    /// Parse and validate a JSON array of rules
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a rule fails validation
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<KeywordRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    /// Load a rule table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), rules = table.len(), "loaded keyword rules from file");
        Ok(table)
    }

    /// Rules in evaluation order
    #[must_use]
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn validate(index: usize, mut rule: KeywordRule) -> Result<KeywordRule> {
        let invalid = |reason: &str| Error::InvalidRule {
            index,
            reason: reason.to_string(),
        };

        if rule.keywords.is_empty() {
            return Err(invalid("no keywords"));
        }
        for keyword in &mut rule.keywords {
            if keyword.trim().is_empty() {
                return Err(invalid("blank keyword"));
            }
            *keyword = keyword.to_lowercase();
        }

        if rule.response.trim().is_empty() {
            return Err(invalid("empty response"));
        }

        Ok(rule)
    }
}

/// Return the index and response of the first rule that fires
///
/// `normalized` must already be lowercased and trimmed.
#[must_use]
pub fn dispatch<'a>(normalized: &str, rules: &'a [KeywordRule]) -> Option<(usize, &'a str)> {
    if normalized.is_empty() {
        return None;
    }

    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.fires(normalized))
        .map(|(index, rule)| (index, rule.response.as_str()))
}
