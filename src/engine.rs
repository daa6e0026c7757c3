//! Classification engine: the synchronous core behind the help widget
//!
//! Input flows through three ordered stages and the first one that produces
//! something wins:
//!
//! 1. Tier 1, knowledge base tag or question-prefix match
//! 2. Tier 2, keyword rule match
//! 3. Fallback pool
//!
//! The engine holds no per-turn state; the same input always lands in the
//! same tier with the same payload (only the fallback pick may vary, and it is
//! always a pool member).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fallback::{FallbackPool, RandomSelector, Selector};
use crate::knowledge::{self, KnowledgeBase, KnowledgeEntry};
use crate::normalize::{is_blank, normalize};
use crate::rules::{self, RuleTable};
use crate::Result;

/// Which stage produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationKind {
    /// Knowledge base match
    Kb,
    /// Keyword rule match
    Rule,
    /// Nothing matched
    Fallback,
}

impl ClassificationKind {
    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kb => "kb",
            Self::Rule => "rule",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Classification {
    /// Tier 1 hit
    Kb { entry: KnowledgeEntry },
    /// Tier 2 hit
    Rule { text: String },
    /// Generic response from the fallback pool
    Fallback { text: String },
}

impl Classification {
    /// Stage that produced this result
    #[must_use]
    pub const fn kind(&self) -> ClassificationKind {
        match self {
            Self::Kb { .. } => ClassificationKind::Kb,
            Self::Rule { .. } => ClassificationKind::Rule,
            Self::Fallback { .. } => ClassificationKind::Fallback,
        }
    }

    /// Text to show the user
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Kb { entry } => &entry.answer,
            Self::Rule { text } | Self::Fallback { text } => text,
        }
    }

    /// Matched entry, for Tier 1 results
    #[must_use]
    pub const fn entry(&self) -> Option<&KnowledgeEntry> {
        match self {
            Self::Kb { entry } => Some(entry),
            _ => None,
        }
    }
}

/// Knowledge base, rule table and fallback pool behind one API
#[derive(Clone)]
pub struct Engine {
    knowledge: KnowledgeBase,
    rules: RuleTable,
    fallback: FallbackPool,
    selector: Arc<dyn Selector>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("entries", &self.knowledge.len())
            .field("rules", &self.rules.len())
            .field("fallback_responses", &self.fallback.responses().len())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Assemble an engine from validated parts, picking fallbacks at random
    #[must_use]
    pub fn new(knowledge: KnowledgeBase, rules: RuleTable, fallback: FallbackPool) -> Self {
        tracing::info!(
            entries = knowledge.len(),
            rules = rules.len(),
            fallback_responses = fallback.responses().len(),
            "help engine ready"
        );

        Self {
            knowledge,
            rules,
            fallback,
            selector: Arc::new(RandomSelector),
        }
    }

    /// Engine over the embedded knowledge base, rule table and default pool
    ///
    /// # Errors
    ///
    /// Returns error if the embedded data fails validation
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(
            KnowledgeBase::embedded()?,
            RuleTable::embedded()?,
            FallbackPool::default(),
        ))
    }

    /// Replace the fallback selection strategy
    #[must_use]
    pub fn with_selector(mut self, selector: Arc<dyn Selector>) -> Self {
        self.selector = selector;
        self
    }

    /// Classify raw user input
    ///
    /// Returns `None` only for empty or whitespace-only input, which callers
    /// should not submit at all. Any other input always yields a result.
    #[must_use]
    pub fn classify(&self, input: &str) -> Option<Classification> {
        if is_blank(input) {
            return None;
        }

        let normalized = normalize(input);

        if let Some(entry) = knowledge::match_entry(&normalized, self.knowledge.entries()) {
            tracing::debug!(tier = "kb", entry_id = %entry.id, "classified input");
            return Some(Classification::Kb {
                entry: entry.clone(),
            });
        }

        if let Some((index, text)) = rules::dispatch(&normalized, self.rules.rules()) {
            tracing::debug!(tier = "rule", rule_index = index, "classified input");
            return Some(Classification::Rule {
                text: text.to_string(),
            });
        }

        tracing::debug!(tier = "fallback", "classified input");
        Some(Classification::Fallback {
            text: self.fallback.select(self.selector.as_ref()).to_string(),
        })
    }

    /// Case-insensitive substring search over the knowledge base
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&KnowledgeEntry> {
        knowledge::search(query, self.knowledge.entries())
    }

    /// Search restricted to one category when given
    #[must_use]
    pub fn search_in(&self, query: &str, category: Option<&str>) -> Vec<&KnowledgeEntry> {
        knowledge::search_in(query, category, self.knowledge.entries())
    }

    /// Distinct knowledge base categories in display order
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.knowledge.categories()
    }

    /// Selection strategy shared with the response scheduler
    #[must_use]
    pub fn selector(&self) -> Arc<dyn Selector> {
        Arc::clone(&self.selector)
    }

    /// Underlying knowledge base
    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Underlying rule table
    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Underlying fallback pool
    #[must_use]
    pub const fn fallback(&self) -> &FallbackPool {
        &self.fallback
    }
}
