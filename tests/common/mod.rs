//! Shared test utilities

#![allow(dead_code)]

use std::sync::Arc;

use tutor_assist::{
    Engine, FallbackPool, FixedSelector, KeywordRule, KnowledgeBase, KnowledgeEntry, RuleTable,
};

/// Fallback responses used by the fixture engine
pub const FIXTURE_FALLBACKS: &[&str] = &["fallback one", "fallback two", "fallback three"];

/// Small knowledge base exercising scan order and tier overlap
#[must_use]
pub fn fixture_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(vec![
        KnowledgeEntry::new(
            "java",
            "Java on the JVM",
            "Install a JDK first.",
            "languages",
            &["java"],
        ),
        KnowledgeEntry::new(
            "javascript",
            "JavaScript in the browser",
            "Open the console and start typing.",
            "languages",
            &["javascript"],
        ),
        KnowledgeEntry::new(
            "postgres",
            "Postgres indexes",
            "Index the columns you filter on.",
            "databases",
            &["postgres", "index"],
        ),
    ])
    .expect("fixture knowledge base is valid")
}

/// Rules whose keywords overlap the fixture tags
#[must_use]
pub fn fixture_rules() -> RuleTable {
    RuleTable::new(vec![
        KeywordRule::new(&["hello", "hi there"], "Hello! Ask me about a lesson."),
        KeywordRule::new(&["postgres", "database"], "Databases are covered in unit 4."),
    ])
    .expect("fixture rules are valid")
}

/// Fixture fallback pool
#[must_use]
pub fn fixture_pool() -> FallbackPool {
    FallbackPool::new(FIXTURE_FALLBACKS.iter().map(|s| (*s).to_string()).collect())
        .expect("fixture pool is valid")
}

/// Engine over the fixtures with a pinned fallback pick
#[must_use]
pub fn fixture_engine() -> Engine {
    Engine::new(fixture_knowledge_base(), fixture_rules(), fixture_pool())
        .with_selector(Arc::new(FixedSelector(0)))
}

/// Engine over the embedded data
#[must_use]
pub fn embedded_engine() -> Engine {
    Engine::embedded().expect("embedded data is valid")
}
