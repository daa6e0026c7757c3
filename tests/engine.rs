//! Classification and search behaviour over fixture and embedded data

use tutor_assist::{
    Classification, ClassificationKind, Engine, FallbackPool, KeywordRule, KnowledgeBase,
    KnowledgeEntry, RuleTable,
};

mod common;
use common::{FIXTURE_FALLBACKS, embedded_engine, fixture_engine};

#[test]
fn test_start_learning_react_hits_getting_started_entry() {
    let engine = embedded_engine();
    let result = engine.classify("how do I start learning react").unwrap();

    let entry = result.entry().expect("knowledge base hit");
    assert_eq!(entry.id, "react-getting-started");
    assert_eq!(
        entry.tags,
        vec!["react", "beginner", "learning-path", "getting-started"]
    );

    let stored = engine.knowledge().get("react-getting-started").unwrap();
    assert_eq!(result.text(), stored.answer);
}

#[test]
fn test_joke_falls_back_to_pool() {
    let engine = embedded_engine();
    let result = engine.classify("tell me a joke").unwrap();

    assert_eq!(result.kind(), ClassificationKind::Fallback);
    assert!(FallbackPool::default().contains(result.text()));
}

#[test]
fn test_classification_is_deterministic() {
    let engine = embedded_engine();
    for input in ["react hooks", "hello", "docker compose", "what is the weather"] {
        let first = engine.classify(input).unwrap();
        let second = engine.classify(input).unwrap();
        assert_eq!(first.kind(), second.kind(), "kind changed for {input:?}");
        if first.kind() != ClassificationKind::Fallback {
            assert_eq!(first, second, "payload changed for {input:?}");
        }
    }
}

#[test]
fn test_earlier_entry_wins_on_overlap() {
    // "java" is a substring of "javascript" and comes first in scan order
    let result = fixture_engine().classify("what is javascript").unwrap();
    assert_eq!(result.entry().unwrap().id, "java");
}

#[test]
fn test_question_prefix_matches_without_tag() {
    let kb = KnowledgeBase::new(vec![KnowledgeEntry::new(
        "flexbox",
        "Flexbox or CSS Grid?",
        "Flexbox for one axis, grid for two.",
        "frontend",
        &["justify-content"],
    )])
    .unwrap();
    let engine = Engine::new(kb, RuleTable::default(), FallbackPool::default());

    // First ten characters of the question are "flexbox or"
    let result = engine.classify("Flexbox or grid for a navbar?").unwrap();
    assert_eq!(result.entry().unwrap().id, "flexbox");

    let result = engine.classify("flexbox layout").unwrap();
    assert_eq!(result.kind(), ClassificationKind::Fallback);
}

#[test]
fn test_kb_tier_beats_rule_tier() {
    // "postgres" is both a tag and a rule keyword
    let result = fixture_engine().classify("postgres").unwrap();
    assert_eq!(result.kind(), ClassificationKind::Kb);
    assert_eq!(result.entry().unwrap().id, "postgres");
}

#[test]
fn test_rule_tier_when_no_entry_matches() {
    let result = fixture_engine().classify("my database is slow").unwrap();
    assert_eq!(
        result,
        Classification::Rule {
            text: "Databases are covered in unit 4.".to_string()
        }
    );

    let result = fixture_engine().classify("Hello").unwrap();
    assert_eq!(result.text(), "Hello! Ask me about a lesson.");
}

#[test]
fn test_padded_keyword_does_not_fire_inside_words() {
    let rules = RuleTable::new(vec![KeywordRule::new(&[" go "], "Go is covered in unit 7.")]).unwrap();
    let engine = Engine::new(KnowledgeBase::new(vec![]).unwrap(), rules, FallbackPool::default());

    let result = engine.classify("should i google it").unwrap();
    assert_eq!(result.kind(), ClassificationKind::Fallback);

    let result = engine.classify("is go hard to learn").unwrap();
    assert_eq!(result.text(), "Go is covered in unit 7.");
}

#[test]
fn test_kb_answer_returned_verbatim() {
    let answer = "  Start with the docs.\n\n  Then build something small.  ";
    let kb = KnowledgeBase::new(vec![KnowledgeEntry::new(
        "svelte",
        "Svelte basics",
        answer,
        "frontend",
        &["svelte"],
    )])
    .unwrap();
    let engine = Engine::new(kb, RuleTable::default(), FallbackPool::default());

    assert_eq!(engine.classify("svelte").unwrap().text(), answer);
}

#[test]
fn test_fallback_uses_configured_pool() {
    let result = fixture_engine().classify("tell me a joke").unwrap();
    assert_eq!(result.kind(), ClassificationKind::Fallback);
    assert_eq!(result.text(), FIXTURE_FALLBACKS[0]);
}

#[test]
fn test_case_insensitive_classification() {
    let engine = embedded_engine();
    let upper = engine.classify("REACT hooks").unwrap();
    let lower = engine.classify("react hooks").unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper.entry().unwrap().id, "react-hooks");
}

#[test]
fn test_blank_input_yields_nothing() {
    let engine = fixture_engine();
    assert!(engine.classify("").is_none());
    assert!(engine.classify(" \t ").is_none());
}

#[test]
fn test_empty_search_returns_full_kb_in_order() {
    let engine = embedded_engine();
    let all: Vec<&KnowledgeEntry> = engine.knowledge().entries().iter().collect();
    assert_eq!(engine.search(""), all);
}

#[test]
fn test_search_is_idempotent() {
    let engine = embedded_engine();
    for query in ["react", "SQL", "test", "zzz"] {
        assert_eq!(engine.search(query), engine.search(query));
    }
}

#[test]
fn test_search_substring_law() {
    let engine = embedded_engine();
    for query in ["react", "Docker", "join", "mock", "saved", "x"] {
        let needle = query.to_lowercase();
        let results = engine.search(query);

        for entry in engine.knowledge().entries() {
            let matches = entry.question.to_lowercase().contains(&needle)
                || entry.answer.to_lowercase().contains(&needle)
                || entry.tags.iter().any(|t| t.contains(&needle));
            assert_eq!(
                results.contains(&entry),
                matches,
                "entry {} for query {query:?}",
                entry.id
            );
        }
    }
}

#[test]
fn test_search_keeps_kb_order() {
    let engine = embedded_engine();
    let entries = engine.knowledge().entries();
    let positions: Vec<usize> = engine
        .search("a")
        .iter()
        .map(|hit| entries.iter().position(|e| e.id == hit.id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_category_filter() {
    let engine = fixture_engine();
    let ids: Vec<&str> = engine
        .search_in("", Some("Languages"))
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["java", "javascript"]);

    assert!(engine.search_in("index", Some("languages")).is_empty());
    assert_eq!(engine.categories(), vec!["languages", "databases"]);
}
