//! Integration tests exercising the mneme library API from an external crate.

use serde_json::json;
use tempfile::TempDir;

use mneme::errors::Error;
use mneme::relevance::{DEFAULT_THRESHOLD, extract_keywords};
use mneme::{
    MemoryState, MemoryStore, PromptContext, RelevanceRetriever, find_relevant,
    get_relevant_context,
};

fn open(dir: &TempDir, limit: usize) -> MemoryStore {
    MemoryStore::open(dir.path().join("memory.json"), limit).expect("Failed to open store")
}

/// Append, then retrieve the relevant turns for a follow-up query.
#[test]
fn test_append_then_find_relevant_ranks_full_match_first() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);

    store
        .append_turn("How do I install it?", "Run pip install docboost.")
        .unwrap();
    store
        .append_turn("What is pip?", "pip is a package manager.")
        .unwrap();

    assert_eq!(extract_keywords("pip install"), vec!["pip", "install"]);

    let results = find_relevant(store.turns(), "pip install", DEFAULT_THRESHOLD);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].relevance, 1.0);
    assert!(results[0].content.contains("docboost"));
    assert_eq!(results[1].relevance, 0.5);
    assert_eq!(
        results[1].content,
        "User: What is pip?\nAI: pip is a package manager."
    );
}

/// N > limit appends leave exactly the last `limit` turns, surviving a reopen.
#[test]
fn test_bounded_history_across_sessions() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = open(&dir, 4);
        for i in 0..9 {
            store.append_turn(&format!("q{i}"), &format!("a{i}")).unwrap();
        }
        assert_eq!(store.turns().len(), 4);
    }

    let store = open(&dir, 4);
    let inputs: Vec<_> = store.turns().iter().map(|t| t.user_input.clone()).collect();
    assert_eq!(inputs, vec!["q5", "q6", "q7", "q8"]);
}

/// Whatever the store reaches is what the next session loads.
#[test]
fn test_round_trip_between_sessions() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);
    store.append_turn("hello", "hi").unwrap();
    store.set_fact("name", "Ada").unwrap();
    store.set_fact("prefs", json!({"tone": "casual", "emoji": false})).unwrap();

    let reloaded: MemoryState = MemoryStore::load(store.path());
    assert_eq!(&reloaded, store.state());
}

/// Garbage on disk must not crash the session.
#[test]
fn test_corrupt_storage_yields_empty_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let state = MemoryStore::load(&path);
    assert!(state.turns.is_empty());
    assert!(state.facts.is_empty());
}

#[test]
fn test_fact_upsert_no_duplicates() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);
    store.set_fact("tone", "formal").unwrap();
    store.set_fact("tone", "casual").unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(raw.matches("\"tone\"").count(), 1);
    assert_eq!(store.facts()["tone"], json!("casual"));
}

#[test]
fn test_empty_context_is_empty_string() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);
    store.append_turn("What is pip?", "A package manager.").unwrap();

    assert_eq!(get_relevant_context(store.turns(), "kubernetes helm"), "");
    assert_eq!(get_relevant_context(store.turns(), "is the"), "");
}

#[test]
fn test_context_block_layout() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);
    store.append_turn("What is pip?", "A package manager.").unwrap();

    let context = get_relevant_context(store.turns(), "pip");
    assert!(context.starts_with("Relevant information from memory:\n\n["));
    assert!(context.ends_with("]\nUser: What is pip?\nAI: A package manager.\n\n"));
}

#[test]
fn test_retriever_threshold_one_keeps_full_matches() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);
    store.append_turn("rust borrow checker", "ownership rules").unwrap();
    store.append_turn("rust macros", "hygiene").unwrap();

    let results = RelevanceRetriever::with_threshold(1.0).find_relevant(store.turns(), "rust borrow");
    assert_eq!(results.len(), 1);
    assert!(results[0].content.contains("borrow checker"));
}

#[test]
fn test_prompt_context_assembly() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir, 10);
    store
        .record_exchange("my name is Ada. How do I install it?", "Run pip install docboost.")
        .unwrap();

    let ctx = PromptContext::assemble(&store, "pip install", DEFAULT_THRESHOLD, 5);
    let prompt = ctx.system_prompt("You are helpful.");
    assert!(prompt.starts_with("You are helpful.\n\nRelevant information from memory:"));
    assert!(ctx.history.starts_with("Previous conversations:\n"));
    assert_eq!(store.facts()["name"], json!("Ada"));
}

#[test]
fn test_unwritable_location_surfaces_persist_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let mut store = MemoryStore::open(blocker.join("memory.json"), 10).unwrap();
    let err = store.set_fact("tone", "formal").unwrap_err();
    assert!(matches!(err, Error::Persist { .. }));
    assert_eq!(store.facts()["tone"], json!("formal"));
}
