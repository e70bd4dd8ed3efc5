//! Prompt context assembled from memory for an external generation service.

use serde::Serialize;

use crate::memory::MemoryStore;
use crate::relevance::RelevanceRetriever;

/// Memory-derived text to splice into a generation prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptContext {
    /// Recent turns under a `Previous conversations:` header, or empty.
    pub history: String,
    /// Turns relevant to the current query, or empty.
    pub relevant: String,
}

impl PromptContext {
    /// Gather the recent-history window and the relevant-memory block for `query`.
    pub fn assemble(store: &MemoryStore, query: &str, threshold: f64, window: usize) -> Self {
        let retriever = RelevanceRetriever::with_threshold(threshold);
        Self {
            history: store.render_recent_history(window),
            relevant: retriever.relevant_context(store.turns(), query),
        }
    }

    /// Append the relevant-memory block to `base`, separated by a blank line.
    ///
    /// Returns `base` unchanged when nothing relevant was found.
    pub fn system_prompt(&self, base: &str) -> String {
        if self.relevant.is_empty() {
            base.to_string()
        } else {
            format!("{base}\n\n{}", self.relevant)
        }
    }

    /// True when memory contributed nothing.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.relevant.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_unchanged_without_relevant() {
        let ctx = PromptContext::default();
        assert!(ctx.is_empty());
        assert_eq!(ctx.system_prompt("You are helpful."), "You are helpful.");
    }

    #[test]
    fn test_system_prompt_appends_relevant() {
        let ctx = PromptContext {
            history: String::new(),
            relevant: "Relevant information from memory:\n\n".to_string(),
        };
        assert_eq!(
            ctx.system_prompt("Base"),
            "Base\n\nRelevant information from memory:\n\n"
        );
    }

    #[test]
    fn test_assemble_from_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = MemoryStore::open(dir.path().join("memory.json"), 10).unwrap();
        store
            .append_turn("How do I install it?", "Run pip install docboost.")
            .unwrap();

        let ctx = PromptContext::assemble(&store, "pip install", 0.3, 5);
        assert!(ctx.history.starts_with("Previous conversations:\n"));
        assert!(ctx.relevant.starts_with("Relevant information from memory:"));
        assert!(ctx.relevant.contains("Run pip install docboost."));

        let none = PromptContext::assemble(&store, "kubernetes", 0.3, 5);
        assert!(none.relevant.is_empty());
        assert!(!none.history.is_empty());
    }
}
