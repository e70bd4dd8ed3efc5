//! Keyword-overlap relevance ranking over stored conversation turns.
//!
//! A query is reduced to a keyword set (lower-cased word tokens, minus
//! stopwords and tokens shorter than three characters). Each turn scores the
//! fraction of keywords found as substrings of its combined text:
//!
//! score = |{k ∈ K : k ⊂ lower(user_input + " " + ai_response)}| / |K|
//!
//! Substring containment means `install` also matches `installation`.
//! Retrieval is independent of storage: it only needs a slice of turns.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::memory_types::ConversationTurn;
use crate::timestamp::to_minute;

/// Default minimum score for a turn to count as relevant.
pub const DEFAULT_THRESHOLD: f64 = 0.3;
/// Maximum number of turns returned by a single lookup.
pub const MAX_RESULTS: usize = 5;
/// First line of a rendered context block.
pub const CONTEXT_HEADER: &str = "Relevant information from memory:";

/// Tokens shorter than this are never keywords.
const MIN_KEYWORD_CHARS: usize = 3;

/// Common function words excluded from keyword matching.
const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "been", "being", "but", "by", "can",
    "could", "did", "do", "does", "for", "from", "had", "has", "have", "how", "i", "if", "in",
    "into", "is", "it", "its", "me", "my", "not", "of", "on", "or", "our", "should", "so", "than",
    "that", "the", "their", "them", "then", "there", "these", "they", "this", "those", "to", "was",
    "we", "were", "what", "when", "where", "which", "who", "whom", "why", "will", "with",
    "would", "you", "your",
];

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// A stored turn judged relevant to a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantMemory {
    /// Timestamp of the originating turn, as stored.
    pub timestamp: String,
    /// `User: <user_input>\nAI: <ai_response>`.
    pub content: String,
    /// Fraction of query keywords found in the turn (0.0 to 1.0).
    pub relevance: f64,
}

/// Ranks turns by lexical overlap with a query.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceRetriever {
    /// Minimum score for inclusion.
    pub threshold: f64,
    /// Cap on returned matches.
    pub max_results: usize,
}

impl Default for RelevanceRetriever {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_results: MAX_RESULTS,
        }
    }
}

impl RelevanceRetriever {
    /// Retriever with a custom threshold and the default result cap.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Turns scoring at least `threshold`, best first.
    ///
    /// Equal scores keep chronological order (oldest first). An empty or
    /// all-stopword query yields no matches.
    pub fn find_relevant(&self, turns: &[ConversationTurn], query: &str) -> Vec<RelevantMemory> {
        let keywords = extract_keywords(query);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<RelevantMemory> = turns
            .iter()
            .filter_map(|turn| {
                let relevance = relevance_score(turn, &keywords);
                (relevance >= self.threshold).then(|| RelevantMemory {
                    timestamp: turn.timestamp.clone(),
                    content: turn.content(),
                    relevance,
                })
            })
            .collect();

        // sort_by is stable, so ties stay in chronological order.
        matches.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
        });
        matches.truncate(self.max_results);
        matches
    }

    /// Context block for `query`, or an empty string when nothing matches.
    pub fn relevant_context(&self, turns: &[ConversationTurn], query: &str) -> String {
        format_context(&self.find_relevant(turns, query))
    }
}

/// Relevant turns for `query` at the given threshold.
pub fn find_relevant(
    turns: &[ConversationTurn],
    query: &str,
    threshold: f64,
) -> Vec<RelevantMemory> {
    RelevanceRetriever::with_threshold(threshold).find_relevant(turns, query)
}

/// Context block for `query` at the default threshold.
pub fn get_relevant_context(turns: &[ConversationTurn], query: &str) -> String {
    RelevanceRetriever::default().relevant_context(turns, query)
}

/// Render matches under [`CONTEXT_HEADER`], each as
/// `[YYYY-MM-DD HH:MM]\n<content>\n\n`. Empty input renders as `""`.
pub fn format_context(matches: &[RelevantMemory]) -> String {
    if matches.is_empty() {
        return String::new();
    }

    let mut out = format!("{CONTEXT_HEADER}\n\n");
    for m in matches {
        let _ = write!(out, "[{}]\n{}\n\n", to_minute(&m.timestamp), m.content);
    }
    out
}

/// Distinct keywords of `query` in first-seen order.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut seen = HashSet::new();

    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .filter(|word| !STOPWORD_SET.contains(*word))
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

/// Fraction of `keywords` contained in the turn's lower-cased combined text.
///
/// Returns 0.0 for an empty keyword set.
pub fn relevance_score(turn: &ConversationTurn, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let combined = format!("{} {}", turn.user_input, turn.ai_response).to_lowercase();
    let hits = keywords
        .iter()
        .filter(|k| combined.contains(k.as_str()))
        .count();

    hits as f64 / keywords.len() as f64
}
