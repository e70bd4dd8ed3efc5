//! Memory store data types.
//!
//! These types are also the on-disk document format: a JSON object with a
//! `conversations` list and a `user_info` map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form facts about the user, keyed by name. Last write wins.
pub type FactTable = BTreeMap<String, Value>;

/// One exchange between the user and the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// ISO-8601 creation time, assigned when the turn is appended.
    pub timestamp: String,
    /// What the user said.
    pub user_input: String,
    /// What the assistant answered.
    pub ai_response: String,
}

impl ConversationTurn {
    /// Create a turn stamped with the current local time.
    pub fn new(user_input: impl Into<String>, ai_response: impl Into<String>) -> Self {
        Self {
            timestamp: crate::timestamp::now_iso(),
            user_input: user_input.into(),
            ai_response: ai_response.into(),
        }
    }

    /// Both sides of the exchange as `User: ...\nAI: ...`.
    pub fn content(&self) -> String {
        format!("User: {}\nAI: {}", self.user_input, self.ai_response)
    }
}

/// Root aggregate persisted to the memory file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    /// Turns in chronological order (oldest first).
    #[serde(rename = "conversations", default)]
    pub turns: Vec<ConversationTurn>,

    /// Facts about the user.
    #[serde(rename = "user_info", default)]
    pub facts: FactTable,
}

impl MemoryState {
    /// Drop the oldest turns until at most `limit` remain.
    ///
    /// Returns the number of evicted turns.
    pub fn evict_to(&mut self, limit: usize) -> usize {
        let excess = self.turns.len().saturating_sub(limit);
        if excess > 0 {
            self.turns.drain(..excess);
        }
        excess
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(n: usize) -> ConversationTurn {
        ConversationTurn {
            timestamp: format!("2025-01-01T00:00:{n:02}"),
            user_input: format!("question {n}"),
            ai_response: format!("answer {n}"),
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let mut state = MemoryState::default();
        state.turns.push(turn(1));
        state.facts.insert("name".to_string(), Value::from("Ada"));

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("conversations").is_some());
        assert!(json.get("user_info").is_some());
        assert_eq!(json["conversations"][0]["user_input"], "question 1");
        assert_eq!(json["conversations"][0]["ai_response"], "answer 1");
        assert_eq!(json["user_info"]["name"], "Ada");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let state: MemoryState = serde_json::from_str(r#"{"user_info": {"tone": "formal"}}"#).unwrap();
        assert!(state.turns.is_empty());
        assert_eq!(state.facts["tone"], "formal");

        let state: MemoryState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, MemoryState::default());
    }

    #[test]
    fn test_evict_to_keeps_most_recent() {
        let mut state = MemoryState {
            turns: (0..5).map(turn).collect(),
            facts: FactTable::new(),
        };
        assert_eq!(state.evict_to(3), 2);
        let inputs: Vec<_> = state.turns.iter().map(|t| t.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["question 2", "question 3", "question 4"]);

        assert_eq!(state.evict_to(10), 0);
        assert_eq!(state.turns.len(), 3);
    }

    #[test]
    fn test_turn_content() {
        assert_eq!(turn(7).content(), "User: question 7\nAI: answer 7");
    }
}
