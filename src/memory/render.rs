//! Human-readable transcripts of the stored conversation.

use std::fmt::Write;

use crate::memory_types::ConversationTurn;
use crate::timestamp::to_minute;

use super::store::MemoryStore;

/// Header placed above the recent-history window handed to a generator.
pub const RECENT_HISTORY_HEADER: &str = "Previous conversations:";

impl MemoryStore {
    /// Transcript of every retained turn, oldest first.
    ///
    /// Each turn is two lines prefixed by its minute-precision timestamp,
    /// followed by a blank line:
    ///
    /// ```text
    /// [2025-03-14 09:26] User: How do I install it?
    /// [2025-03-14 09:26] AI: Run pip install docboost.
    /// ```
    ///
    /// Returns an empty string when no turns exist.
    pub fn render_history(&self) -> String {
        render_turns(&self.state.turns)
    }

    /// The last `limit` turns under a `Previous conversations:` header, in
    /// the same per-turn layout as [`MemoryStore::render_history`].
    ///
    /// Returns an empty string when no turns exist or `limit` is 0.
    pub fn render_recent_history(&self, limit: usize) -> String {
        let turns = &self.state.turns;
        let window = &turns[turns.len().saturating_sub(limit)..];
        if window.is_empty() {
            return String::new();
        }
        format!("{RECENT_HISTORY_HEADER}\n{}", render_turns(window))
    }
}

fn render_turns(turns: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let ts = to_minute(&turn.timestamp);
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "[{ts}] User: {}\n[{ts}] AI: {}\n\n",
            turn.user_input, turn.ai_response
        );
    }
    out
}
