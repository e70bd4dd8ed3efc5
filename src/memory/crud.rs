//! Mutations and read views for the memory store.

use serde_json::Value;
use tracing::debug;

use crate::errors::Error;
use crate::facts::extract_user_facts;
use crate::memory_types::{ConversationTurn, FactTable};

use super::store::MemoryStore;

impl MemoryStore {
    #[must_use = "handle the error or the turn may not be persisted"]
    /// Append a turn stamped with the current time, evict the oldest turns
    /// beyond the limit, and persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the document cannot be written. The turn
    /// stays in memory either way.
    pub fn append_turn(&mut self, user_input: &str, ai_response: &str) -> Result<(), Error> {
        self.state
            .turns
            .push(ConversationTurn::new(user_input, ai_response));

        let evicted = self.state.evict_to(self.memory_limit);
        if evicted > 0 {
            debug!(evicted, memory_limit = self.memory_limit, "evicted oldest turns");
        }

        self.save()
    }

    #[must_use = "handle the error or the fact may not be persisted"]
    /// Insert or replace a fact, then persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if the document cannot be written.
    pub fn set_fact(&mut self, key: &str, value: impl Into<Value>) -> Result<(), Error> {
        self.state.facts.insert(key.to_string(), value.into());
        self.save()
    }

    #[must_use = "handle the error or the exchange may not be persisted"]
    /// Record a full exchange: append the turn and upsert any facts the user
    /// stated about themselves (e.g. "my name is Ada").
    ///
    /// Everything is written in a single persist.
    ///
    /// # Returns
    ///
    /// The keys of the facts that were extracted.
    pub fn record_exchange(
        &mut self,
        user_input: &str,
        ai_response: &str,
    ) -> Result<Vec<String>, Error> {
        self.state
            .turns
            .push(ConversationTurn::new(user_input, ai_response));
        self.state.evict_to(self.memory_limit);

        let mut keys = Vec::new();
        for (key, value) in extract_user_facts(user_input) {
            debug!(key, "extracted user fact");
            self.state.facts.insert(key.to_string(), Value::from(value));
            keys.push(key.to_string());
        }

        self.save()?;
        Ok(keys)
    }

    /// Retained turns, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.state.turns
    }

    /// All stored facts.
    pub fn facts(&self) -> &FactTable {
        &self.state.facts
    }

    /// Look up a single fact.
    pub fn fact(&self, key: &str) -> Option<&Value> {
        self.state.facts.get(key)
    }
}
