//! mneme - A bounded conversational memory for AI agents.
//!
//! Stores a capped history of conversation turns plus free-form facts about
//! the user in a single JSON document, and retrieves the turns relevant to a
//! new query by keyword overlap. All operations are synchronous.
//!
//! # Example
//!
//! ```no_run
//! use mneme::{Config, MemoryStore, relevance};
//!
//! let config = Config::load().expect("Failed to load config");
//! config.ensure_directories().expect("Failed to create memory directory");
//! let mut store = MemoryStore::from_config(&config).expect("Failed to open store");
//!
//! // Record an exchange after the generator answered
//! store
//!     .append_turn("How do I install it?", "Run pip install docboost.")
//!     .expect("Failed to persist turn");
//! store.set_fact("tone", "formal").expect("Failed to persist fact");
//!
//! // Later: pull relevant memories into the next prompt
//! let context = relevance::get_relevant_context(store.turns(), "pip install");
//! println!("{context}");
//! ```

pub mod commands;
pub mod config;
pub mod context;
pub mod errors;
pub mod facts;
pub mod memory;
pub mod memory_types;
pub mod output;
pub mod relevance;
mod timestamp;

// Re-export public API
pub use config::Config;
pub use context::PromptContext;
pub use errors::Error;
pub use memory::MemoryStore;
pub use memory_types::{ConversationTurn, FactTable, MemoryState};
pub use relevance::{RelevanceRetriever, RelevantMemory, find_relevant, get_relevant_context};
