//! Bounded conversation memory backed by a single JSON document.
//!
//! Provides append, fact upsert, and transcript rendering on top of a
//! [`MemoryState`](crate::memory_types::MemoryState) that is rewritten in full
//! on every mutation.

mod crud;
mod render;

// pub(crate): module internals hidden; public items re-exported explicitly via lib.rs
pub(crate) mod store;

pub use render::RECENT_HISTORY_HEADER;
pub use store::{DEFAULT_MEMORY_LIMIT, MemoryStore};
