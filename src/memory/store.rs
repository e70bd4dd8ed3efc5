//! Core memory store struct combining the in-memory state and its backing file.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::Error;
use crate::memory_types::MemoryState;

/// Default number of turns retained when no configuration is supplied.
pub const DEFAULT_MEMORY_LIMIT: usize = 10;

/// Bounded, persistent record of dialogue plus user facts.
///
/// The store owns its [`MemoryState`] for the lifetime of a session. State is
/// read once in [`MemoryStore::open`]; every mutation rewrites the whole
/// document before returning.
#[derive(Debug)]
pub struct MemoryStore {
    pub(crate) path: PathBuf,
    pub(crate) memory_limit: usize,
    pub(crate) state: MemoryState,
}

impl MemoryStore {
    /// Open the store backed by `path`, keeping at most `memory_limit` turns.
    ///
    /// A missing or corrupt file yields an empty store; see [`MemoryStore::load`].
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `path` is empty
    /// - `memory_limit` is 0
    pub fn open(path: impl Into<PathBuf>, memory_limit: usize) -> Result<Self, Error> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput("memory path cannot be empty".to_string()));
        }
        if memory_limit == 0 {
            return Err(Error::InvalidInput(
                "memory limit must be at least 1".to_string(),
            ));
        }

        let mut state = Self::load(&path);
        let trimmed = state.evict_to(memory_limit);
        if trimmed > 0 {
            debug!(
                path = %path.display(),
                trimmed,
                memory_limit,
                "stored history exceeds limit, keeping most recent turns"
            );
        }

        Ok(Self {
            path,
            memory_limit,
            state,
        })
    }

    /// Open the store described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::open(config.memory_path.clone(), config.memory_limit)
    }

    /// Read the memory document at `path`.
    ///
    /// Never fails: a missing file, an unreadable file, or malformed content
    /// all produce an empty [`MemoryState`].
    pub fn load(path: &Path) -> MemoryState {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no memory file yet, starting empty");
                return MemoryState::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "memory file unreadable, starting empty");
                return MemoryState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "memory file corrupt, starting empty");
                MemoryState::default()
            }
        }
    }

    /// Write the full state to the backing file.
    ///
    /// The document goes to a sibling `.tmp` file which is flushed, synced
    /// and renamed over the target, so an interrupted write never truncates
    /// the previous document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persist`] if any step of the write fails. The
    /// in-memory state is left untouched.
    pub fn save(&self) -> Result<(), Error> {
        let tmp = temp_path(&self.path);
        let result = write_document(&tmp, &self.state).and_then(|()| fs::rename(&tmp, &self.path));

        match result {
            Ok(()) => {
                debug!(
                    path = %self.path.display(),
                    turns = self.state.turns.len(),
                    facts = self.state.facts.len(),
                    "memory persisted"
                );
                Ok(())
            }
            Err(source) => {
                let _ = fs::remove_file(&tmp);
                Err(Error::Persist {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum number of turns retained.
    pub fn memory_limit(&self) -> usize {
        self.memory_limit
    }

    /// Read-only view of the whole state.
    pub fn state(&self) -> &MemoryState {
        &self.state
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("memory"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_document(path: &Path, state: &MemoryState) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, state)?;
    writer.write_all(b"\n")?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}
