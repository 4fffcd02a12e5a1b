//! Persisted fold-state store over an opaque key-to-string backend.
//!
//! The store serialises one [`PersistedState`] mapping per page key as JSON.
//! Both directions are deliberately infallible from the caller's point of
//! view: a missing or unparseable value loads as an empty mapping, and a
//! failed write is logged and dropped. Folding must keep working when
//! persistence is unhealthy.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
/// Saved mapping of heading identifier to expanded flag for one page.
pub struct PersistedState {
    entries: HashMap<String, bool>,
}

impl PersistedState {
    #[must_use]
    /// The saved expanded flag for an identifier, if one was ever recorded.
    ///
    /// Identifiers with no entry are interpreted as expanded by callers.
    pub fn get(&self, identifier: &str) -> Option<bool> {
        self.entries.get(identifier).copied()
    }

    /// Records the expanded flag for an identifier.
    pub fn set(&mut self, identifier: impl Into<String>, expanded: bool) {
        self.entries.insert(identifier.into(), expanded);
    }

    #[must_use]
    /// Whether any entry has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Opaque key-to-string persistence primitive.
pub trait StorageBackend {
    /// Reads the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot complete the write (for
    /// example the state directory is not creatable); callers treat this as
    /// non-fatal.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

#[derive(Clone, Debug, Default)]
/// In-memory backend; clones share the same underlying map, which lets a
/// test or a fallback host observe writes across engine instances.
pub struct MemoryBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBackend {
    #[must_use]
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
/// File-per-key backend rooted at a state directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    #[must_use]
    /// Creates a backend rooted at `dir`; the directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keys are arbitrary page paths; flatten them into one safe file name.
    fn file_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.file_for(key), value)
    }
}

/// Loads and saves the per-page fold-state mapping.
pub struct StateStore {
    backend: Box<dyn StorageBackend>,
}

impl StateStore {
    #[must_use]
    /// Wraps a backend; the store is agnostic to how page keys are derived.
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    #[must_use]
    /// Reads the mapping stored for `page_key`.
    ///
    /// An absent value yields an empty mapping. An unparseable value is
    /// logged and also yields an empty mapping rather than an error.
    pub fn load(&self, page_key: &str) -> PersistedState {
        let Some(raw) = self.backend.get(page_key) else {
            return PersistedState::default();
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("discarding unparseable fold state for {page_key}: {e}");
                PersistedState::default()
            }
        }
    }

    /// Serialises and writes the mapping for `page_key`.
    ///
    /// A rejected write is logged and dropped; the state simply does not
    /// persist for this save.
    pub fn save(&mut self, page_key: &str, state: &PersistedState) {
        match serde_json::to_string(state) {
            Ok(raw) => {
                if let Err(e) = self.backend.set(page_key, &raw) {
                    log::warn!("fold state for {page_key} not persisted: {e}");
                }
            }
            Err(e) => log::warn!("fold state for {page_key} not serialisable: {e}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
