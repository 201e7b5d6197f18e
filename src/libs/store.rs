//! Durable key-value persistence for the active reading session.
//!
//! The active session is written to a single key on every start, pause and
//! resume, and removed on stop. Decoding is tolerant: records written by
//! older versions that lack the pause bookkeeping fields are read as a
//! session that has been running continuously since it started. Records that
//! cannot be decoded at all are dropped, and write failures are logged and
//! otherwise ignored so the in-memory state stays authoritative.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use readlog::libs::store::{FileStore, SessionStore};
//!
//! let store = SessionStore::new(FileStore::new()?);
//! if let Some(session) = store.load() {
//!     println!("Still reading {}", session.book_title);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::data_storage::DataStorage;
use crate::libs::session::{ActiveSession, BookId};
use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Key holding the encoded active session. Absent means no active session.
pub const ACTIVE_SESSION_KEY: &str = "active_reading_session";

/// A durable byte store addressed by string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as a `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store in the application data directory.
    pub fn new() -> Result<Self> {
        let dir = DataStorage::new().base_path().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set`/`remove` fail until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("memory store is read-only");
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.entries.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Failure to read a stored session snapshot.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("stored session is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Wire shape of the persisted session.
///
/// Only the book fields and the start instant are required; everything else
/// was added later and defaults when missing.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    #[serde(rename = "bookID")]
    book_id: BookId,
    book_title: String,
    started_at: DateTime<Utc>,
    #[serde(default)]
    last_resumed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    accumulated_seconds: Option<i64>,
    #[serde(default)]
    is_paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paused_at: Option<DateTime<Utc>>,
}

impl From<&ActiveSession> for StoredSession {
    fn from(session: &ActiveSession) -> Self {
        StoredSession {
            book_id: session.book_id.clone(),
            book_title: session.book_title.clone(),
            started_at: session.started_at,
            last_resumed_at: Some(session.last_resumed_at),
            accumulated_seconds: Some(session.accumulated_seconds),
            is_paused: Some(session.is_paused),
            paused_at: session.paused_at,
        }
    }
}

impl From<StoredSession> for ActiveSession {
    fn from(stored: StoredSession) -> Self {
        let last_resumed_at = stored.last_resumed_at.unwrap_or(stored.started_at);
        let is_paused = stored.is_paused.unwrap_or(false);
        // A paused record without its pause instant is treated as paused
        // when its last segment opened, so no unrecorded time is credited.
        let paused_at = if is_paused {
            Some(stored.paused_at.unwrap_or(last_resumed_at))
        } else {
            None
        };
        ActiveSession {
            book_id: stored.book_id,
            book_title: stored.book_title,
            started_at: stored.started_at,
            last_resumed_at,
            accumulated_seconds: stored.accumulated_seconds.unwrap_or(0).max(0),
            is_paused,
            paused_at,
        }
    }
}

pub fn encode(session: &ActiveSession) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&StoredSession::from(session))
}

pub fn decode(bytes: &[u8]) -> Result<ActiveSession, DecodeError> {
    let stored: StoredSession = serde_json::from_slice(bytes)?;
    Ok(stored.into())
}

/// Persistence adapter owning the single active-session key.
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        SessionStore { store: Box::new(store) }
    }

    /// Reads the persisted session, if any.
    ///
    /// A corrupt entry is removed and reported as no session.
    pub fn load(&self) -> Option<ActiveSession> {
        let bytes = match self.store.get(ACTIVE_SESSION_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted reading session");
                return None;
            }
        };

        match decode(&bytes) {
            Ok(session) => {
                tracing::debug!(book_id = %session.book_id, "restored reading session");
                Some(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping unreadable reading session snapshot");
                if let Err(e) = self.store.remove(ACTIVE_SESSION_KEY) {
                    tracing::warn!(error = %e, "failed to remove unreadable reading session snapshot");
                }
                None
            }
        }
    }

    /// Writes the session. Failures are logged and swallowed.
    pub fn save(&self, session: &ActiveSession) {
        let result = encode(session)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| self.store.set(ACTIVE_SESSION_KEY, &bytes));
        if let Err(e) = result {
            tracing::warn!(error = %e, book_id = %session.book_id, "failed to persist reading session");
        }
    }

    /// Removes the persisted session. Failures are logged and swallowed.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(ACTIVE_SESSION_KEY) {
            tracing::warn!(error = %e, "failed to clear persisted reading session");
        }
    }
}
