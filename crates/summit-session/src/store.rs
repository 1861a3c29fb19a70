use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use summit_types::api::AuthUser;

/// The single named record a logged-in session persists to. Either the whole
/// record exists or none of it does; readers never observe a partial one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Epoch seconds.
    pub expires_at: i64,
    pub user: AuthUser,
}

/// Where the session record lives between runs. The file-backed store is the
/// real one; the in-memory store serves tests and ephemeral embedding.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON file on disk, the desktop stand-in for the browser's local storage.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).context("reading session record"),
        };
        let session = serde_json::from_str(&raw).context("parsing session record")?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string_pretty(session).context("encoding session record")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("creating session directory")?;
            }
        }

        // Write-then-rename: a crash mid-write leaves the old record (or
        // nothing) in place, never a torn one.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).context("writing session record")?;
        fs::rename(&tmp, &self.path).context("committing session record")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("removing session record"),
        }
    }
}

/// Keeps the record in memory only.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.record.lock().clone())
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        *self.record.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.lock() = None;
        Ok(())
    }
}
