//! Connection provider for the SQLite-backed registry. The database file is
//! chosen by the user at startup (via the front end's file chooser), so the
//! path arrives here as an explicit value instead of hiding in process-wide
//! state. Every repository operation asks for a fresh connection and drops
//! it on the way out, which keeps file locks scoped to a single call.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{IoContext, Result, StorageContext, StoreError};

/// Handle to the configured SQLite file. Cheap to clone around; the actual
/// connection is opened per operation.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Record the database file path chosen by the caller. A blank path is a
    /// configuration failure the caller can recover from by re-prompting,
    /// so it gets its own error variant instead of surfacing later as an
    /// opaque SQLite open failure.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
            return Err(StoreError::Configuration);
        }
        Ok(Self { path })
    }

    /// Open a live connection to the configured file. SQLite creates the
    /// file when it does not exist yet, so a brand-new empty store works the
    /// same as an established one; we only have to make sure the parent
    /// directory is there first.
    pub fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).io("failed to create database directory")?;
            }
        }

        Connection::open(&self.path).storage("failed to open SQLite database")
    }

    /// Path to the backing file, for callers that display it (the front end
    /// logs the chosen database right after startup).
    pub fn path(&self) -> &Path {
        &self.path
    }
}
