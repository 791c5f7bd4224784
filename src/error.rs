//! Error taxonomy for the persistence core. A handful of failure families
//! cover everything callers need to distinguish: a missing database path,
//! SQLite trouble, and CSV or filesystem trouble. Each variant carries a short
//! context phrase alongside the underlying cause so a surfaced message reads
//! like "failed to insert customer: database is locked" without the caller
//! having to walk the source chain.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file path was never set, or was set to a blank string.
    /// Recoverable by re-prompting the user for a path.
    #[error("database path is not configured")]
    Configuration,

    /// SQLite rejected an operation: file unreachable, locked, or the schema
    /// does not match what the repository expects.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A CSV file could not be opened, read, or written.
    #[error("{context}: {source}")]
    Csv {
        context: &'static str,
        #[source]
        source: csv::Error,
    },

    /// Plain filesystem failure outside SQLite and the CSV codec, such as
    /// creating the directory that will hold the database file.
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Attach a context phrase to a SQLite result, mirroring the shape of
/// `anyhow::Context` without giving up the typed taxonomy.
pub(crate) trait StorageContext<T> {
    fn storage(self, context: &'static str) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, rusqlite::Error> {
    fn storage(self, context: &'static str) -> Result<T> {
        self.map_err(|source| StoreError::Storage { context, source })
    }
}

/// Same idea for the CSV codec's errors.
pub(crate) trait CsvContext<T> {
    fn csv(self, context: &'static str) -> Result<T>;
}

impl<T> CsvContext<T> for std::result::Result<T, csv::Error> {
    fn csv(self, context: &'static str) -> Result<T> {
        self.map_err(|source| StoreError::Csv { context, source })
    }
}

pub(crate) trait IoContext<T> {
    fn io(self, context: &'static str) -> Result<T>;
}

impl<T> IoContext<T> for std::result::Result<T, std::io::Error> {
    fn io(self, context: &'static str) -> Result<T> {
        self.map_err(|source| StoreError::Io { context, source })
    }
}
