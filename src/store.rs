//! The customer store: the seam between the front end and the repository.
//! Lookups normalize their input, bulk transfers run through the CSV codec
//! with per-row error tolerance, and the listing used to render the table is
//! best-effort by design. The CRUD methods are deliberately thin: required
//! field and email checks live in [`crate::validate`] and are applied by the
//! caller before a `Customer` is built, so the rules have exactly one home.

use std::fs::File;
use std::path::Path;

use tracing::{debug, warn};

use crate::bulk::{self, ImportReport, RejectReason, Rejection};
use crate::db::{self, Database, DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::error::{Result, StoreError};
use crate::models::Customer;
use crate::validate::normalize_phone;

/// Validation and orchestration layer over the customer repository.
pub struct CustomerStore {
    db: Database,
}

impl CustomerStore {
    /// Wrap an already-configured database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Convenience for the startup flow: record the chosen database file and
    /// make sure the schema exists before the first real operation.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let store = Self::new(Database::new(path)?);
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create the customers table if absent. Safe to call on every launch.
    pub fn ensure_schema(&self) -> Result<()> {
        db::ensure_schema(&self.db)
    }

    /// The backing database handle, for callers that display its path.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Normalize a raw phone string and look up the matching customer.
    pub fn get_by_phone(&self, raw: &str) -> Result<Option<Customer>> {
        db::find(&self.db, &normalize_phone(raw))
    }

    /// Add a customer; `Ignored` when the phone key already exists. The
    /// caller validates fields first, and `customer.phone` is expected to be
    /// normalized already.
    pub fn insert(&self, customer: &Customer) -> Result<InsertOutcome> {
        db::insert(&self.db, customer)
    }

    /// Replace name/address/email for the customer with this phone key.
    pub fn update(&self, customer: &Customer) -> Result<UpdateOutcome> {
        db::update(&self.db, customer)
    }

    /// Remove the customer with this (already normalized) phone key.
    pub fn delete(&self, phone: &str) -> Result<DeleteOutcome> {
        db::delete(&self.db, phone)
    }

    /// Every customer in name order, for rendering into the table. Listing
    /// is best-effort: a storage failure logs a warning and yields an empty
    /// list so the front end can still draw itself.
    pub fn list_all(&self) -> Vec<Customer> {
        match db::list_all(&self.db) {
            Ok(customers) => customers,
            Err(err) => {
                warn!(error = %err, "listing customers failed, returning empty list");
                Vec::new()
            }
        }
    }

    /// Bulk import with a structured result: parse the file through the CSV
    /// codec, then insert each accepted row. A row whose phone key already
    /// exists becomes a `DuplicatePhone` rejection for its line, keeping the
    /// report consistent with the repository's insert-or-ignore contract.
    ///
    /// Per-row problems never abort the batch; only a file-level read
    /// failure or a storage failure mid-batch returns an error.
    pub fn import_from_csv(&self, path: &Path) -> Result<ImportReport> {
        let file = File::open(path).map_err(|source| StoreError::Csv {
            context: "failed to open CSV file",
            source: source.into(),
        })?;
        let parsed = bulk::parse_records(file)?;

        let mut inserted = 0;
        let mut rejections = parsed.rejections;
        for (line, customer) in &parsed.accepted {
            match self.insert(customer)? {
                InsertOutcome::Inserted => inserted += 1,
                InsertOutcome::Ignored => rejections.push(Rejection {
                    line: *line,
                    reason: RejectReason::DuplicatePhone,
                }),
            }
        }
        rejections.sort_by_key(|r| r.line);

        let report = ImportReport {
            inserted,
            rejections,
            lines_read: parsed.lines_read,
        };
        debug!(summary = %report.summary(), "CSV import finished");
        Ok(report)
    }

    /// User-facing wrapper around [`Self::import_from_csv`]: always returns
    /// a string the front end can show in a dialog, whether the import ran
    /// (the one-line summary) or failed at the file level (a description of
    /// the failure). Nothing on this path panics or throws.
    pub fn load_from_csv(&self, path: &Path) -> String {
        match self.import_from_csv(path) {
            Ok(report) => report.summary(),
            Err(err) => format!("CSV import failed: {err}"),
        }
    }

    /// Export every customer to `path` in `list_all` order. Returns `true`
    /// only when the whole write, including the flush, completed; any
    /// failure is logged and reported as `false`, never as a silently
    /// truncated file that claims success.
    pub fn save_to_csv(&self, path: &Path) -> bool {
        match self.export_to_csv(path) {
            Ok(count) => {
                debug!(rows = count, path = %path.display(), "CSV export finished");
                true
            }
            Err(err) => {
                warn!(error = %err, "CSV export failed");
                false
            }
        }
    }

    fn export_to_csv(&self, path: &Path) -> Result<usize> {
        let customers = db::list_all(&self.db)?;
        let file = File::create(path).map_err(|source| StoreError::Csv {
            context: "failed to create CSV file",
            source: source.into(),
        })?;
        bulk::write_records(file, &customers)?;
        Ok(customers.len())
    }
}
