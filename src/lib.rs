//! Customer persistence and validation core for the maintenance-shop desktop
//! tool.
//!
//! The crate owns the on-disk SQLite schema for the customer registry,
//! enforces the data invariants (phone format, key uniqueness, email shape),
//! and mediates every read, write, and CSV bulk transfer. The interactive
//! front end is a separate concern: it calls the operations exposed here and
//! presents whatever values or error messages come back. The public modules
//! stay intentionally small so the window code and any external tooling can
//! reuse the same pieces.

pub mod bulk;
pub mod db;
mod error;
pub mod models;
pub mod store;
pub mod validate;

/// Convenience re-exports for the persistence layer. These are the types the
/// front end wires together at startup: pick a file, build the handle, run
/// the idempotent schema step.
pub use db::{Database, DeleteOutcome, InsertOutcome, UpdateOutcome};

/// The error taxonomy and result alias shared by every operation.
pub use error::{Result, StoreError};

/// The single domain type other layers manipulate.
pub use models::Customer;

/// The service layer the front end talks to, plus the structured CSV import
/// report for callers that want more than the one-line summary.
pub use bulk::{ImportReport, RejectReason, Rejection};
pub use store::CustomerStore;

/// The pure validators, re-exported so form feedback and persistence agree
/// on one set of rules.
pub use validate::{email_error, is_valid_phone, normalize_phone};
