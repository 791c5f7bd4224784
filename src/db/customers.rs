//! Raw persistence for customer rows. Every function here encapsulates one
//! query so the rest of the codebase can stay focused on validation and
//! presentation. No domain rules live at this layer: the repository will
//! happily store a blank name if asked, because the service above it is the
//! single place those rules are enforced.
//!
//! Each operation opens its own connection via [`Database::open`] and lets
//! `Drop` release the handle and any prepared statement on every exit path,
//! success or error. Nothing spans calls, so there is no transaction state
//! to reason about.

use rusqlite::{params, OptionalExtension};

use crate::db::Database;
use crate::error::{Result, StorageContext};
use crate::models::Customer;

/// Result of an insert attempt. `Ignored` means the phone key already
/// existed; the stored row is untouched and this is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Ignored,
}

/// Result of an update attempt. `NotFound` means no row matched the phone
/// key; nothing was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Result of a delete attempt. Deleting an absent key reports `NotFound`
/// rather than failing, which makes repeated deletes harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Create the customers table if it does not already exist. Idempotent, so
/// the startup flow calls it unconditionally on every launch.
pub fn ensure_schema(db: &Database) -> Result<()> {
    let conn = db.open()?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS customers (
            phone TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            email TEXT
        )",
        [],
    )
    .storage("failed to create customers table")?;
    Ok(())
}

/// Attempt to add a new row. `INSERT OR IGNORE` makes a duplicate phone key
/// a silent no-op, which the outcome reports so callers can tell the user
/// the number already exists.
pub fn insert(db: &Database, customer: &Customer) -> Result<InsertOutcome> {
    let conn = db.open()?;
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO customers (phone, name, address, email)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                customer.phone,
                customer.name,
                customer.address,
                customer.email
            ],
        )
        .storage("failed to insert customer")?;

    if inserted > 0 {
        Ok(InsertOutcome::Inserted)
    } else {
        Ok(InsertOutcome::Ignored)
    }
}

/// Replace name, address, and email for the row matching the phone key. The
/// key itself never changes through this path.
pub fn update(db: &Database, customer: &Customer) -> Result<UpdateOutcome> {
    let conn = db.open()?;
    let updated = conn
        .execute(
            "UPDATE customers SET name = ?1, address = ?2, email = ?3 WHERE phone = ?4",
            params![
                customer.name,
                customer.address,
                customer.email,
                customer.phone
            ],
        )
        .storage("failed to update customer")?;

    if updated > 0 {
        Ok(UpdateOutcome::Updated)
    } else {
        Ok(UpdateOutcome::NotFound)
    }
}

/// Remove the row with the given phone key, reporting whether one existed.
pub fn delete(db: &Database, phone: &str) -> Result<DeleteOutcome> {
    let conn = db.open()?;
    let deleted = conn
        .execute("DELETE FROM customers WHERE phone = ?1", params![phone])
        .storage("failed to delete customer")?;

    if deleted > 0 {
        Ok(DeleteOutcome::Deleted)
    } else {
        Ok(DeleteOutcome::NotFound)
    }
}

/// Look up a customer by phone key. A missing key is `None`, never an error.
pub fn find(db: &Database, phone: &str) -> Result<Option<Customer>> {
    let conn = db.open()?;
    conn.query_row(
        "SELECT phone, name, address, email FROM customers WHERE phone = ?1",
        params![phone],
        |row| {
            Ok(Customer {
                phone: row.get(0)?,
                name: row.get(1)?,
                address: row.get(2)?,
                email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            })
        },
    )
    .optional()
    .storage("failed to look up customer")
}

/// Retrieve every customer ordered by name. The query doubles as the single
/// source of truth for how rows are ordered in the table view and in CSV
/// exports; SQLite's default BINARY collation makes the order case-sensitive
/// ("Bob" sorts before "amy").
pub fn list_all(db: &Database) -> Result<Vec<Customer>> {
    let conn = db.open()?;
    let mut stmt = conn
        .prepare("SELECT phone, name, address, email FROM customers ORDER BY name")
        .storage("failed to prepare customer query")?;

    let customers = stmt
        .query_map([], |row| {
            Ok(Customer {
                phone: row.get(0)?,
                name: row.get(1)?,
                address: row.get(2)?,
                email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            })
        })
        .storage("failed to load customers")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .storage("failed to collect customers")?;

    Ok(customers)
}
