//! Domain models that mirror the SQLite schema and get passed between the
//! persistence layer and the front end. The intent is that these types stay
//! light-weight data holders so other layers can focus on validation and
//! persistence logic.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single customer record. The `phone` field holds the digit-only
/// normalized form and doubles as the primary key in the `customers` table,
/// so a value of this type is always a complete replacement for whatever row
/// shares its key.
pub struct Customer {
    /// Normalized phone number, digits only. Unique identifier for the
    /// record; update flows never change it.
    pub phone: String,
    /// Customer's full name. Required; the service layer rejects blanks
    /// before anything reaches the database.
    pub name: String,
    /// Postal address. Required, same enforcement point as `name`.
    pub address: String,
    /// Optional contact email. Kept as an empty string rather than an
    /// `Option` because the CSV wire format has no way to distinguish a
    /// missing field from a blank one.
    pub email: String,
}

impl Customer {
    /// Build a record from borrowed field values. Every query result and
    /// every form submission constructs a fresh value, so this constructor
    /// copies eagerly instead of trying to share.
    pub fn new(phone: &str, name: &str, address: &str, email: &str) -> Self {
        Self {
            phone: phone.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            email: email.to_string(),
        }
    }

    /// Compose a `phone | name` string for log panes. The front end prints
    /// this after add/update actions, so keeping the format here avoids
    /// drifting copies of it.
    pub fn log_line(&self) -> String {
        format!("{} | {}", self.phone, self.name)
    }
}

impl fmt::Display for Customer {
    /// Write the customer name to any formatter. Display is implemented so
    /// the type plays nicely with widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
