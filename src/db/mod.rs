//! Persistence module split across logical submodules.

mod connection;
mod customers;

pub use connection::Database;
pub use customers::{
    delete, ensure_schema, find, insert, list_all, update, DeleteOutcome, InsertOutcome,
    UpdateOutcome,
};
