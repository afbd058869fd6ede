//! Process-lifetime store handle with lazy connection bootstrap.
//!
//! # Responsibility
//! - Own the store location (file path or in-memory mode).
//! - Open the underlying SQLite connection once, on first use, and hand
//!   out readable/writable views of it.
//!
//! # Invariants
//! - The connection is opened at most once per handle and lives until the
//!   handle is dropped; there is no explicit close in normal operation.
//! - Both accessors resolve to the same shared connection; writer
//!   serialization is delegated to SQLite's own locking discipline.

use crate::db::{open_db, open_db_in_memory, DbResult};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::PathBuf;

enum StoreLocation {
    File(PathBuf),
    InMemory,
}

/// Shared handle over the catalog's backing store.
///
/// Constructed once by the composition root and passed by reference to
/// the provider; the handle itself holds no record state.
pub struct PetStore {
    location: StoreLocation,
    conn: OnceCell<Connection>,
}

impl PetStore {
    /// Creates a handle over a database file. The file is not opened (or
    /// created) until first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            location: StoreLocation::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Creates a handle over a fresh in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            conn: OnceCell::new(),
        }
    }

    /// Returns a connection for read operations, opening the store on
    /// first use.
    pub fn readable(&self) -> DbResult<&Connection> {
        self.connection()
    }

    /// Returns a connection for write operations, opening the store on
    /// first use.
    pub fn writable(&self) -> DbResult<&Connection> {
        self.connection()
    }

    fn connection(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| match &self.location {
            StoreLocation::File(path) => open_db(path),
            StoreLocation::InMemory => open_db_in_memory(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PetStore;

    #[test]
    fn readable_and_writable_share_one_connection() {
        let store = PetStore::in_memory();
        let readable = store.readable().unwrap();
        let writable = store.writable().unwrap();
        assert!(std::ptr::eq(readable, writable));
    }

    #[test]
    fn lazy_open_applies_schema() {
        let store = PetStore::in_memory();
        let count: i64 = store
            .readable()
            .unwrap()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'pets';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
