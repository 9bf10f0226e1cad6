//! # Relational Store
//!
//! SQLite-backed persistence for users, auth tokens, places and reviews.
//!
//! The store owns a single connection behind an async mutex. Each repository
//! module exposes plain functions over `&Connection` so callers can compose
//! several statements inside one transaction.
//!
//! ## Invariants
//! - Phone numbers are unique
//! - Places are unique on `(casefold(name), casefold(address))`, Unicode-aware
//! - At most one review per `(user, place)` pair
//! - Reviews and tokens cascade-delete with their owner

pub mod errors;
pub mod places;
pub mod reviews;
mod schema;
pub mod tokens;
pub mod users;

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

pub use errors::{StoreError, StoreResult};
pub use places::{Place, PlaceSummary};
pub use reviews::{Review, ReviewWithAuthor};
pub use users::{NewUser, User};

/// Shared handle to the review database
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub users: u64,
    pub places: u64,
    pub reviews: u64,
}

impl Database {
    /// Open (or create) a database file and apply the schema
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database (tests, ephemeral runs)
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        schema::apply(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the connection for a unit of work
    pub async fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }

    /// Count rows in the main tables
    pub async fn counts(&self) -> StoreResult<TableCounts> {
        let conn = self.connection().await;
        let count = |table: &str| -> StoreResult<u64> {
            let sql = format!("SELECT COUNT(*) FROM {}", table);
            let n: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(n as u64)
        };

        Ok(TableCounts {
            users: count("users")?,
            places: count("places")?,
            reviews: count("reviews")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_starts_empty() {
        let db = Database::open_in_memory().unwrap();
        let counts = db.counts().await.unwrap();
        assert_eq!(
            counts,
            TableCounts {
                users: 0,
                places: 0,
                reviews: 0
            }
        );
    }

    #[tokio::test]
    async fn test_file_database_reopens_with_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reviews.db");

        {
            let db = Database::open(&path).unwrap();
            let conn = db.connection().await;
            places::insert(&conn, "Blue Cafe", "1 Main St").unwrap();
        }

        // Schema application is idempotent
        let db = Database::open(&path).unwrap();
        assert_eq!(db.counts().await.unwrap().places, 1);
    }
}
