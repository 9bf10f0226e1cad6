//! Table definitions, applied idempotently on every open.
//!
//! Case-insensitive comparisons go through `casefold()`, a Unicode-aware
//! lowercase registered on every connection. SQLite's built-in `lower()` only
//! folds ASCII.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use super::errors::StoreResult;

const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL,
    phone_number  TEXT    NOT NULL UNIQUE,
    password_hash TEXT    NOT NULL,
    is_staff      INTEGER NOT NULL DEFAULT 0,
    is_superuser  INTEGER NOT NULL DEFAULT 0,
    is_active     INTEGER NOT NULL DEFAULT 1,
    created_at    TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS auth_tokens (
    key        TEXT    PRIMARY KEY,
    user_id    INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS places (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    address    TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS places_name_idx ON places (name);
DROP INDEX IF EXISTS unique_places;
CREATE UNIQUE INDEX IF NOT EXISTS unique_places_casefold ON places (casefold(name), casefold(address));

CREATE TABLE IF NOT EXISTS reviews (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    place_id   INTEGER NOT NULL REFERENCES places(id) ON DELETE CASCADE,
    rating     INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    text       TEXT    NOT NULL,
    created_at TEXT    NOT NULL,
    CONSTRAINT one_review_per_user_per_place UNIQUE (user_id, place_id)
);

CREATE INDEX IF NOT EXISTS reviews_place_recent_idx ON reviews (place_id, created_at DESC);
"#;

/// Register `casefold()`, then create tables and indexes if they are missing
pub(super) fn apply(conn: &Connection) -> StoreResult<()> {
    register_casefold(conn)?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Lowercase per Unicode, so "CAFÉ" and "café" compare equal.
///
/// Deterministic, which SQLite requires for use in an index expression.
fn register_casefold(conn: &Connection) -> StoreResult<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();

        let tables = table_names(&conn);
        for table in ["auth_tokens", "places", "reviews", "users"] {
            assert!(tables.contains(&table.to_string()), "missing {}", table);
        }
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        apply(&conn).unwrap();
    }

    #[test]
    fn test_casefold_handles_non_ascii() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT casefold('CAFÉ ÅRHUS')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "café århus");

        let null: Option<String> = conn
            .query_row("SELECT casefold(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        apply(&conn).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
