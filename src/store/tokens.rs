//! Opaque auth tokens, one per user.
//!
//! A token is created the first time a user needs one and returned unchanged
//! on every later login.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::errors::StoreResult;
use super::users::{user_from_row, User};

/// Return the user's token, creating it with `generate` when absent
pub fn get_or_create(
    conn: &Connection,
    user_id: i64,
    generate: impl FnOnce() -> String,
) -> StoreResult<String> {
    if let Some(key) = find_for_user(conn, user_id)? {
        return Ok(key);
    }

    let key = generate();
    conn.execute(
        "INSERT INTO auth_tokens (key, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![key, user_id, Utc::now()],
    )?;
    Ok(key)
}

pub fn find_for_user(conn: &Connection, user_id: i64) -> StoreResult<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT key FROM auth_tokens WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?)
}

/// Resolve a token key to its owner
pub fn find_user(conn: &Connection, key: &str) -> StoreResult<Option<User>> {
    Ok(conn
        .query_row(
            "SELECT u.id AS id, u.name AS name, u.phone_number AS phone_number,
                    u.password_hash AS password_hash, u.is_staff AS is_staff,
                    u.is_superuser AS is_superuser, u.is_active AS is_active,
                    u.created_at AS created_at
             FROM auth_tokens t JOIN users u ON u.id = t.user_id
             WHERE t.key = ?1",
            params![key],
            user_from_row,
        )
        .optional()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::users::{self, NewUser};
    use crate::store::Database;

    fn new_user() -> NewUser {
        NewUser {
            name: "Ravi".to_string(),
            phone_number: "5551234".to_string(),
            password_hash: "!x".to_string(),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_token() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;
        let user = users::insert(&conn, &new_user()).unwrap();

        let first = get_or_create(&conn, user.id, || "tok-1".to_string()).unwrap();
        let second = get_or_create(&conn, user.id, || "tok-2".to_string()).unwrap();

        assert_eq!(first, "tok-1");
        assert_eq!(second, "tok-1");
    }

    #[tokio::test]
    async fn test_find_user_by_key() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;
        let user = users::insert(&conn, &new_user()).unwrap();
        get_or_create(&conn, user.id, || "secret".to_string()).unwrap();

        let found = find_user(&conn, "secret").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(find_user(&conn, "other").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_deleted_with_user() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;
        let user = users::insert(&conn, &new_user()).unwrap();
        get_or_create(&conn, user.id, || "secret".to_string()).unwrap();

        conn.execute("DELETE FROM users WHERE id = ?1", params![user.id])
            .unwrap();
        assert!(find_for_user(&conn, user.id).unwrap().is_none());
    }
}
