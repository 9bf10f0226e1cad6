//! User rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::errors::StoreResult;

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone_number: String,

    /// Argon2id PHC string, or an unusable marker (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

const USER_COLUMNS: &str =
    "id, name, phone_number, password_hash, is_staff, is_superuser, is_active, created_at";

pub(super) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        password_hash: row.get("password_hash")?,
        is_staff: row.get("is_staff")?,
        is_superuser: row.get("is_superuser")?,
        is_active: row.get("is_active")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new active user
pub fn insert(conn: &Connection, new_user: &NewUser) -> StoreResult<User> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO users (name, phone_number, password_hash, is_staff, is_superuser, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        params![
            new_user.name,
            new_user.phone_number,
            new_user.password_hash,
            new_user.is_staff,
            new_user.is_superuser,
            now,
        ],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        name: new_user.name.clone(),
        phone_number: new_user.phone_number.clone(),
        password_hash: new_user.password_hash.clone(),
        is_staff: new_user.is_staff,
        is_superuser: new_user.is_superuser,
        is_active: true,
        created_at: now,
    })
}

pub fn find_by_id(conn: &Connection, id: i64) -> StoreResult<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
    Ok(conn.query_row(&sql, params![id], user_from_row).optional()?)
}

pub fn find_by_phone(conn: &Connection, phone_number: &str) -> StoreResult<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE phone_number = ?1", USER_COLUMNS);
    Ok(conn
        .query_row(&sql, params![phone_number], user_from_row)
        .optional()?)
}

pub fn phone_exists(conn: &Connection, phone_number: &str) -> StoreResult<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM users WHERE phone_number = ?1)",
        params![phone_number],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Toggle the active flag (admin tooling)
pub fn set_active(conn: &Connection, id: i64, active: bool) -> StoreResult<()> {
    let changed = conn.execute(
        "UPDATE users SET is_active = ?1 WHERE id = ?2",
        params![active, id],
    )?;
    if changed == 0 {
        return Err(super::StoreError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Database, StoreError};

    fn new_user(phone: &str) -> NewUser {
        NewUser {
            name: "Asha".to_string(),
            phone_number: phone.to_string(),
            password_hash: "!unusable".to_string(),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        let user = insert(&conn, &new_user("5550001")).unwrap();
        assert!(user.is_active);
        assert!(!user.is_staff);

        let by_id = find_by_id(&conn, user.id).unwrap().unwrap();
        assert_eq!(by_id.phone_number, "5550001");

        let by_phone = find_by_phone(&conn, "5550001").unwrap().unwrap();
        assert_eq!(by_phone.id, user.id);

        assert!(phone_exists(&conn, "5550001").unwrap());
        assert!(!phone_exists(&conn, "5550002").unwrap());
        assert!(find_by_phone(&conn, "5550002").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_unique_violation() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        insert(&conn, &new_user("5550001")).unwrap();
        let err = insert(&conn, &new_user("5550001")).unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_set_active() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        let user = insert(&conn, &new_user("5550001")).unwrap();
        set_active(&conn, user.id, false).unwrap();
        assert!(!find_by_id(&conn, user.id).unwrap().unwrap().is_active);

        assert!(matches!(
            set_active(&conn, 999, false),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_serialization_omits_password_hash() {
        let user = User {
            id: 1,
            name: "Asha".to_string(),
            phone_number: "5550001".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$argon2id$secret"));
    }
}
