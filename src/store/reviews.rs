//! Review rows.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

use super::errors::StoreResult;

/// A rating and text authored by one user for one place
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub place_id: i64,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Review joined with its author's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Insert a review.
///
/// A second review for the same (user, place) pair fails with a unique
/// violation; a rating outside 1..=5 fails with a check violation.
pub fn insert(
    conn: &Connection,
    user_id: i64,
    place_id: i64,
    rating: i64,
    text: &str,
) -> StoreResult<Review> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO reviews (user_id, place_id, rating, text, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, place_id, rating, text, now],
    )?;

    Ok(Review {
        id: conn.last_insert_rowid(),
        user_id,
        place_id,
        rating,
        text: text.to_string(),
        created_at: now,
    })
}

/// Reviews of a place, most recent first
pub fn list_for_place(conn: &Connection, place_id: i64) -> StoreResult<Vec<ReviewWithAuthor>> {
    let mut stmt = conn.prepare(
        "SELECT r.id AS id, r.user_id AS user_id, u.name AS user_name, r.rating AS rating,
                r.text AS text, r.created_at AS created_at
         FROM reviews r
         JOIN users u ON u.id = r.user_id
         WHERE r.place_id = ?1
         ORDER BY r.created_at DESC, r.id DESC",
    )?;

    let rows = stmt
        .query_map(params![place_id], |row| {
            Ok(ReviewWithAuthor {
                id: row.get("id")?,
                user_id: row.get("user_id")?,
                user_name: row.get("user_name")?,
                rating: row.get("rating")?,
                text: row.get("text")?,
                created_at: row.get("created_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::users::{self, NewUser};
    use crate::store::{places, Database, StoreError};

    fn add_user(conn: &Connection, phone: &str, name: &str) -> i64 {
        users::insert(
            conn,
            &NewUser {
                name: name.to_string(),
                phone_number: phone.to_string(),
                password_hash: "!x".to_string(),
                is_staff: false,
                is_superuser: false,
            },
        )
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_one_review_per_user_per_place() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        let user = add_user(&conn, "5550001", "Asha");
        let place = places::insert(&conn, "Cafe", "1 Main St").unwrap();

        insert(&conn, user, place.id, 4, "nice").unwrap();
        let err = insert(&conn, user, place.id, 2, "changed my mind").unwrap_err();
        assert!(err.is_unique_violation());

        let other = places::insert(&conn, "Bar", "2 Main St").unwrap();
        insert(&conn, user, other.id, 3, "fine").unwrap();
    }

    #[tokio::test]
    async fn test_rating_check_constraint() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        let user = add_user(&conn, "5550001", "Asha");
        let place = places::insert(&conn, "Cafe", "1 Main St").unwrap();

        let err = insert(&conn, user, place.id, 6, "too good").unwrap_err();
        assert!(matches!(err, StoreError::CheckViolation(_)));
    }

    #[tokio::test]
    async fn test_list_most_recent_first_with_author() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        let asha = add_user(&conn, "5550001", "Asha");
        let ravi = add_user(&conn, "5550002", "Ravi");
        let place = places::insert(&conn, "Cafe", "1 Main St").unwrap();

        let first = insert(&conn, asha, place.id, 4, "first").unwrap();
        let second = insert(&conn, ravi, place.id, 5, "second").unwrap();

        let reviews = list_for_place(&conn, place.id).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, second.id);
        assert_eq!(reviews[0].user_name, "Ravi");
        assert_eq!(reviews[1].id, first.id);
    }

    #[tokio::test]
    async fn test_reviews_cascade_with_place_and_user() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection().await;

        let asha = add_user(&conn, "5550001", "Asha");
        let ravi = add_user(&conn, "5550002", "Ravi");
        let place = places::insert(&conn, "Cafe", "1 Main St").unwrap();
        insert(&conn, asha, place.id, 4, "a").unwrap();
        insert(&conn, ravi, place.id, 5, "b").unwrap();

        conn.execute("DELETE FROM users WHERE id = ?1", params![asha])
            .unwrap();
        assert_eq!(list_for_place(&conn, place.id).unwrap().len(), 1);

        conn.execute("DELETE FROM places WHERE id = ?1", params![place.id])
            .unwrap();
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
