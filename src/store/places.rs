//! Place rows and the rating aggregation queries.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::errors::StoreResult;

/// A named, addressed entity that can receive reviews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Search row: a place with its rounded average rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSummary {
    pub id: i64,
    pub name: String,
    pub average_rating: f64,
}

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    Ok(Place {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

/// Find a place by exact (case-sensitive) name and address
pub fn find_exact(conn: &Connection, name: &str, address: &str) -> StoreResult<Option<Place>> {
    Ok(conn
        .query_row(
            "SELECT id, name, address, created_at FROM places WHERE name = ?1 AND address = ?2",
            params![name, address],
            place_from_row,
        )
        .optional()?)
}

pub fn find_by_id(conn: &Connection, id: i64) -> StoreResult<Option<Place>> {
    Ok(conn
        .query_row(
            "SELECT id, name, address, created_at FROM places WHERE id = ?1",
            params![id],
            place_from_row,
        )
        .optional()?)
}

/// Insert a place. Fails with a unique violation when a place with the same
/// name and address (ignoring case) already exists.
pub fn insert(conn: &Connection, name: &str, address: &str) -> StoreResult<Place> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO places (name, address, created_at) VALUES (?1, ?2, ?3)",
        params![name, address, now],
    )?;

    Ok(Place {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        address: address.to_string(),
        created_at: now,
    })
}

/// Find a place by exact match or create it.
///
/// Returns the place and whether it was created.
pub fn get_or_create(conn: &Connection, name: &str, address: &str) -> StoreResult<(Place, bool)> {
    if let Some(place) = find_exact(conn, name, address)? {
        return Ok((place, false));
    }
    Ok((insert(conn, name, address)?, true))
}

/// Mean review rating rounded to 2 decimals, 0 when unreviewed
pub fn average_rating(conn: &Connection, place_id: i64) -> StoreResult<f64> {
    let avg: f64 = conn.query_row(
        "SELECT COALESCE(ROUND(AVG(rating), 2), 0.0) FROM reviews WHERE place_id = ?1",
        params![place_id],
        |row| row.get(0),
    )?;
    Ok(avg)
}

/// Places with their average rating.
///
/// `name` filters by case-insensitive substring and ranks exact
/// (case-insensitive) matches ahead of partial ones. `min_rating` keeps
/// places whose rounded average is at least the given value. Within a rank
/// the order is alphabetical.
pub fn search(
    conn: &Connection,
    name: Option<&str>,
    min_rating: Option<f64>,
) -> StoreResult<Vec<PlaceSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, average_rating FROM (
             SELECT p.id AS id,
                    p.name AS name,
                    COALESCE(ROUND(AVG(r.rating), 2), 0.0) AS average_rating
             FROM places p
             LEFT JOIN reviews r ON r.place_id = p.id
             GROUP BY p.id
         )
         WHERE (?1 IS NULL OR instr(casefold(name), casefold(?1)) > 0)
           AND (?2 IS NULL OR average_rating >= ?2)
         ORDER BY
             CASE WHEN ?1 IS NOT NULL AND casefold(name) = casefold(?1) THEN 1 ELSE 2 END,
             casefold(name),
             id",
    )?;

    let rows = stmt
        .query_map(params![name, min_rating], |row| {
            Ok(PlaceSummary {
                id: row.get("id")?,
                name: row.get("name")?,
                average_rating: row.get("average_rating")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}
