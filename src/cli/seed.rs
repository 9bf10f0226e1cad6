//! Sample data for local development.

use rand::distributions::WeightedIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;
use serde::Serialize;

use crate::auth::crypto::unusable_password;
use crate::store::{places, reviews, users, NewUser, StoreResult, User};

use super::errors::{CliError, CliErrorCode, CliResult};

pub const USER_COUNT: usize = 10;
pub const PLACE_COUNT: usize = 30;
pub const MAX_REVIEWS_PER_PLACE: usize = 15;

const PLACE_TYPES: [&str; 10] = [
    "Restaurant", "Cafe", "Shop", "Clinic", "Pharmacy", "Gym", "Salon", "Bakery", "Bar", "Store",
];

/// Weights for ratings 1 through 5
const RATING_WEIGHTS: [u32; 5] = [5, 10, 20, 30, 35];

const FIRST_NAMES: [&str; 12] = [
    "Asha", "Ravi", "Mira", "Jon", "Lena", "Omar", "Priya", "Tomas", "Yuki", "Zara", "Ivan",
    "Nadia",
];

const LAST_NAMES: [&str; 10] = [
    "Patel", "Okafor", "Lindqvist", "Moreau", "Tanaka", "Silva", "Kowalski", "Haddad", "Reyes",
    "Novak",
];

const COMPANY_WORDS: [&str; 14] = [
    "Golden", "Blue", "Maple", "Harbor", "Summit", "Riverside", "Cedar", "Lotus", "Granite",
    "Willow", "Copper", "Juniper", "Orchid", "Northgate",
];

const STREETS: [&str; 8] = [
    "Main St", "Oak Ave", "Station Rd", "Market Sq", "Hill Ln", "Park Blvd", "Bridge St",
    "Elm Ct",
];

const CITIES: [&str; 6] = ["Springfield", "Riverton", "Lakeside", "Fairview", "Brookfield", "Ashford"];

const REVIEW_PHRASES: [&str; 10] = [
    "Friendly staff.",
    "Would come back.",
    "A bit pricey.",
    "Quick service.",
    "Clean and bright.",
    "Hard to find parking.",
    "Great value.",
    "Busy at lunch.",
    "Quiet in the mornings.",
    "Not what I expected.",
];

/// Counts of inserted rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub places: usize,
    pub reviews: usize,
}

/// Insert sample users, places and reviews.
///
/// Each place gets 1 to 15 reviews from distinct users, capped by the number
/// of users. Name collisions with existing rows are skipped.
pub fn seed<R: Rng>(conn: &Connection, rng: &mut R) -> CliResult<SeedReport> {
    let mut report = SeedReport::default();

    let seeded_users = seed_users(conn, rng)?;
    report.users = seeded_users.len();

    let ratings = WeightedIndex::new(RATING_WEIGHTS)
        .map_err(|e| CliError::new(CliErrorCode::SeedFailed, e.to_string()))?;

    for _ in 0..PLACE_COUNT {
        let name = format!("{} {}", company(rng), pick(rng, &PLACE_TYPES));
        let place = match places::insert(conn, &name, &address(rng)) {
            Ok(place) => place,
            Err(e) if e.is_unique_violation() => continue,
            Err(e) => return Err(e.into()),
        };
        report.places += 1;

        let wanted = rng.gen_range(1..=MAX_REVIEWS_PER_PLACE);
        let reviewers: Vec<&User> = seeded_users
            .choose_multiple(rng, wanted.min(seeded_users.len()))
            .collect();

        for user in reviewers {
            let rating = rng.sample(&ratings) as i64 + 1;
            reviews::insert(conn, user.id, place.id, rating, &review_text(rng))?;
            report.reviews += 1;
        }
    }

    Ok(report)
}

fn seed_users<R: Rng>(conn: &Connection, rng: &mut R) -> StoreResult<Vec<User>> {
    let mut seeded = Vec::with_capacity(USER_COUNT);

    while seeded.len() < USER_COUNT {
        let phone_number: String = (0..10)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect();
        if users::phone_exists(conn, &phone_number)? {
            continue;
        }

        let name = format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES));
        let user = users::insert(
            conn,
            &NewUser {
                name,
                phone_number,
                password_hash: unusable_password(),
                is_staff: false,
                is_superuser: false,
            },
        )?;
        seeded.push(user);
    }

    Ok(seeded)
}

fn pick<'a, R: Rng>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn company<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..3) {
        0 => format!("{} & {}", pick(rng, &LAST_NAMES), pick(rng, &LAST_NAMES)),
        1 => format!("{} {}", pick(rng, &COMPANY_WORDS), pick(rng, &LAST_NAMES)),
        _ => pick(rng, &COMPANY_WORDS).to_string(),
    }
}

fn address<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {}, {} {:05}",
        rng.gen_range(1..=999),
        pick(rng, &STREETS),
        pick(rng, &CITIES),
        rng.gen_range(10000..=99999)
    )
}

fn review_text<R: Rng>(rng: &mut R) -> String {
    let count = rng.gen_range(1..=3);
    REVIEW_PHRASES
        .choose_multiple(rng, count)
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_seed_counts() {
        let db = Database::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let report = {
            let conn = db.connection().await;
            seed(&conn, &mut rng).unwrap()
        };

        assert_eq!(report.users, USER_COUNT);
        assert!(report.places > 0 && report.places <= PLACE_COUNT);
        assert!(report.reviews >= report.places);
        assert!(report.reviews <= report.places * USER_COUNT);

        let counts = db.counts().await.unwrap();
        assert_eq!(counts.users as usize, report.users);
        assert_eq!(counts.places as usize, report.places);
        assert_eq!(counts.reviews as usize, report.reviews);
    }

    #[tokio::test]
    async fn test_seed_ratings_in_range() {
        let db = Database::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let conn = db.connection().await;
        seed(&conn, &mut rng).unwrap();

        let out_of_range: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM reviews WHERE rating < 1 OR rating > 5",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(out_of_range, 0);
    }

    #[test]
    fn test_review_text_not_blank() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert!(!review_text(&mut rng).trim().is_empty());
        }
    }
}
