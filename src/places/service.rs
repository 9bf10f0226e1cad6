//! # Place Service
//!
//! Add-review, search and detail operations over the store.

use crate::observability::{log_event_with_fields, Event};
use crate::store::{places, reviews, Database, PlaceSummary, StoreError, User};

use super::detail::PlaceDetail;
use super::errors::{PlaceError, PlaceResult};
use super::review::{AddReviewRequest, CreatedReview};
use super::search::SearchQuery;

#[derive(Clone)]
pub struct PlaceService {
    db: Database,
}

impl PlaceService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Store a review by `author`, creating the place on first mention.
    ///
    /// The place lookup/creation and the review insert share one
    /// transaction. A second review of the same place by the same author is
    /// a conflict and leaves the existing review untouched.
    pub async fn add_review(
        &self,
        author: &User,
        request: AddReviewRequest,
    ) -> PlaceResult<CreatedReview> {
        let new_review = request.validate()?;

        let mut conn = self.db.connection().await;
        let tx = conn.transaction()?;

        let (place, place_created) =
            places::get_or_create(&tx, &new_review.place_name, &new_review.place_address)
                .map_err(|e| conflict_or(e, PlaceError::PlaceConflict))?;

        let review = match reviews::insert(
            &tx,
            author.id,
            place.id,
            new_review.rating,
            &new_review.text,
        ) {
            Ok(review) => review,
            Err(e) => {
                let err = conflict_or(e, PlaceError::DuplicateReview);
                if matches!(err, PlaceError::DuplicateReview) {
                    log_event_with_fields(
                        Event::ReviewConflict,
                        &[
                            ("place_id", place.id.to_string().as_str()),
                            ("user_id", author.id.to_string().as_str()),
                        ],
                    );
                }
                return Err(err);
            }
        };

        tx.commit()?;
        drop(conn);

        if place_created {
            log_event_with_fields(Event::PlaceCreated, &[("place_id", place.id.to_string().as_str())]);
        }
        log_event_with_fields(
            Event::ReviewCreated,
            &[
                ("place_id", place.id.to_string().as_str()),
                ("review_id", review.id.to_string().as_str()),
                ("user_id", author.id.to_string().as_str()),
            ],
        );

        Ok(CreatedReview::new(&review, &place))
    }

    /// Places with average ratings, filtered and ranked by `query`
    pub async fn search(&self, query: &SearchQuery) -> PlaceResult<Vec<PlaceSummary>> {
        let conn = self.db.connection().await;
        Ok(places::search(
            &conn,
            query.name.as_deref(),
            query.min_rating,
        )?)
    }

    /// A place with its average rating and reviews, `viewer`'s own first
    pub async fn detail(&self, place_id: i64, viewer: &User) -> PlaceResult<PlaceDetail> {
        let conn = self.db.connection().await;

        let place = places::find_by_id(&conn, place_id)?.ok_or(PlaceError::PlaceNotFound)?;
        let average_rating = places::average_rating(&conn, place.id)?;
        let reviews = reviews::list_for_place(&conn, place.id)?;

        Ok(PlaceDetail::new(place, average_rating, reviews, viewer.id))
    }
}

fn conflict_or(err: StoreError, conflict: PlaceError) -> PlaceError {
    if err.is_unique_violation() {
        conflict
    } else {
        PlaceError::Store(err)
    }
}
