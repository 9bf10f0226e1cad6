//! Place detail view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Place, ReviewWithAuthor};

/// One review as shown on a place page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: i64,
    pub user_name: String,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewWithAuthor> for ReviewView {
    fn from(review: ReviewWithAuthor) -> Self {
        Self {
            id: review.id,
            user_name: review.user_name,
            rating: review.rating,
            text: review.text,
            created_at: review.created_at,
        }
    }
}

/// Body of `GET /places/<id>/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub average_rating: f64,
    pub reviews: Vec<ReviewView>,
}

impl PlaceDetail {
    /// Shape a place for `viewer_id`, whose own review is listed first
    pub fn new(
        place: Place,
        average_rating: f64,
        reviews: Vec<ReviewWithAuthor>,
        viewer_id: i64,
    ) -> Self {
        Self {
            id: place.id,
            name: place.name,
            address: place.address,
            average_rating,
            reviews: own_review_first(reviews, viewer_id)
                .into_iter()
                .map(ReviewView::from)
                .collect(),
        }
    }
}

/// Move the viewer's review to the front, keeping the relative order of the
/// rest
pub fn own_review_first(mut reviews: Vec<ReviewWithAuthor>, viewer_id: i64) -> Vec<ReviewWithAuthor> {
    // sort_by_key is stable
    reviews.sort_by_key(|review| review.user_id != viewer_id);
    reviews
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: i64, user_id: i64) -> ReviewWithAuthor {
        ReviewWithAuthor {
            id,
            user_id,
            user_name: format!("user {}", user_id),
            rating: 4,
            text: "ok".to_string(),
            created_at: Utc::now(),
        }
    }

    fn ids(reviews: &[ReviewWithAuthor]) -> Vec<i64> {
        reviews.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_viewer_review_moves_first() {
        let reviews = vec![review(30, 3), review(20, 2), review(10, 1)];
        let ordered = own_review_first(reviews, 1);
        assert_eq!(ids(&ordered), vec![10, 30, 20]);
    }

    #[test]
    fn test_order_kept_without_viewer_review() {
        let reviews = vec![review(30, 3), review(20, 2)];
        let ordered = own_review_first(reviews, 9);
        assert_eq!(ids(&ordered), vec![30, 20]);
    }

    #[test]
    fn test_detail_shape() {
        let place = Place {
            id: 7,
            name: "Cafe".to_string(),
            address: "1 Main St".to_string(),
            created_at: Utc::now(),
        };
        let detail = PlaceDetail::new(place, 4.5, vec![review(2, 5), review(1, 6)], 6);

        assert_eq!(detail.reviews[0].id, 1);
        assert_eq!(detail.reviews[0].user_name, "user 6");

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["average_rating"], 4.5);
        assert!(json["reviews"][0].get("user_id").is_none());
    }
}
