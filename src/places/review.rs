//! Add-review payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::{Place, Review};
use crate::validation::{required_int_in_range, required_text, FieldErrors};

/// Maximum place name length
pub const PLACE_NAME_MAX_LEN: usize = 255;

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// Body of `POST /add-review/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddReviewRequest {
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub place_address: Option<String>,
    /// Number or numeric string
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A validated review submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub place_name: String,
    pub place_address: String,
    pub rating: i64,
    pub text: String,
}

impl AddReviewRequest {
    pub fn validate(&self) -> Result<NewReview, FieldErrors> {
        let mut errors = FieldErrors::new();

        let place_name = required_text(
            &mut errors,
            "place_name",
            self.place_name.as_deref(),
            Some(PLACE_NAME_MAX_LEN),
        );
        let place_address =
            required_text(&mut errors, "place_address", self.place_address.as_deref(), None);
        let rating = required_int_in_range(
            &mut errors,
            "rating",
            self.rating.as_ref(),
            MIN_RATING,
            MAX_RATING,
        );
        let text = required_text(&mut errors, "text", self.text.as_deref(), None);

        match (place_name, place_address, rating, text) {
            (Some(place_name), Some(place_address), Some(rating), Some(text))
                if errors.is_empty() =>
            {
                Ok(NewReview {
                    place_name,
                    place_address,
                    rating,
                    text,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Response for a stored review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedReview {
    pub id: i64,
    pub place_id: i64,
    pub place_name: String,
    pub rating: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CreatedReview {
    pub fn new(review: &Review, place: &Place) -> Self {
        Self {
            id: review.id,
            place_id: place.id,
            place_name: place.name.clone(),
            rating: review.rating,
            text: review.text.clone(),
            created_at: review.created_at,
        }
    }
}
