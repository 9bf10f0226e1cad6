//! # Places Module
//!
//! Reviews of places, rated place search and place detail views.
//!
//! ## Invariants
//! - Average rating is the mean of review ratings rounded to 2 decimals,
//!   0 when a place has no reviews
//! - Exact (case-insensitive) name matches rank ahead of partial matches
//! - A viewer's own review is listed first on a place page

pub mod detail;
pub mod errors;
pub mod review;
pub mod search;
pub mod service;

pub use detail::{PlaceDetail, ReviewView};
pub use errors::{PlaceError, PlaceResult};
pub use review::{AddReviewRequest, CreatedReview};
pub use search::{SearchParams, SearchQuery};
pub use service::PlaceService;
