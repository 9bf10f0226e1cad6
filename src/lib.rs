//! placereview - a place-review backend
//!
//! Users register with a phone number and receive an API token. With it they
//! review places, search places by name and minimum average rating, and view a
//! place with its reviews.

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod places;
pub mod store;
pub mod validation;
