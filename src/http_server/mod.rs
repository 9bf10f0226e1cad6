//! # HTTP Server Module
//!
//! Axum server exposing the review API.
//!
//! # Endpoints
//!
//! - `POST /register/`, `POST /login/` - Token issuance
//! - `POST /add-review/` - Review a place, creating it on first mention
//! - `GET /places/` - Search places by name and minimum average rating
//! - `GET /places/:id/` - Place detail with reviews
//! - `GET /health` - Health check
//!
//! Routes are also served without the trailing slash.

pub mod auth_routes;
pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod place_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
