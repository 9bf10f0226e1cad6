//! # Auth Module
//!
//! Phone-number accounts, password hashing and opaque bearer tokens.

pub mod crypto;
pub mod errors;
pub mod service;
pub mod user;

pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use service::{parse_authorization, AuthService};
pub use user::{AuthResponse, LoginRequest, RegisterRequest};
