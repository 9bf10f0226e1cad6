//! # Account Requests
//!
//! Registration and login payloads, their validation, and the response
//! returned to clients after either succeeds.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::store::User;
use crate::validation::{required_text, FieldErrors};

/// Maximum display name length
pub const NAME_MAX_LEN: usize = 100;

/// Maximum phone number length, including a leading `+`
pub const PHONE_MAX_LEN: usize = 12;

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]+$").expect("phone pattern is valid"))
}

/// Registration request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration fields after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub name: String,
    pub phone_number: String,
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Check field shapes; uniqueness is checked against the store later
    pub fn validate(&self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", self.name.as_deref(), Some(NAME_MAX_LEN));
        let phone_number = validate_phone(&mut errors, self.phone_number.as_deref());

        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        match (name, phone_number) {
            (Some(name), Some(phone_number)) if errors.is_empty() => Ok(ValidRegistration {
                name,
                phone_number,
                password,
            }),
            _ => Err(errors),
        }
    }
}

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns the trimmed phone number
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        match required_text(&mut errors, "phone_number", self.phone_number.as_deref(), None) {
            Some(phone) => Ok(phone),
            None => Err(errors),
        }
    }
}

fn validate_phone(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    let phone = required_text(errors, "phone_number", value, Some(PHONE_MAX_LEN))?;
    if !phone_pattern().is_match(&phone) {
        errors.add("phone_number", "Enter a valid phone number.");
        return None;
    }
    Some(phone)
}

/// Returned by both register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub name: String,
    pub phone_number: String,
}

impl AuthResponse {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            user_id: user.id,
            name: user.name.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}
