//! # Auth Service
//!
//! Registration, login and bearer-token authentication over the store.
//!
//! Tokens are opaque, one per user, created on first need and reused by
//! every later login.

use crate::observability::{log_event_with_fields, Event};
use crate::store::{tokens, users, Database, NewUser, StoreError, User};
use crate::validation::FieldErrors;

use super::crypto::{
    generate_token, has_usable_password, hash_password, unusable_password, verify_password,
    PasswordPolicy,
};
use super::errors::{AuthError, AuthResult};
use super::user::{AuthResponse, LoginRequest, RegisterRequest};

const DUPLICATE_PHONE: &str = "user with this phone number already exists.";

/// Auth service combining the user and token tables
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    password_policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(db: Database, password_policy: PasswordPolicy) -> Self {
        Self {
            db,
            password_policy,
        }
    }

    /// Register a new user and issue their token
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<AuthResponse> {
        let valid = request.validate()?;

        let password_hash = match valid.password.as_deref() {
            Some(password) => self.hash_with_policy(password)?,
            None => unusable_password(),
        };

        let mut conn = self.db.connection().await;

        if users::phone_exists(&conn, &valid.phone_number)? {
            return Err(duplicate_phone());
        }

        let new_user = NewUser {
            name: valid.name,
            phone_number: valid.phone_number,
            password_hash,
            is_staff: false,
            is_superuser: false,
        };
        // User and token land together or not at all
        let tx = conn.transaction().map_err(StoreError::from)?;
        let user = users::insert(&tx, &new_user).map_err(map_duplicate_phone)?;
        let token = tokens::get_or_create(&tx, user.id, generate_token)?;
        tx.commit().map_err(StoreError::from)?;
        drop(conn);

        log_event_with_fields(Event::UserRegistered, &[("user_id", user.id.to_string().as_str())]);

        Ok(AuthResponse::new(token, &user))
    }

    /// Authenticate by phone number and return the user's token.
    ///
    /// Accounts holding a usable password must also supply it.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<AuthResponse> {
        let phone_number = request.validate()?;

        let user = {
            let conn = self.db.connection().await;
            users::find_by_phone(&conn, &phone_number)?.ok_or(AuthError::UserNotFound)?
        };

        if has_usable_password(&user.password_hash) {
            let supplied = request.password.as_deref().unwrap_or_default();
            if !verify_password(supplied, &user.password_hash) {
                return Err(AuthError::InvalidCredentials);
            }
        }

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        let token = {
            let conn = self.db.connection().await;
            tokens::get_or_create(&conn, user.id, generate_token)?
        };

        log_event_with_fields(Event::UserLoggedIn, &[("user_id", user.id.to_string().as_str())]);

        Ok(AuthResponse::new(token, &user))
    }

    /// Resolve an `Authorization` header value to an active user
    pub async fn authenticate(&self, authorization: Option<&str>) -> AuthResult<User> {
        let key = parse_authorization(authorization)?;

        let conn = self.db.connection().await;
        let user = tokens::find_user(&conn, key)?.ok_or(AuthError::InvalidToken)?;

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        Ok(user)
    }

    /// Create a staff superuser account (admin tooling)
    pub async fn create_admin(
        &self,
        name: &str,
        phone_number: &str,
        password: &str,
    ) -> AuthResult<User> {
        let valid = RegisterRequest {
            name: Some(name.to_string()),
            phone_number: Some(phone_number.to_string()),
            password: Some(password.to_string()),
        }
        .validate()?;

        self.password_policy.validate(password)?;
        let password_hash = hash_password(password)?;

        let conn = self.db.connection().await;
        let user = users::insert(
            &conn,
            &NewUser {
                name: valid.name,
                phone_number: valid.phone_number,
                password_hash,
                is_staff: true,
                is_superuser: true,
            },
        )
        .map_err(map_duplicate_phone)?;
        drop(conn);

        log_event_with_fields(Event::AdminCreated, &[("user_id", user.id.to_string().as_str())]);

        Ok(user)
    }

    /// Activate or deactivate an account (admin tooling)
    pub async fn set_active(&self, phone_number: &str, active: bool) -> AuthResult<User> {
        let conn = self.db.connection().await;
        let mut user = users::find_by_phone(&conn, phone_number)?.ok_or(AuthError::UserNotFound)?;
        users::set_active(&conn, user.id, active)?;
        user.is_active = active;
        drop(conn);

        log_event_with_fields(
            Event::UserActivationChanged,
            &[
                ("active", if active { "true" } else { "false" }),
                ("user_id", user.id.to_string().as_str()),
            ],
        );

        Ok(user)
    }

    fn hash_with_policy(&self, password: &str) -> AuthResult<String> {
        match self.password_policy.validate(password) {
            Err(AuthError::WeakPassword(message)) => {
                Err(AuthError::Validation(FieldErrors::single("password", message)))
            }
            Err(other) => Err(other),
            Ok(()) => hash_password(password),
        }
    }
}

/// Extract the token key from `Bearer <key>` (or `Token <key>`)
pub fn parse_authorization(header: Option<&str>) -> AuthResult<&str> {
    let header = header.map(str::trim).unwrap_or_default();
    if header.is_empty() {
        return Err(AuthError::AuthenticationRequired);
    }

    let (scheme, key) = header.split_once(' ').unwrap_or((header, ""));
    if !scheme.eq_ignore_ascii_case("bearer") && !scheme.eq_ignore_ascii_case("token") {
        return Err(AuthError::AuthenticationRequired);
    }

    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(AuthError::InvalidToken);
    }

    Ok(key)
}

fn duplicate_phone() -> AuthError {
    AuthError::Validation(FieldErrors::single("phone_number", DUPLICATE_PHONE))
}

fn map_duplicate_phone(err: StoreError) -> AuthError {
    if err.is_unique_violation() {
        duplicate_phone()
    } else {
        AuthError::Store(err)
    }
}
