//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed and the process exits non-zero.

use std::fmt;
use std::io;

use crate::auth::AuthError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Database already created
    AlreadyInitialized,
    /// Database missing
    NotInitialized,
    /// Database operation failed
    StoreError,
    /// Account command rejected
    AuthError,
    /// Sample data could not be generated
    SeedFailed,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PLACEREVIEW_CLI_CONFIG_ERROR",
            Self::IoError => "PLACEREVIEW_CLI_IO_ERROR",
            Self::AlreadyInitialized => "PLACEREVIEW_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "PLACEREVIEW_CLI_NOT_INITIALIZED",
            Self::StoreError => "PLACEREVIEW_CLI_STORE_ERROR",
            Self::AuthError => "PLACEREVIEW_CLI_AUTH_ERROR",
            Self::SeedFailed => "PLACEREVIEW_CLI_SEED_FAILED",
            Self::BootFailed => "PLACEREVIEW_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Already initialized
    pub fn already_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("Database already exists at {}", path),
        )
    }

    /// Not initialized
    pub fn not_initialized(path: &str) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!(
                "No database at {}. Run 'placereview init' first.",
                path
            ),
        )
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::StoreError, e.to_string())
    }
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Store(store) => store.into(),
            other => {
                let message = match other.field_errors() {
                    Some(fields) => format!("{}: {:?}", other, fields),
                    None => other.to_string(),
                };
                Self::new(CliErrorCode::AuthError, message)
            }
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
