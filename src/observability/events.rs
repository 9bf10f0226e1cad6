//! Observable events.
//!
//! Events are explicit and typed; their string form is the `event` field of
//! the log line.

use std::fmt;

/// Observable events in the review service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Database opened and schema applied
    DatabaseReady,
    /// HTTP listener bound
    ServerListening,
    /// HTTP server stopped
    ServerStopped,
    /// Startup could not complete (FATAL)
    BootFailed,

    // Accounts
    /// New account registered
    UserRegistered,
    /// Successful login
    UserLoggedIn,
    /// Staff account created from the CLI
    AdminCreated,
    /// Account activated or deactivated
    UserActivationChanged,

    // Reviews
    /// Place created by an incoming review
    PlaceCreated,
    /// Review stored
    ReviewCreated,
    /// Review refused by a uniqueness rule
    ReviewConflict,

    // Tooling
    /// Sample data written
    SeedComplete,

    // Requests
    /// One HTTP request served
    HttpRequest,
    /// Request failed with a server error
    RequestFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatabaseReady => "DATABASE_READY",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ServerStopped => "SERVER_STOPPED",
            Event::BootFailed => "BOOT_FAILED",
            Event::UserRegistered => "USER_REGISTERED",
            Event::UserLoggedIn => "USER_LOGGED_IN",
            Event::AdminCreated => "ADMIN_CREATED",
            Event::UserActivationChanged => "USER_ACTIVATION_CHANGED",
            Event::PlaceCreated => "PLACE_CREATED",
            Event::ReviewCreated => "REVIEW_CREATED",
            Event::ReviewConflict => "REVIEW_CONFLICT",
            Event::SeedComplete => "SEED_COMPLETE",
            Event::HttpRequest => "HTTP_REQUEST",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if this event is fatal
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }

    /// Returns true if this event reports a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Event::BootFailed | Event::RequestFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
