//! Observability for the review service
//!
//! - Structured logging (one JSON object per line)
//! - Typed lifecycle and domain events
//!
//! # Usage
//!
//! ```ignore
//! use placereview::observability::{log_event_with_fields, Event, Logger};
//!
//! log_event_with_fields(Event::ReviewCreated, &[("place_id", "42")]);
//! Logger::warn("SLOW_QUERY", &[("ms", "250")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_error() {
        Severity::Error
    } else {
        Severity::Info
    }
}

/// Log an event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}
