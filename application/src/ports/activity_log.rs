//! Port for structured activity logging.
//!
//! Defines the [`ActivityLogger`] trait for recording domain events
//! (discussion created, comment deleted, motion closed, ...) to a structured
//! log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures what
//! happened to the data in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured activity event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter stamps the time.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    /// Event type identifier (e.g., "discussion_created", "vote_cast").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ActivityEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging activity events to a structured log.
///
/// The `log` method is synchronous and non-fallible: a failing log must not
/// fail the operation that produced the event.
pub trait ActivityLogger: Send + Sync {
    /// Record an activity event.
    fn log(&self, event: ActivityEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoActivityLogger;

impl ActivityLogger for NoActivityLogger {
    fn log(&self, _event: ActivityEvent) {}
}
