//! Port for structured transcript telemetry.
//!
//! Defines the [`TranscriptLogger`] trait for recording conversation events
//! (appends, provider failures, stale discards) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures pipeline
//! events in a machine-readable format. In particular, a discarded stale
//! completion is not user-visible, so this log is the only place it can be
//! told apart from a surfaced provider error.

use serde_json::Value;

/// A structured transcript event for logging.
pub struct TranscriptEvent {
    /// Event type identifier (e.g., "user_message", "stale_discarded").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events to a structured log.
///
/// The `log` method is intentionally synchronous and non-fallible so that
/// logging can never disturb the pipeline; failures are silently ignored
/// by implementations.
pub trait TranscriptLogger: Send + Sync {
    /// Record a transcript event.
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn log(&self, _event: TranscriptEvent) {}
}
