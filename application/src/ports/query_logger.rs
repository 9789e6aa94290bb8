//! Structured query log port.
//!
//! Queries and their outcomes are recorded as structured events; the JSONL
//! adapter in the infrastructure layer appends them to a file when
//! configured.

use serde_json::Value;

/// One loggable event with a JSON payload.
#[derive(Debug, Clone)]
pub struct QueryEvent {
    pub event_type: String,
    pub payload: Value,
}

impl QueryEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Sink for query events.
pub trait QueryLogger: Send + Sync {
    fn log(&self, event: QueryEvent);
}

/// Default sink that drops everything.
pub struct NoQueryLogger;

impl QueryLogger for NoQueryLogger {
    fn log(&self, _event: QueryEvent) {}
}
