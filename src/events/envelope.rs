//! Event envelope for telemetry records

use super::kind::EventKind;
use crate::streaming::StreamEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Event envelope for storage and serialization
///
/// Tags a [`StreamEvent`] with the call it belongs to and its position in that
/// call, suitable for JSONL storage where each line is a single envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID (`evt_` followed by a ULID)
    pub event_id: String,

    /// Event kind discriminator
    pub event_kind: EventKind,

    /// Caller's context tag for the call
    pub context_id: String,

    /// When the envelope was created
    pub timestamp: DateTime<Utc>,

    /// 1-based position within the call
    pub sequence: u32,

    /// The wrapped event
    pub event: StreamEvent,
}

impl EventEnvelope {
    /// Wrap an event
    pub fn new(context_id: impl Into<String>, sequence: u32, event: StreamEvent) -> Self {
        Self {
            event_id: format!("evt_{}", Ulid::new()),
            event_kind: EventKind::from(&event),
            context_id: context_id.into(),
            timestamp: Utc::now(),
            sequence,
            event,
        }
    }

    /// Serialize to JSON string (for JSONL storage)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (for JSONL reading)
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
