//! Event envelopes for telemetry
//!
//! Callers that keep a record of streaming calls wrap each [`StreamEvent`] in
//! an [`EventEnvelope`]: a unique id, the caller's context tag, a timestamp and
//! the event's position within its call.
//!
//! ## Usage
//!
//! ```rust
//! use codvid_stream::events::{EventEnvelope, EventKind};
//! use codvid_stream::StreamEvent;
//!
//! let envelope = EventEnvelope::new("project_123", 1, StreamEvent::chunk("Hi", false, vec![]));
//! assert_eq!(envelope.event_kind, EventKind::Chunk);
//!
//! let json_line = envelope.to_json_line().unwrap();
//! ```
//!
//! [`StreamEvent`]: crate::StreamEvent

mod envelope;
mod kind;

pub use envelope::EventEnvelope;
pub use kind::EventKind;

#[cfg(test)]
mod tests;
