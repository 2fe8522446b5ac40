//! Tests for the events module

use super::*;
use crate::StreamEvent;
use serde_json::json;

#[test]
fn test_envelope_new() {
    let envelope = EventEnvelope::new("project_1", 3, StreamEvent::chunk("Hello", false, vec![]));

    assert!(envelope.event_id.starts_with("evt_"));
    assert_eq!(envelope.event_id.len(), 4 + 26);
    assert_eq!(envelope.context_id, "project_1");
    assert_eq!(envelope.sequence, 3);
    assert_eq!(envelope.event_kind, EventKind::Chunk);
    assert_eq!(envelope.event.text(), "Hello");
}

#[test]
fn test_envelope_ids_are_unique() {
    let a = EventEnvelope::new("p", 1, StreamEvent::Incomplete);
    let b = EventEnvelope::new("p", 1, StreamEvent::Incomplete);
    assert_ne!(a.event_id, b.event_id);
}

#[test]
fn test_kind_from_event() {
    let failed = StreamEvent::Failed {
        message: "bad input".to_string(),
    };

    assert_eq!(EventKind::from(&failed), EventKind::Failed);
    assert_eq!(EventKind::from(&StreamEvent::Incomplete), EventKind::Incomplete);
    assert_eq!(EventKind::Failed.to_string(), "failed");
}

#[test]
fn test_json_line_shape() {
    let envelope = EventEnvelope::new(
        "project_1",
        1,
        StreamEvent::chunk("Hi", true, vec![json!({"op": "add_task"})]),
    );
    let line = envelope.to_json_line().unwrap();

    assert!(!line.contains('\n'));

    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["event_kind"], "chunk");
    assert_eq!(value["context_id"], "project_1");
    assert_eq!(value["event"]["type"], "chunk");
    assert_eq!(value["event"]["data_modifications"][0]["op"], "add_task");
}

#[test]
fn test_json_line_roundtrip() {
    let envelope = EventEnvelope::new(
        "project_1",
        2,
        StreamEvent::Failed {
            message: "bad input".to_string(),
        },
    );

    let parsed = EventEnvelope::from_json_line(&envelope.to_json_line().unwrap()).unwrap();
    assert_eq!(parsed, envelope);
    assert_eq!(parsed.event.error_message(), Some("bad input"));
}
