use codvid_stream::{process_streaming_response, CallStatus, StreamEvent};
use serde_json::{json, Value};

fn triples<S>(fragments: S) -> Vec<(String, bool, Vec<Value>)>
where
    S: IntoIterator,
    S::Item: AsRef<[u8]>,
{
    process_streaming_response(fragments, "scenario")
        .map(StreamEvent::into_parts)
        .collect()
}

fn chunk(text: &str, is_final: bool) -> (String, bool, Vec<Value>) {
    (text.to_string(), is_final, Vec::new())
}

/// Five frames, including nested payloads, escaped quotes and braces in text
fn fixture() -> String {
    [
        json!({"result": true, "response": {"text": "Your "}}),
        json!({"result": true, "response": {"text": "reel {stats} \"are\" in"}}),
        json!({"result": true, "response": {"text": ": ", "data_modifications": [
            {"action": "update_task", "task": {"id": "t1", "interval": {"days": 2}}}
        ]}}),
        json!({"result": true, "response": {"text": "views ↑ 12% 🎉"}}),
        json!({"result": true, "response": {"text": ".", "is_final": true}}),
    ]
    .iter()
    .map(Value::to_string)
    .collect::<Vec<_>>()
    .join("\n")
}

#[test]
fn test_split_invariance() {
    let body = fixture();
    let bytes = body.as_bytes();
    let reference = triples([bytes]);

    assert_eq!(reference.len(), 5);

    // Every single split point
    for split in 0..=bytes.len() {
        assert_eq!(
            triples([&bytes[..split], &bytes[split..]]),
            reference,
            "split at {split}"
        );
    }

    // One byte per fragment
    assert_eq!(triples(bytes.chunks(1)), reference);

    // Assorted fixed chunk sizes
    for size in [2, 3, 7, 13, 64] {
        assert_eq!(triples(bytes.chunks(size)), reference, "chunk size {size}");
    }
}

#[test]
fn test_text_concatenation() {
    let text: String = triples(fixture().as_bytes().chunks(5))
        .into_iter()
        .map(|(text, _, _)| text)
        .collect();

    assert_eq!(text, "Your reel {stats} \"are\" in: views ↑ 12% 🎉.");
}

#[test]
fn test_exactly_one_final_and_nothing_after() {
    let mut body = fixture();
    body.push_str(r#"{"result": true, "response": {"text": "late"}}"#);

    let events = triples([body.as_str()]);
    let finals: Vec<_> = events.iter().filter(|(_, is_final, _)| *is_final).collect();

    assert_eq!(finals.len(), 1);
    assert!(events.last().unwrap().1);
    assert!(events.iter().all(|(text, _, _)| text != "late"));
}

#[test]
fn test_failure_ends_call() {
    let fragments = [
        r#"{"result": true, "response": {"text": "Working"}}"#,
        r#"{"result": false, "error": "rate limited"}"#,
        r#"{"result": true, "response": {"text": "ignored", "is_final": true}}"#,
    ];

    let events: Vec<_> = process_streaming_response(fragments, "scenario").collect();

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].error_message(), Some("rate limited"));
}

#[test]
fn test_malformed_frame_between_valid_frames() {
    let fragments = [
        r#"{"result": true, "response": {"text": "A"}}"#,
        r#"{"result": true, "response": {"text": "bro"#,
        r#"ken",}}{"result": true, "response": {"text": "B", "is_final": true}}"#,
    ];
    // Balanced but invalid: trailing comma in the second object

    assert_eq!(triples(fragments), vec![chunk("A", false), chunk("B", true)]);
}

#[test]
fn test_invalid_json_between_valid_frames() {
    let fragments = [concat!(
        r#"{"result": true, "response": {"text": "A"}}"#,
        r#"{"result": yes, "response": {"text": "nope"}}"#,
        r#"{"result": true, "response": {"text": "B", "is_final": true}}"#,
    )];

    assert_eq!(triples(fragments), vec![chunk("A", false), chunk("B", true)]);
}

#[test]
fn test_scenario_split_frame() {
    let fragments = [
        r#"{"result": true, "respon"#,
        r#"se": {"text": "Hi"}}"#,
        r#"{"result": true, "response": {"text": "!", "is_final": true}}"#,
    ];

    assert_eq!(triples(fragments), vec![chunk("Hi", false), chunk("!", true)]);
}

#[test]
fn test_scenario_failure_only() {
    let events: Vec<_> =
        process_streaming_response([r#"{"result": false, "error": "bad input"}"#], "scenario")
            .collect();

    assert_eq!(
        events,
        vec![StreamEvent::Failed {
            message: "bad input".to_string()
        }]
    );
}

#[test]
fn test_scenario_two_frames_one_fragment() {
    let fragments = [concat!(
        r#"{"result":true,"response":{"text":"A"}}"#,
        r#"{"result":true,"response":{"text":"B","is_final":true}}"#,
    )];

    assert_eq!(triples(fragments), vec![chunk("A", false), chunk("B", true)]);
}

#[test]
fn test_scenario_source_ends_early() {
    let events: Vec<_> = process_streaming_response(
        [r#"{"result": true, "response": {"text": "Half an answ"}}"#],
        "scenario",
    )
    .collect();

    assert_eq!(
        events,
        vec![
            StreamEvent::chunk("Half an answ", false, vec![]),
            StreamEvent::Incomplete,
        ]
    );
}

#[test]
fn test_source_ends_mid_frame() {
    let stream = process_streaming_response(
        [
            r#"{"result": true, "response": {"text": "A"}}"#,
            r#"{"result": true, "response": {"te"#,
        ],
        "scenario",
    );

    let response = stream.into_response();
    assert_eq!(response.text, "A");
    assert_eq!(response.status, CallStatus::Incomplete);
}

#[test]
fn test_data_modifications_reach_caller() {
    let fragments = [json!({
        "result": true,
        "response": {
            "text": "Tracking started.",
            "is_final": true,
            "data_modifications": [
                {"action": "create_reel_task", "task_id": "abc123"}
            ]
        }
    })
    .to_string()];

    let events = triples(fragments);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].2[0]["task_id"], "abc123");
}
