//! CodVid.AI response stream decoder
//!
//! The tracker's chat endpoint answers with a live stream of JSON objects
//! ("frames") written back to back. Each frame carries a slice of the reply
//! text, an optional end-of-stream marker and any data modifications the
//! assistant made to the project. The transport re-chunks that stream at
//! arbitrary points, so frames rarely line up with the fragments a client
//! receives.
//!
//! This crate turns those fragments back into an ordered sequence of events:
//!
//! ```rust
//! use codvid_stream::process_streaming_response;
//!
//! let fragments = [
//!     r#"{"result":true,"response":{"text":"A"}}{"result":true,"#,
//!     r#""response":{"text":"B","is_final":true}}"#,
//! ];
//!
//! for event in process_streaming_response(fragments, "my-project") {
//!     let (text, is_final, data_modifications) = event.into_parts();
//!     print!("{text}");
//!     if is_final {
//!         println!();
//!     }
//!     assert!(data_modifications.is_empty());
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. [`FrameDecoder`] splits fragments into [`Frame`]s, skipping anything
//!    that does not parse.
//! 2. [`ResponseAggregator`] folds frames into the call's running state and
//!    emits one [`StreamEvent`] per frame.
//! 3. [`process_streaming_response`] (or [`process_stream`] for async sources)
//!    drives both lazily over a fragment source.
//!
//! The crate never opens connections; it is handed fragments from a response
//! body someone else already established.

use serde::{Deserialize, Deserializer, Serialize};

pub mod config;
pub mod decoder;
pub mod error;
pub mod events;
pub mod request;
pub mod streaming;

pub use config::StreamConfig;
pub use decoder::FrameDecoder;
pub use error::FrameError;
pub use events::{EventEnvelope, EventKind};
pub use request::{ChatMessage, ChatRequest, RequestEnvelope};
pub use streaming::{
    process_streaming_response, process_streaming_response_with_config, AccumulatedResponse,
    CallStatus, ResponseAggregator, ResponseStream, StreamEvent, StreamSession,
};

#[cfg(feature = "streaming")]
pub use streaming::{
    accumulate_stream, accumulate_stream_with_config, process_stream, process_stream_with_config,
};

// ============================================================================
// Wire Frame Types
// ============================================================================

/// One protocol message from the server
///
/// `result` is required; a frame without it does not decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Server-side success of this frame
    pub result: bool,
    /// Payload of a successful frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<FrameResponse>,
    /// Failure message when `result` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Frame {
    /// Create a successful, non-final text frame
    pub fn chunk(text: impl Into<String>) -> Self {
        Self {
            result: true,
            response: Some(FrameResponse {
                text: Some(text.into()),
                ..FrameResponse::default()
            }),
            error: None,
        }
    }

    /// Create a successful frame that ends the stream
    pub fn final_chunk(text: impl Into<String>) -> Self {
        Self {
            result: true,
            response: Some(FrameResponse {
                text: Some(text.into()),
                is_final: true,
                ..FrameResponse::default()
            }),
            error: None,
        }
    }

    /// Create a failure frame
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            result: false,
            response: None,
            error: Some(error.into()),
        }
    }

    /// Attach data modifications to this frame
    pub fn with_data_modifications(mut self, data_modifications: Vec<serde_json::Value>) -> Self {
        self.response
            .get_or_insert_with(FrameResponse::default)
            .data_modifications = data_modifications;
        self
    }

    /// Text delta, empty if absent
    pub fn text(&self) -> &str {
        self.response
            .as_ref()
            .and_then(|r| r.text.as_deref())
            .unwrap_or_default()
    }

    /// Whether this frame carries the terminal marker
    pub fn is_final(&self) -> bool {
        self.response.as_ref().is_some_and(|r| r.is_final)
    }

    /// Data modifications, empty if absent
    pub fn data_modifications(&self) -> &[serde_json::Value] {
        self.response
            .as_ref()
            .map(|r| r.data_modifications.as_slice())
            .unwrap_or_default()
    }
}

/// The `response` object of a successful frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameResponse {
    /// Incremental text to append to the reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// End-of-stream marker (`final` is accepted as well)
    #[serde(
        default,
        alias = "final",
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_final: bool,
    /// Opaque instructions owned by the server, passed through untouched
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_modifications: Vec<serde_json::Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============================================================================
// Tests
// ============================================================================
