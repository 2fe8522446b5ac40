//! Type definitions for streaming responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One outward event per processed frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Successful frame: this frame's text delta and payload only
    Chunk {
        /// Text carried by this frame (not the running total)
        text: String,
        /// Whether this frame ended the call
        is_final: bool,
        /// Opaque instructions carried by this frame
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        data_modifications: Vec<Value>,
    },
    /// The server reported failure; the call is over
    Failed {
        /// Message from the frame's `error` field
        message: String,
    },
    /// The source ended before any terminal frame arrived
    Incomplete,
}

impl StreamEvent {
    /// Build a chunk event
    pub fn chunk(text: impl Into<String>, is_final: bool, data_modifications: Vec<Value>) -> Self {
        Self::Chunk {
            text: text.into(),
            is_final,
            data_modifications,
        }
    }

    /// Text delta (empty for failure and incomplete events)
    pub fn text(&self) -> &str {
        match self {
            Self::Chunk { text, .. } => text,
            _ => "",
        }
    }

    /// Whether nothing follows this event in its call
    pub fn is_final(&self) -> bool {
        match self {
            Self::Chunk { is_final, .. } => *is_final,
            Self::Failed { .. } | Self::Incomplete => true,
        }
    }

    /// Whether the call did not end with a terminal success frame
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Incomplete)
    }

    /// Get the failure message of a `Failed` event
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Data modifications carried by this event
    pub fn data_modifications(&self) -> &[Value] {
        match self {
            Self::Chunk {
                data_modifications, ..
            } => data_modifications.as_slice(),
            _ => &[],
        }
    }

    /// Split into the `(text_delta, is_final, data_modifications)` triple
    pub fn into_parts(self) -> (String, bool, Vec<Value>) {
        match self {
            Self::Chunk {
                text,
                is_final,
                data_modifications,
            } => (text, is_final, data_modifications),
            Self::Failed { .. } | Self::Incomplete => (String::new(), true, Vec::new()),
        }
    }
}

/// Lifecycle of one streaming call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    /// Still accepting frames
    #[default]
    Open,
    /// A terminal frame arrived
    Completed,
    /// A `result: false` frame arrived
    Failed,
    /// The source ran dry without a terminal frame
    Incomplete,
}

impl CallStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Incomplete => "incomplete",
        }
    }

    /// Whether no further frames will be accepted
    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Accumulated response from streaming
#[derive(Debug, Clone)]
pub struct AccumulatedResponse {
    /// Every text delta, concatenated in arrival order
    pub text: String,
    /// Every data modification, in arrival order
    pub data_modifications: Vec<Value>,
    /// How the call ended
    pub status: CallStatus,
    /// Failure message when `status` is `Failed`
    pub error: Option<String>,
    /// Number of frames folded in, including a failure frame
    pub frames: usize,
}

impl AccumulatedResponse {
    /// Whether the call ended with a terminal success frame
    pub fn is_complete(&self) -> bool {
        self.status == CallStatus::Completed
    }
}
