//! Event kind discriminator

use crate::streaming::StreamEvent;
use serde::{Deserialize, Serialize};

/// Event kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A text delta (possibly the final one)
    Chunk,
    /// A server-reported failure
    Failed,
    /// A call cut short by its source
    Incomplete,
}

impl EventKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chunk => "chunk",
            Self::Failed => "failed",
            Self::Incomplete => "incomplete",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&StreamEvent> for EventKind {
    fn from(event: &StreamEvent) -> Self {
        match event {
            StreamEvent::Chunk { .. } => Self::Chunk,
            StreamEvent::Failed { .. } => Self::Failed,
            StreamEvent::Incomplete => Self::Incomplete,
        }
    }
}
