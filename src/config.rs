//! Decoder limits.

use serde::{Deserialize, Serialize};

/// Default ceiling for a single frame still being assembled (1 MiB)
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Tunables for one streaming call.
///
/// Every field has a default, so hosts can embed this in their own config
/// files and only spell out what they change:
///
/// ```rust
/// use codvid_stream::StreamConfig;
///
/// let config: StreamConfig = serde_json::from_str(r#"{"max_frame_bytes": 4096}"#).unwrap();
/// assert_eq!(config.max_frame_bytes, 4096);
///
/// let config: StreamConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config, StreamConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Largest unfinished frame the decoder will buffer before dropping it
    pub max_frame_bytes: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl StreamConfig {
    /// Override the frame size ceiling
    pub fn with_max_frame_bytes(mut self, max_frame_bytes: usize) -> Self {
        self.max_frame_bytes = max_frame_bytes;
        self
    }
}
