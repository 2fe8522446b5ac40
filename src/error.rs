//! Recoverable decoding errors.

use thiserror::Error;

/// A problem with one frame (or one run of bytes) in the response stream.
///
/// None of these abort a call: the session logs them and keeps decoding.
#[derive(Error, Debug)]
pub enum FrameError {
    /// A balanced `{...}` object that is not a valid frame
    #[error("malformed frame: {source}")]
    Malformed {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The offending object, lossily decoded
        raw: String,
    },

    /// Non-whitespace bytes found between frames
    #[error("stray data between frames ({} bytes)", raw.len())]
    StrayData {
        /// The dropped bytes, lossily decoded
        raw: String,
    },

    /// Incomplete frame left over when the source ended
    #[error("stream ended inside a frame ({} bytes buffered)", raw.len())]
    Truncated {
        /// The buffered tail, lossily decoded
        raw: String,
    },

    /// A frame grew past the configured limit before it closed
    #[error("frame exceeded {limit} bytes (buffered {len})")]
    Oversized {
        /// Bytes buffered when the frame was dropped
        len: usize,
        /// Configured `max_frame_bytes`
        limit: usize,
    },
}

impl FrameError {
    /// Short, stable label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::StrayData { .. } => "stray_data",
            Self::Truncated { .. } => "truncated",
            Self::Oversized { .. } => "oversized",
        }
    }
}
