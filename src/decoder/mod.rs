//! Frame decoding for the chunked-JSON response stream.
//!
//! The server writes one JSON object per protocol message, back to back, with
//! no length prefix and at most some whitespace in between. The transport
//! re-chunks that byte stream arbitrarily, so a single fragment may hold half a
//! frame, several frames, or the tail of one and the head of the next.
//!
//! [`FrameDecoder`] keeps the undecoded tail between calls and hands back every
//! frame that became complete, in arrival order.
//!
//! ```rust
//! use codvid_stream::FrameDecoder;
//!
//! let mut decoder = FrameDecoder::new();
//! assert!(decoder.push(r#"{"result": true, "respon"#).is_empty());
//!
//! let frames = decoder.push(r#"se": {"text": "Hi"}}"#);
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].as_ref().unwrap().text(), "Hi");
//! ```

mod scanner;

use crate::config::StreamConfig;
use crate::error::FrameError;
use crate::Frame;
use scanner::{Scanner, Span};

/// Splits a fragment stream into [`Frame`]s.
///
/// One decoder serves exactly one streaming call.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    scanner: Scanner,
    config: StreamConfig,
}

impl FrameDecoder {
    /// Create a decoder with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with explicit limits
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Append one fragment and return every frame it completed.
    ///
    /// Each entry is either a decoded frame or the reason a region of input was
    /// dropped. A bad entry never affects the ones around it.
    pub fn push(&mut self, fragment: impl AsRef<[u8]>) -> Vec<Result<Frame, FrameError>> {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            return Vec::new();
        }

        self.buffer.extend_from_slice(fragment);

        let mut decoded: Vec<Result<Frame, FrameError>> = self
            .scanner
            .scan(&self.buffer)
            .into_iter()
            .map(|span| match span {
                Span::Frame(range) => parse_frame(&self.buffer[range]),
                Span::Stray(range) => Err(FrameError::StrayData {
                    raw: lossy(&self.buffer[range]).trim().to_string(),
                }),
            })
            .collect();

        let consumed = self.scanner.pending_start().unwrap_or(self.buffer.len());
        self.buffer.drain(..consumed);
        self.scanner.rebase(consumed);

        if self.buffer.len() > self.config.max_frame_bytes {
            decoded.push(Err(FrameError::Oversized {
                len: self.buffer.len(),
                limit: self.config.max_frame_bytes,
            }));
            self.buffer.clear();
            self.scanner.discard_pending();
        }

        decoded
    }

    /// Close the input side.
    ///
    /// Returns the unfinished frame, if one was still being assembled.
    pub fn finish(&mut self) -> Option<FrameError> {
        if self.buffer.is_empty() {
            self.scanner.reset();
            return None;
        }

        let raw = lossy(&self.buffer).into_owned();
        self.clear();
        Some(FrameError::Truncated { raw })
    }

    /// Drop any buffered input
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.scanner.reset();
    }

    /// Number of bytes waiting for the rest of their frame
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

fn parse_frame(bytes: &[u8]) -> Result<Frame, FrameError> {
    serde_json::from_slice(bytes).map_err(|source| FrameError::Malformed {
        source,
        raw: lossy(bytes).into_owned(),
    })
}

fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
