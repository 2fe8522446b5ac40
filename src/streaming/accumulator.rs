//! Streaming response accumulator.

use super::types::{AccumulatedResponse, CallStatus, StreamEvent};
use crate::Frame;
use serde_json::Value;

/// Message used when a failure frame carries no `error` field
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// Folds decoded frames into the running state of one call.
///
/// Text is append-only and keeps arrival order. The first terminal frame
/// (success or failure) closes the call; anything after it is ignored.
#[derive(Debug, Default)]
pub struct ResponseAggregator {
    text: String,
    data_modifications: Vec<Value>,
    status: CallStatus,
    error: Option<String>,
    frames: usize,
}

impl ResponseAggregator {
    /// Create an aggregator for a new call
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame in and return the event it produces.
    ///
    /// Returns `None` once the call is closed.
    pub fn process_frame(&mut self, frame: Frame) -> Option<StreamEvent> {
        if self.status.is_closed() {
            return None;
        }
        self.frames += 1;

        if !frame.result {
            let message = frame
                .error
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            self.status = CallStatus::Failed;
            self.error = Some(message.clone());
            return Some(StreamEvent::Failed { message });
        }

        let response = frame.response.unwrap_or_default();
        let text = response.text.unwrap_or_default();
        self.text.push_str(&text);
        self.data_modifications
            .extend(response.data_modifications.iter().cloned());

        if response.is_final {
            self.status = CallStatus::Completed;
        }

        Some(StreamEvent::Chunk {
            text,
            is_final: response.is_final,
            data_modifications: response.data_modifications,
        })
    }

    /// Close an open call because the source ran dry.
    ///
    /// Returns `None` if the call had already ended.
    pub fn mark_incomplete(&mut self) -> Option<StreamEvent> {
        if self.status.is_closed() {
            return None;
        }
        self.status = CallStatus::Incomplete;
        Some(StreamEvent::Incomplete)
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Data modifications accumulated so far
    pub fn data_modifications(&self) -> &[Value] {
        &self.data_modifications
    }

    /// Current call status
    pub fn status(&self) -> CallStatus {
        self.status
    }

    /// Whether the call has ended
    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Frames folded in so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Get the accumulated response
    pub fn finish(self) -> AccumulatedResponse {
        AccumulatedResponse {
            text: self.text,
            data_modifications: self.data_modifications,
            status: self.status,
            error: self.error,
            frames: self.frames,
        }
    }
}
