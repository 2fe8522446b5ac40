//! Per-call decoding session.

use super::accumulator::ResponseAggregator;
use super::types::{AccumulatedResponse, StreamEvent};
use crate::config::StreamConfig;
use crate::decoder::FrameDecoder;
use crate::error::FrameError;

/// Everything one streaming call owns: its decoder buffer, its aggregate state
/// and the caller's context tag.
///
/// Sessions share nothing, so any number of calls can run side by side.
#[derive(Debug)]
pub struct StreamSession {
    context: String,
    decoder: FrameDecoder,
    aggregator: ResponseAggregator,
    dropped: usize,
}

impl StreamSession {
    /// Open a session for the call tagged `context`
    pub fn new(context: impl Into<String>) -> Self {
        Self::with_config(context, StreamConfig::default())
    }

    /// Open a session with explicit decoder limits
    pub fn with_config(context: impl Into<String>, config: StreamConfig) -> Self {
        let context = context.into();
        tracing::debug!(context = %context, "stream session opened");
        Self {
            context,
            decoder: FrameDecoder::with_config(config),
            aggregator: ResponseAggregator::new(),
            dropped: 0,
        }
    }

    /// Caller-supplied context tag, never interpreted
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Whether the call has ended
    pub fn is_closed(&self) -> bool {
        self.aggregator.is_closed()
    }

    /// Decode one fragment and return the events it produced, in order.
    ///
    /// Once a terminal event is produced the session closes: frames behind it
    /// in the same fragment are discarded, as is everything fed afterwards.
    pub fn feed(&mut self, fragment: impl AsRef<[u8]>) -> Vec<StreamEvent> {
        if self.is_closed() {
            tracing::trace!(
                context = %self.context,
                bytes = fragment.as_ref().len(),
                "ignoring fragment after call closed"
            );
            return Vec::new();
        }

        let mut events = Vec::new();
        for decoded in self.decoder.push(fragment) {
            match decoded {
                Ok(frame) => {
                    let Some(event) = self.aggregator.process_frame(frame) else {
                        break;
                    };
                    tracing::trace!(
                        context = %self.context,
                        frame = self.aggregator.frames(),
                        bytes = event.text().len(),
                        "frame decoded"
                    );
                    let closing = event.is_final();
                    events.push(event);
                    if closing {
                        self.close();
                        break;
                    }
                }
                Err(error) => self.report(&error),
            }
        }
        events
    }

    /// Signal that the source has ended.
    ///
    /// Returns the synthesized `Incomplete` event if no terminal frame was seen.
    pub fn end(&mut self) -> Option<StreamEvent> {
        if let Some(error) = self.decoder.finish() {
            self.report(&error);
        }

        let event = self.aggregator.mark_incomplete();
        if event.is_some() {
            tracing::debug!(
                context = %self.context,
                frames = self.aggregator.frames(),
                "source ended before a terminal frame"
            );
        }
        event
    }

    /// Frames and byte runs dropped as undecodable
    pub fn dropped_frames(&self) -> usize {
        self.dropped
    }

    /// Running aggregate state
    pub fn aggregator(&self) -> &ResponseAggregator {
        &self.aggregator
    }

    /// Consume the session and return what was accumulated
    pub fn into_response(self) -> AccumulatedResponse {
        self.aggregator.finish()
    }

    fn close(&mut self) {
        self.decoder.clear();
        tracing::debug!(
            context = %self.context,
            status = %self.aggregator.status(),
            frames = self.aggregator.frames(),
            "stream call closed"
        );
    }

    fn report(&mut self, error: &FrameError) {
        self.dropped += 1;
        tracing::warn!(
            context = %self.context,
            kind = error.kind(),
            error = %error,
            "dropping undecodable stream data"
        );
    }
}
