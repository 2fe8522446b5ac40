//! Streaming response consumption.
//!
//! This module folds decoded frames into per-call state and exposes the lazy
//! event sequence callers iterate over while a reply is still arriving.

mod accumulator;
mod consumer;
mod session;
mod types;

pub use accumulator::{ResponseAggregator, DEFAULT_FAILURE_MESSAGE};
pub use consumer::{
    process_streaming_response, process_streaming_response_with_config, ResponseStream,
};
pub use session::StreamSession;
pub use types::{AccumulatedResponse, CallStatus, StreamEvent};

#[cfg(feature = "streaming")]
pub use consumer::{
    accumulate_stream, accumulate_stream_with_config, process_stream, process_stream_with_config,
};
