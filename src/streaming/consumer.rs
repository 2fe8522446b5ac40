//! Pull-based consumption of a fragment source.

use super::session::StreamSession;
use super::types::{AccumulatedResponse, StreamEvent};
use crate::config::StreamConfig;
use crate::events::EventEnvelope;
use std::collections::VecDeque;
use std::iter::FusedIterator;

/// Decode a fragment source lazily, one event per frame.
///
/// Fragments are pulled one at a time, and only when every event from the
/// previous fragment has been handed out. The sequence ends after the first
/// terminal event: a final chunk, a failure, or a synthesized
/// [`StreamEvent::Incomplete`] when the source runs dry first.
///
/// ```rust
/// use codvid_stream::{process_streaming_response, StreamEvent};
///
/// let fragments = [
///     r#"{"result": true, "respon"#,
///     r#"se": {"text": "Hi"}}"#,
///     r#"{"result": true, "response": {"text": "!", "is_final": true}}"#,
/// ];
///
/// let events: Vec<_> = process_streaming_response(fragments, "project-1")
///     .map(StreamEvent::into_parts)
///     .collect();
///
/// assert_eq!(events, vec![
///     ("Hi".to_string(), false, vec![]),
///     ("!".to_string(), true, vec![]),
/// ]);
/// ```
pub fn process_streaming_response<S>(
    source: S,
    context: impl Into<String>,
) -> ResponseStream<S::IntoIter>
where
    S: IntoIterator,
    S::Item: AsRef<[u8]>,
{
    process_streaming_response_with_config(source, context, StreamConfig::default())
}

/// [`process_streaming_response`] with explicit decoder limits
pub fn process_streaming_response_with_config<S>(
    source: S,
    context: impl Into<String>,
    config: StreamConfig,
) -> ResponseStream<S::IntoIter>
where
    S: IntoIterator,
    S::Item: AsRef<[u8]>,
{
    ResponseStream {
        source: Some(source.into_iter()),
        session: StreamSession::with_config(context, config),
        pending: VecDeque::new(),
    }
}

/// Lazy event sequence for one streaming call.
///
/// Not restartable. Dropping it early drops the buffered input with it.
#[derive(Debug)]
pub struct ResponseStream<I> {
    source: Option<I>,
    session: StreamSession,
    pending: VecDeque<StreamEvent>,
}

impl<I> ResponseStream<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    /// Caller-supplied context tag
    pub fn context(&self) -> &str {
        self.session.context()
    }

    /// Underlying session, for inspecting the running state
    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    /// Run the call to the end and return the accumulated response
    pub fn into_response(mut self) -> AccumulatedResponse {
        self.by_ref().for_each(drop);
        self.session.into_response()
    }

    /// Wrap every event in an [`EventEnvelope`] tagged with this call's context
    pub fn enveloped(self) -> impl Iterator<Item = EventEnvelope> {
        let context = self.context().to_string();
        self.zip(1u32..)
            .map(move |(event, sequence)| EventEnvelope::new(context.clone(), sequence, event))
    }
}

impl<I> Iterator for ResponseStream<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let source = self.source.as_mut()?;
            match source.next() {
                Some(fragment) => {
                    self.pending.extend(self.session.feed(fragment));
                    if self.session.is_closed() {
                        self.source = None;
                    }
                }
                None => {
                    self.source = None;
                    return self.session.end();
                }
            }
        }
    }
}

impl<I> FusedIterator for ResponseStream<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
}

// ============================================================================
// Async sources
// ============================================================================

/// Decode an async fragment stream.
///
/// Same contract as [`process_streaming_response`]. A transport error from the
/// source is forwarded once and ends the sequence.
#[cfg(feature = "streaming")]
pub fn process_stream<S, F, E>(
    source: S,
    context: impl Into<String>,
) -> impl futures_util::Stream<Item = Result<StreamEvent, E>>
where
    S: futures_util::Stream<Item = Result<F, E>>,
    F: AsRef<[u8]>,
{
    process_stream_with_config(source, context, StreamConfig::default())
}

/// [`process_stream`] with explicit decoder limits
#[cfg(feature = "streaming")]
pub fn process_stream_with_config<S, F, E>(
    source: S,
    context: impl Into<String>,
    config: StreamConfig,
) -> impl futures_util::Stream<Item = Result<StreamEvent, E>>
where
    S: futures_util::Stream<Item = Result<F, E>>,
    F: AsRef<[u8]>,
{
    use futures_util::StreamExt;

    let mut session = StreamSession::with_config(context, config);

    async_stream::try_stream! {
        futures_util::pin_mut!(source);

        while let Some(fragment) = source.next().await {
            let fragment = fragment?;
            for event in session.feed(fragment) {
                yield event;
            }
            if session.is_closed() {
                break;
            }
        }

        if let Some(event) = session.end() {
            yield event;
        }
    }
}

/// Accumulate an entire async fragment stream into a response
///
/// This is a convenience method that processes all fragments from a stream
/// and returns the final accumulated response.
#[cfg(feature = "streaming")]
pub async fn accumulate_stream<S, F, E>(
    source: S,
    context: impl Into<String>,
) -> Result<AccumulatedResponse, E>
where
    S: futures_util::Stream<Item = Result<F, E>>,
    F: AsRef<[u8]>,
{
    accumulate_stream_with_config(source, context, StreamConfig::default()).await
}

/// [`accumulate_stream`] with explicit decoder limits
#[cfg(feature = "streaming")]
pub async fn accumulate_stream_with_config<S, F, E>(
    source: S,
    context: impl Into<String>,
    config: StreamConfig,
) -> Result<AccumulatedResponse, E>
where
    S: futures_util::Stream<Item = Result<F, E>>,
    F: AsRef<[u8]>,
{
    use futures_util::StreamExt;

    let mut session = StreamSession::with_config(context, config);
    futures_util::pin_mut!(source);

    while let Some(fragment) = source.next().await {
        session.feed(fragment?);
        if session.is_closed() {
            break;
        }
    }
    session.end();

    Ok(session.into_response())
}
