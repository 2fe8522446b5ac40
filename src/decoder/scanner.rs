//! Incremental brace scanner.
//!
//! Works on raw bytes. The only bytes it reacts to (`{`, `}`, `"`, `\`) are
//! ASCII, which never occur inside a multi-byte UTF-8 sequence, so every span
//! boundary it reports is also a character boundary.

use std::ops::Range;

/// A completed region of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Span {
    /// A balanced top-level `{...}` object
    Frame(Range<usize>),
    /// Non-whitespace bytes outside of any object
    Stray(Range<usize>),
}

/// Scan state carried between pushes.
///
/// Only the bytes appended since the last call are examined.
#[derive(Debug, Default)]
pub(crate) struct Scanner {
    depth: usize,
    in_string: bool,
    escaped: bool,
    frame_start: Option<usize>,
    stray_start: Option<usize>,
    scanned: usize,
}

impl Scanner {
    /// Scan `buf[self.scanned..]` and return every span completed by it.
    pub(crate) fn scan(&mut self, buf: &[u8]) -> Vec<Span> {
        let mut spans = Vec::new();

        for (i, &byte) in buf.iter().enumerate().skip(self.scanned) {
            if self.depth == 0 {
                match byte {
                    b'{' => {
                        if let Some(start) = self.stray_start.take() {
                            spans.push(Span::Stray(start..i));
                        }
                        self.frame_start = Some(i);
                        self.depth = 1;
                    }
                    b if b.is_ascii_whitespace() => {}
                    _ => {
                        self.stray_start.get_or_insert(i);
                    }
                }
            } else if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
            } else {
                match byte {
                    b'"' => self.in_string = true,
                    b'{' => self.depth += 1,
                    b'}' => {
                        self.depth -= 1;
                        // No start means the frame was discarded
                        if self.depth == 0 {
                            if let Some(start) = self.frame_start.take() {
                                spans.push(Span::Frame(start..i + 1));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        // Stray runs never wait for more input
        if let Some(start) = self.stray_start.take() {
            spans.push(Span::Stray(start..buf.len()));
        }

        self.scanned = buf.len();
        spans
    }

    /// Offset of the frame still being assembled, if any
    pub(crate) fn pending_start(&self) -> Option<usize> {
        self.frame_start
    }

    /// Shift all offsets after `consumed` bytes were drained from the front.
    pub(crate) fn rebase(&mut self, consumed: usize) {
        self.scanned -= consumed;
        if let Some(start) = self.frame_start.as_mut() {
            *start -= consumed;
        }
    }

    /// Abandon the frame being assembled while keeping its nesting state.
    ///
    /// The rest of that frame is skipped until depth returns to zero. The
    /// caller must empty its buffer.
    pub(crate) fn discard_pending(&mut self) {
        self.frame_start = None;
        self.scanned = 0;
    }

    /// Forget everything, including any half-read frame.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
