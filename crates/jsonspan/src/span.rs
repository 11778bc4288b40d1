use core::ops::Range;

use bstr::ByteSlice;

use crate::{Cursor, TrackerError};

/// A half-open `[from, to)` range of character offsets into the source text.
///
/// `to` is the offset immediately after the last character of the span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    #[must_use]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Number of characters covered; zero if `to` precedes `from`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Converts the character offsets into a byte range over `text`.
    ///
    /// Returns `None` if the span reaches past the end of `text`.
    #[must_use]
    pub fn byte_range(&self, text: &str) -> Option<Range<usize>> {
        let mut start = None;
        let mut count = 0;
        for (index, (byte, _, _)) in text.as_bytes().char_indices().enumerate() {
            if index == self.from {
                start = Some(byte);
            }
            if index == self.to {
                return Some(start?..byte);
            }
            count = index + 1;
        }
        let start = start.or((self.from == count).then_some(text.len()))?;
        (self.to == count).then_some(start..text.len())
    }

    /// Borrows the spanned text out of `text`.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.byte_range(text).map(|range| &text[range])
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.from..span.to
    }
}

/// A span together with the verbatim text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'src> {
    pub span: Span,
    /// Undecoded source text; escape sequences are left as written.
    pub text: &'src str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerState {
    Idle,
    Started { from: usize },
    Finished,
}

/// One-shot recorder for the start and end offsets of a single parse unit.
///
/// Moves `Idle → Started → Finished`; each unit gets its own tracker.
#[derive(Debug)]
pub struct SpanTracker {
    state: TrackerState,
}

impl Default for SpanTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TrackerState::Idle,
        }
    }

    /// Records the cursor position as the start of the unit.
    ///
    /// # Errors
    ///
    /// Fails if the tracker was already started or finished.
    pub fn start(&mut self, cursor: &Cursor<'_>) -> Result<(), TrackerError> {
        match self.state {
            TrackerState::Idle => {
                self.state = TrackerState::Started {
                    from: cursor.position(),
                };
                Ok(())
            }
            TrackerState::Started { .. } => Err(TrackerError::AlreadyStarted),
            TrackerState::Finished => Err(TrackerError::AlreadyFinished),
        }
    }

    /// Records the cursor position as the end of the unit and returns the
    /// covered text.
    ///
    /// # Errors
    ///
    /// Fails if the tracker was never started or was already finished.
    pub fn finish<'src>(&mut self, cursor: &Cursor<'src>) -> Result<Spanned<'src>, TrackerError> {
        match self.state {
            TrackerState::Started { from } => {
                self.state = TrackerState::Finished;
                let to = cursor.position();
                Ok(Spanned {
                    span: Span::new(from, to),
                    text: cursor.slice(from, to),
                })
            }
            TrackerState::Idle => Err(TrackerError::NotStarted),
            TrackerState::Finished => Err(TrackerError::AlreadyFinished),
        }
    }
}
