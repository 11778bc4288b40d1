//! Recursive-descent scanner that re-walks JSON text and reports the span of
//! the value addressed by a [`PointerPath`].
//!
//! Overview
//! - The scanner never builds values. Every parse unit (value, string, object,
//!   array, key-value pair, literal) is bracketed by its own [`SpanTracker`]
//!   and yields a [`Spanned`] borrowing its verbatim source text.
//! - While walking, each object key and array index is offered to
//!   [`PointerPath::matches`] together with the current depth. A match
//!   advances the path; a match on the final segment captures the span of
//!   that key's (or element's) value.
//! - Captures travel back up as `Option<Span>` in each unit's [`Parsed`]
//!   result. There is no shared result cell.
//!
//! On-path matching
//! - Only containers entered through a matched segment (and the root) offer
//!   their keys to the path. A sibling subtree at the right depth can never
//!   satisfy a later segment after an earlier one matched elsewhere.
//! - The first matching key wins; later duplicates sit at a depth the path has
//!   already moved past.
//!
//! Lenience
//! - Literals (numbers, `true`, `false`, `null`) are consumed verbatim up to
//!   whitespace or one of `}],` without validating their grammar.
//! - Separators between object members and array elements are skipped without
//!   checking their order. The entry point validates the document beforehand
//!   unless told otherwise.
//!
//! Recursion depth equals the nesting depth of the input. Use
//! [`LocateOptions::max_depth`] to bound it for untrusted documents.

use alloc::string::{String, ToString};
use core::ops::ControlFlow;

use tracing::trace;

use crate::{
    Cursor, LocateError, LocateOptions, PointerPath, Span, SpanTracker, Spanned,
    escape::{UnicodeEscapeBuffer, Utf16Joiner, simple_escape},
};

/// Result of parsing one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parsed<'src> {
    pub spanned: Spanned<'src>,
    /// Span captured by this unit or one of its descendants.
    pub found: Option<Span>,
}

impl<'src> Parsed<'src> {
    fn leaf(spanned: Spanned<'src>) -> Self {
        Self {
            spanned,
            found: None,
        }
    }
}

/// A string unit: verbatim span plus its decoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedString<'src> {
    pub spanned: Spanned<'src>,
    pub decoded: String,
}

#[inline]
fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Parser context: cursor, path state, and options for a single scan.
#[derive(Debug)]
pub struct Scanner<'src> {
    cursor: Cursor<'src>,
    pointer: PointerPath,
    options: LocateOptions,
}

impl<'src> Scanner<'src> {
    #[must_use]
    pub fn new(text: &'src str, pointer: PointerPath, options: LocateOptions) -> Self {
        Self {
            cursor: Cursor::new(text),
            pointer,
            options,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor<'src> {
        &self.cursor
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerPath {
        &self.pointer
    }

    /// Skips leading whitespace and parses the first top-level value.
    ///
    /// Content after that value is not visited.
    ///
    /// # Errors
    ///
    /// Any [`LocateError`] raised while scanning; the scan is abandoned at the
    /// first one.
    pub fn scan(&mut self) -> Result<Option<Span>, LocateError> {
        self.skip_whitespace()?;
        let root = self.parse_value(0, true)?;
        Ok(root.found)
    }

    fn skip_whitespace(&mut self) -> Result<(), LocateError> {
        while is_json_whitespace(self.cursor.peek(0)?) {
            self.cursor.advance(1);
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<(), LocateError> {
        match self.options.max_depth {
            Some(limit) if depth >= limit => Err(LocateError::DepthLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Dispatches on the lookahead character.
    ///
    /// `on_path` is `true` when this value was reached through a matched
    /// segment, so its own keys or indices may match the next one.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan`].
    pub fn parse_value(&mut self, depth: usize, on_path: bool) -> Result<Parsed<'src>, LocateError> {
        match self.cursor.peek(0)? {
            '"' => Ok(Parsed::leaf(self.parse_string()?.spanned)),
            '[' => self.parse_array(depth, on_path),
            '{' => self.parse_object(depth, on_path),
            _ => self.parse_literal(),
        }
    }

    /// Consumes a literal verbatim up to whitespace or one of `}],`.
    ///
    /// # Errors
    ///
    /// [`LocateError::OverTextMaxIndex`] if the text ends first.
    pub fn parse_literal(&mut self) -> Result<Parsed<'src>, LocateError> {
        let mut tracker = SpanTracker::new();
        tracker.start(&self.cursor)?;
        loop {
            let c = self.cursor.peek(0)?;
            if is_json_whitespace(c) || matches!(c, '}' | ']' | ',') {
                break;
            }
            self.cursor.advance(1);
        }
        Ok(Parsed::leaf(tracker.finish(&self.cursor)?))
    }

    /// Parses a quoted string starting at its opening quote.
    ///
    /// # Errors
    ///
    /// Bounds errors for an unterminated string, or
    /// [`LocateError::UnexpectedToken`] for a malformed escape.
    pub fn parse_string(&mut self) -> Result<ParsedString<'src>, LocateError> {
        let mut tracker = SpanTracker::new();
        tracker.start(&self.cursor)?;
        self.cursor.advance(1);
        let decoded = self.parse_string_body()?;
        self.cursor.advance(1);
        Ok(ParsedString {
            spanned: tracker.finish(&self.cursor)?,
            decoded,
        })
    }

    /// Decodes string contents up to, but not including, the closing quote.
    fn parse_string_body(&mut self) -> Result<String, LocateError> {
        let mut out = String::new();
        let mut joiner = Utf16Joiner::new();
        loop {
            match self.cursor.peek(0)? {
                '"' => break,
                '\\' => self.parse_escape(&mut out, &mut joiner)?,
                c => {
                    joiner.flush(&mut out);
                    out.push(c);
                    self.cursor.advance(1);
                }
            }
        }
        joiner.flush(&mut out);
        Ok(out)
    }

    /// Decodes one escape sequence; the cursor sits on the backslash.
    fn parse_escape(&mut self, out: &mut String, joiner: &mut Utf16Joiner) -> Result<(), LocateError> {
        self.cursor.advance(1);
        let c = self.cursor.peek(0)?;
        if let Some(literal) = simple_escape(c) {
            joiner.flush(out);
            out.push(literal);
            self.cursor.advance(1);
            return Ok(());
        }
        if c != 'u' {
            return Err(LocateError::UnexpectedToken {
                token: c,
                position: self.cursor.position(),
            });
        }

        let mut hex = UnicodeEscapeBuffer::new();
        let mut unit = None;
        let bad = self.cursor.walk_fixed(4, |ch, position| match hex.feed(ch) {
            Ok(done) => {
                unit = done;
                ControlFlow::Continue(())
            }
            Err(token) => ControlFlow::Break(LocateError::UnexpectedToken { token, position }),
        })?;
        if let Some(err) = bad {
            return Err(err);
        }
        if let Some(unit) = unit {
            joiner.push_unit(unit, out);
        }
        self.cursor.advance(1);
        Ok(())
    }

    /// Parses an object starting at `{`.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan`].
    pub fn parse_object(&mut self, depth: usize, on_path: bool) -> Result<Parsed<'src>, LocateError> {
        self.enter(depth)?;
        let mut tracker = SpanTracker::new();
        tracker.start(&self.cursor)?;
        self.cursor.advance(1);
        let mut found = None;
        loop {
            match self.cursor.peek(0)? {
                '}' => {
                    self.cursor.advance(1);
                    break;
                }
                '"' => {
                    let member = self.parse_key_value_pair(depth, on_path)?;
                    found = found.or(member.found);
                }
                _ => {
                    self.cursor.advance(1);
                }
            }
        }
        Ok(Parsed {
            spanned: tracker.finish(&self.cursor)?,
            found,
        })
    }

    /// Parses `"key" : value` starting at the key's opening quote.
    ///
    /// The returned span covers key, colon, surrounding whitespace and value.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan`].
    pub fn parse_key_value_pair(
        &mut self,
        depth: usize,
        on_path: bool,
    ) -> Result<Parsed<'src>, LocateError> {
        let mut tracker = SpanTracker::new();
        tracker.start(&self.cursor)?;
        let key = self.parse_string()?;
        let (matched, terminal) = self.try_match(depth, on_path, &key.decoded);

        self.skip_whitespace()?;
        // ':'
        self.cursor.advance(1);
        self.skip_whitespace()?;
        let value = self.parse_value(depth + 1, matched)?;

        let found = if terminal {
            let span = value.spanned.span;
            trace!(depth, key = %key.decoded, from = span.from, to = span.to, "captured span");
            Some(value.spanned.span)
        } else {
            value.found
        };
        Ok(Parsed {
            spanned: tracker.finish(&self.cursor)?,
            found,
        })
    }

    /// Parses an array starting at `[`.
    ///
    /// # Errors
    ///
    /// See [`Scanner::scan`].
    pub fn parse_array(&mut self, depth: usize, on_path: bool) -> Result<Parsed<'src>, LocateError> {
        self.enter(depth)?;
        let mut tracker = SpanTracker::new();
        tracker.start(&self.cursor)?;
        self.cursor.advance(1);
        let mut next_index = 0usize;
        let mut found = None;
        loop {
            match self.cursor.peek(0)? {
                ']' => {
                    self.cursor.advance(1);
                    break;
                }
                c if c == ',' || is_json_whitespace(c) => {
                    self.cursor.advance(1);
                }
                _ => {
                    let index = next_index;
                    next_index += 1;
                    let (matched, terminal) = if on_path {
                        self.try_match(depth, on_path, &index.to_string())
                    } else {
                        (false, false)
                    };
                    let element = self.parse_value(depth + 1, matched)?;
                    if element.spanned.span.is_empty() {
                        // A stray '}' reads as an empty literal; step over it.
                        self.cursor.advance(1);
                    }
                    let captured = if terminal {
                        let span = element.spanned.span;
                        trace!(depth, index, from = span.from, to = span.to, "captured span");
                        Some(element.spanned.span)
                    } else {
                        element.found
                    };
                    found = found.or(captured);
                }
            }
        }
        Ok(Parsed {
            spanned: tracker.finish(&self.cursor)?,
            found,
        })
    }

    /// Offers `key` at `depth` to the path. Returns `(matched, terminal)`.
    fn try_match(&mut self, depth: usize, on_path: bool, key: &str) -> (bool, bool) {
        if !on_path || !self.pointer.matches(depth, key) {
            return (false, false);
        }
        let terminal = self.pointer.is_last_segment();
        trace!(depth, segment = key, terminal, "segment matched");
        self.pointer.advance();
        (true, terminal)
    }
}
