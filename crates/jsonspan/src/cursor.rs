//! Character-indexed position tracking over an immutable source text.
//!
//! The cursor addresses the text by Unicode scalar index, not by byte. The
//! byte offset of every scalar is decoded once up front (via `bstr`) so that
//! verbatim slices can be borrowed from the source without rescanning.
//!
//! Reads and steps behave differently at the end of the text:
//! - [`Cursor::peek`] fails with [`LocateError::OverTextMaxIndex`] when the
//!   addressed character does not exist. Callers use it where a character is
//!   structurally required.
//! - [`Cursor::advance`] and [`Cursor::retreat`] never fail; they return `None`
//!   when the new position holds no character.

use alloc::vec::Vec;
use core::ops::ControlFlow;

use bstr::ByteSlice;

use crate::LocateError;

/// A movable position over `&'src str`.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    text: &'src str,
    /// `(byte offset, scalar)` for every character of `text`.
    chars: Vec<(usize, char)>,
    position: usize,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at position 0.
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        let chars = text
            .as_bytes()
            .char_indices()
            .map(|(start, _, ch)| (start, ch))
            .collect();
        Self {
            text,
            chars,
            position: 0,
        }
    }

    /// The full source text.
    #[must_use]
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Current character index.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of characters in the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the text has no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Reads the character at `position + offset`.
    ///
    /// # Errors
    ///
    /// [`LocateError::OverTextMaxIndex`] if that index is at or past the end.
    pub fn peek(&self, offset: usize) -> Result<char, LocateError> {
        let position = self.position + offset;
        self.char_at(position)
            .ok_or(LocateError::OverTextMaxIndex { position })
    }

    /// Moves forward by `n` and returns the character now under the cursor.
    pub fn advance(&mut self, n: usize) -> Option<char> {
        self.position += n;
        self.char_at(self.position)
    }

    /// Moves backward by `n` (saturating at 0) and returns the character now
    /// under the cursor.
    pub fn retreat(&mut self, n: usize) -> Option<char> {
        self.position = self.position.saturating_sub(n);
        self.char_at(self.position)
    }

    /// Advances exactly `count` times, calling `visit(ch, position)` after
    /// each step with the character that step landed on.
    ///
    /// `visit` may stop the walk early by returning [`ControlFlow::Break`]; the
    /// break value is returned and the cursor stays on the visited character.
    ///
    /// # Errors
    ///
    /// [`LocateError::WalkStepsOverMaxLength`] if fewer than `count`
    /// characters follow the current one. The cursor is not moved in that
    /// case.
    pub fn walk_fixed<B, F>(&mut self, count: usize, mut visit: F) -> Result<Option<B>, LocateError>
    where
        F: FnMut(char, usize) -> ControlFlow<B>,
    {
        let remaining = self.chars.len().saturating_sub(self.position + 1);
        if remaining < count {
            return Err(LocateError::WalkStepsOverMaxLength {
                steps: count,
                remaining,
            });
        }
        for _ in 0..count {
            self.position += 1;
            let ch = self.chars[self.position].1;
            if let ControlFlow::Break(b) = visit(ch, self.position) {
                return Ok(Some(b));
            }
        }
        Ok(None)
    }

    /// Borrows the verbatim text between two character indices, `[from, to)`.
    ///
    /// Indices past the end are clamped to the end of the text.
    #[must_use]
    pub fn slice(&self, from: usize, to: usize) -> &'src str {
        let start = self.byte_offset(from);
        let end = self.byte_offset(to.max(from));
        &self.text[start..end]
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map_or(self.text.len(), |&(byte, _)| byte)
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).map(|&(_, ch)| ch)
    }
}
