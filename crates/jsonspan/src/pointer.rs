//! Target paths and depth-synchronized matching.
//!
//! A [`PointerPath`] is an ordered list of raw segments (object keys verbatim,
//! array indices as canonical decimal strings) plus the index of the next
//! segment still waiting to be matched. The scanner asks
//! [`PointerPath::matches`] at every key or element it meets; a match is only
//! possible when the live recursion depth equals that index, so the full
//! target depth never has to be known ahead of time.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::PointerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerPath {
    segments: Vec<String>,
    index: usize,
}

impl PointerPath {
    /// Builds a path from segments taken verbatim.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    /// Parses RFC 6901 notation: `""` is the empty path, anything else must
    /// start with `/`. Within a segment `~1` becomes `/` and `~0` becomes `~`.
    ///
    /// # Errors
    ///
    /// [`PointerError`] for a missing leading slash or a `~` not followed by
    /// `0` or `1`.
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::default());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash);
        };

        let mut segments = Vec::new();
        let mut offset = 1;
        for raw in rest.split('/') {
            segments.push(unescape(raw, offset)?);
            offset += raw.len() + 1;
        }
        Ok(Self { segments, index: 0 })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn segment_at(&self, i: usize) -> Option<&str> {
        self.segments.get(i).map(String::as_str)
    }

    /// Index of the next unmatched segment.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `true` when the current index addresses the final segment.
    #[must_use]
    pub fn is_last_segment(&self) -> bool {
        self.index + 1 == self.segments.len()
    }

    /// `true` once every segment has been matched.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.segments.len()
    }

    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// Returns `true` only if `depth` equals the current index and `key`
    /// equals the segment at that index.
    #[must_use]
    pub fn matches(&self, depth: usize, key: &str) -> bool {
        depth == self.index && self.segment_at(self.index) == Some(key)
    }

    /// Rewinds matching progress so the path can drive another scan.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

fn unescape(raw: &str, offset: usize) -> Result<String, PointerError> {
    if !raw.contains('~') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '0')) => out.push('~'),
            Some((_, '1')) => out.push('/'),
            _ => return Err(PointerError::InvalidEscape { position: offset + i }),
        }
    }
    Ok(out)
}

/// Formats as an escaped JSON Pointer, e.g. `/a~1b/0`.
impl fmt::Display for PointerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str("/")?;
            for c in segment.chars() {
                match c {
                    '~' => f.write_str("~0")?,
                    '/' => f.write_str("~1")?,
                    c => fmt::Write::write_char(f, c)?,
                }
            }
        }
        Ok(())
    }
}

/// Anything that can be turned into a [`PointerPath`].
///
/// Strings are parsed as JSON-Pointer notation; sequences are taken as
/// pre-split segments.
pub trait IntoPointerPath {
    /// # Errors
    ///
    /// [`PointerError`] if pointer notation is malformed.
    fn into_pointer_path(self) -> Result<PointerPath, PointerError>;
}

impl IntoPointerPath for PointerPath {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        Ok(self)
    }
}

impl IntoPointerPath for &PointerPath {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        Ok(PointerPath {
            segments: self.segments.clone(),
            index: 0,
        })
    }
}

impl IntoPointerPath for &str {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        PointerPath::parse(self)
    }
}

impl IntoPointerPath for &String {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        PointerPath::parse(self)
    }
}

impl IntoPointerPath for String {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        PointerPath::parse(&self)
    }
}

impl<S: AsRef<str>> IntoPointerPath for &[S] {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        Ok(PointerPath::from_segments(self.iter().map(|s| s.as_ref().to_string())))
    }
}

impl<S: AsRef<str>, const N: usize> IntoPointerPath for [S; N] {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        self.as_slice().into_pointer_path()
    }
}

impl<S: AsRef<str>, const N: usize> IntoPointerPath for &[S; N] {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        self.as_slice().into_pointer_path()
    }
}

impl<S: AsRef<str>> IntoPointerPath for Vec<S> {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        self.as_slice().into_pointer_path()
    }
}

impl<S: AsRef<str>> IntoPointerPath for &Vec<S> {
    fn into_pointer_path(self) -> Result<PointerPath, PointerError> {
        self.as_slice().into_pointer_path()
    }
}

#[doc(hidden)]
pub trait SegmentFrom<T> {
    fn segment_from(value: T) -> String;
}

// Indices become canonical decimal; negative indices clamp to 0.
macro_rules! impl_unsigned_as_segment {
    ($($t:ty),+) => {
        $(
            impl SegmentFrom<$t> for PointerPath {
                fn segment_from(value: $t) -> String {
                    value.to_string()
                }
            }
        )+
    };
}
impl_unsigned_as_segment!(u8, u16, u32, u64, usize);

macro_rules! impl_signed_as_segment {
    ($($t:ty),+) => {
        $(
            impl SegmentFrom<$t> for PointerPath {
                fn segment_from(value: $t) -> String {
                    value.max(0).to_string()
                }
            }
        )+
    };
}
impl_signed_as_segment!(i8, i16, i32, i64, isize);

impl SegmentFrom<&str> for PointerPath {
    fn segment_from(value: &str) -> String {
        value.to_string()
    }
}

impl SegmentFrom<String> for PointerPath {
    fn segment_from(value: String) -> String {
        value
    }
}
