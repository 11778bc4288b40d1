//! Locate the source span of a JSON value addressed by a JSON Pointer.
//!
//! Given raw JSON text and a path, [`locate`] returns the character offsets
//! occupied by the addressed value in the original text, without building a
//! value tree. The returned span covers the value verbatim: strings keep their
//! quotes and escape sequences.
//!
//! ```rust
//! use jsonspan::{find, locate, pointer};
//!
//! let text = r#"{"a": [ { "b": 1 }, { "b": 2 } ]}"#;
//! let span = locate(text, "/a/1/b").unwrap();
//! assert_eq!(span.slice(text), Some("2"));
//!
//! // Pre-split segments are taken verbatim.
//! assert_eq!(locate(text, ["a", "1", "b"]).unwrap(), span);
//! assert_eq!(locate(text, pointer!["a", 1, "b"]).unwrap(), span);
//!
//! // `find` distinguishes "not found" from a match.
//! assert_eq!(find(text, "/a/2").unwrap(), None);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod error;
mod escape;
mod locate;
mod options;
mod pointer;
mod scanner;
mod span;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::{LocateError, PointerError, TrackerError};
pub use locate::{find, find_with, locate, locate_with};
pub use options::LocateOptions;
pub use pointer::{IntoPointerPath, PointerPath, SegmentFrom};
pub use scanner::{Parsed, ParsedString, Scanner};
pub use span::{Span, SpanTracker, Spanned};

#[doc(hidden)]
pub use alloc::{string::String, vec};

/// Macro to build a [`PointerPath`] from a heterogeneous list of keys and
/// indices.
///
/// ```rust
/// # use jsonspan::pointer;
/// let p = pointer!["items", 0, "a/b"];
/// assert_eq!(p.segments(), ["items", "0", "a/b"]);
/// assert_eq!(p.to_string(), "/items/0/a~1b");
/// ```
#[macro_export]
macro_rules! pointer {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::SegmentFrom;
        let segments: $crate::vec::Vec<$crate::String> =
            $crate::vec![$(<$crate::PointerPath as SegmentFrom<_>>::segment_from($elem)),*];
        $crate::PointerPath::from_segments(segments)
    }};
}
