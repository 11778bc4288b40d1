use serde::{Deserialize, de::IgnoredAny};
use tracing::debug;

use crate::{IntoPointerPath, LocateError, LocateOptions, Scanner, Span};

/// Finds the span of the value addressed by `path` in `text`.
///
/// Returns `{0, 0}` when the path is empty or addresses nothing. Use [`find`]
/// to tell those cases apart from a real match.
///
/// ```rust
/// let text = r#"{"a":{"b":[1,2,3]}}"#;
/// let span = jsonspan::locate(text, "/a/b/1").unwrap();
/// assert_eq!(span.slice(text), Some("2"));
/// ```
///
/// # Errors
///
/// - [`LocateError::InvalidDocument`] if the trimmed text is not valid JSON
///   delimited by `{…}` or `[…]`.
/// - [`LocateError::Pointer`] for malformed pointer notation.
/// - [`LocateError::UnexpectedToken`], [`LocateError::OverTextMaxIndex`] or
///   [`LocateError::WalkStepsOverMaxLength`] if scanning hits malformed text.
pub fn locate<P: IntoPointerPath>(text: &str, path: P) -> Result<Span, LocateError> {
    locate_with(text, path, LocateOptions::default())
}

/// [`locate`] with explicit options.
///
/// # Errors
///
/// See [`locate`] and [`LocateError::DepthLimitExceeded`].
pub fn locate_with<P: IntoPointerPath>(
    text: &str,
    path: P,
    options: LocateOptions,
) -> Result<Span, LocateError> {
    find_with(text, path, options).map(Option::unwrap_or_default)
}

/// Like [`locate`], but returns `None` when nothing matched.
///
/// # Errors
///
/// See [`locate`].
pub fn find<P: IntoPointerPath>(text: &str, path: P) -> Result<Option<Span>, LocateError> {
    find_with(text, path, LocateOptions::default())
}

/// [`find`] with explicit options.
///
/// # Errors
///
/// See [`locate`] and [`LocateError::DepthLimitExceeded`].
pub fn find_with<P: IntoPointerPath>(
    text: &str,
    path: P,
    options: LocateOptions,
) -> Result<Option<Span>, LocateError> {
    check_document(text, options)?;

    let pointer = path.into_pointer_path()?;
    debug!(segments = pointer.len(), text_len = text.len(), "locating pointer");
    if pointer.is_empty() {
        return Ok(None);
    }

    let mut scanner = Scanner::new(text, pointer, options);
    let found = scanner.scan()?;
    debug!(
        ?found,
        matched = scanner.pointer().current_index(),
        "scan finished"
    );
    Ok(found)
}

fn check_document(text: &str, options: LocateOptions) -> Result<(), LocateError> {
    let trimmed = text.trim();
    let delimited = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    if !delimited {
        debug!("document is not an object or array");
        return Err(LocateError::InvalidDocument);
    }
    if !options.skip_validation {
        if let Err(err) = validate(trimmed) {
            debug!(%err, "document failed validation");
            return Err(LocateError::InvalidDocument);
        }
    }
    Ok(())
}

/// Checks JSON syntax without building values or decoding strings, so escaped
/// lone surrogates pass and nesting depth is unbounded.
fn validate(text: &str) -> Result<(), serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    IgnoredAny::deserialize(&mut de)?;
    de.end()
}
