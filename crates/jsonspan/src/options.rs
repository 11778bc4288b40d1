/// Configuration for [`locate_with`](crate::locate_with) and
/// [`find_with`](crate::find_with).
///
/// # Examples
///
/// ```rust
/// use jsonspan::{LocateOptions, find_with};
///
/// let options = LocateOptions {
///     max_depth: Some(64),
///     ..Default::default()
/// };
/// let span = find_with(r#"{"a":[true]}"#, "/a/0", options).unwrap();
/// assert_eq!(span.map(|s| (s.from, s.to)), Some((6, 10)));
/// ```
///
/// # Default
///
/// Validation on, no depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateOptions {
    /// Skip the full JSON validity check of the document.
    ///
    /// The `{…}` / `[…]` shape check still runs. Malformed interiors are then
    /// only noticed by the scanner, as bounds or token errors, and some (such
    /// as bad number grammar) are not noticed at all.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_validation: bool,

    /// Maximum container nesting depth.
    ///
    /// Scanning recurses once per nesting level. A limit turns deeply nested
    /// input into [`LocateError::DepthLimitExceeded`](crate::LocateError)
    /// rather than stack exhaustion. A limit of `n` admits containers at
    /// depths `0..n`.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,
}
