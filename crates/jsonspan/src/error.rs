use thiserror::Error;

/// Any failure raised while resolving a path against a document.
///
/// Every error is fatal to the call that produced it; there is no partial
/// result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    /// The trimmed text is not valid JSON, or is not delimited by `{…}` or
    /// `[…]`.
    #[error("Parse JSON error.")]
    InvalidDocument,
    /// An escape sequence inside a string used a character that is not part of
    /// the JSON escape grammar.
    #[error("Unexpected token {token} in JSON at position {position}.")]
    UnexpectedToken { token: char, position: usize },
    /// A direct read addressed a character at or past the end of the text.
    #[error("Over text max index.")]
    OverTextMaxIndex { position: usize },
    /// A fixed-length walk needed more characters than remain in the text.
    #[error("walk steps over max length")]
    WalkStepsOverMaxLength { steps: usize, remaining: usize },
    /// Container nesting exceeded the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    #[error("invalid JSON pointer: {0}")]
    Pointer(#[from] PointerError),
    #[error("span tracker misuse: {0}")]
    Tracker(#[from] TrackerError),
}

/// Malformed JSON-Pointer notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer must be empty or start with '/'")]
    MissingLeadingSlash,
    #[error("invalid escape '~' at byte {position}, expected '~0' or '~1'")]
    InvalidEscape { position: usize },
}

/// A [`SpanTracker`](crate::SpanTracker) was driven out of order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    #[error("tracker already started")]
    AlreadyStarted,
    #[error("tracker already finished")]
    AlreadyFinished,
    #[error("tracker not started")]
    NotStarted,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        insta::assert_snapshot!(LocateError::InvalidDocument.to_string(), @"Parse JSON error.");
        insta::assert_snapshot!(
            LocateError::UnexpectedToken { token: 'x', position: 7 }.to_string(),
            @"Unexpected token x in JSON at position 7."
        );
        insta::assert_snapshot!(
            LocateError::OverTextMaxIndex { position: 3 }.to_string(),
            @"Over text max index."
        );
        insta::assert_snapshot!(
            LocateError::WalkStepsOverMaxLength { steps: 4, remaining: 2 }.to_string(),
            @"walk steps over max length"
        );
    }

    #[test]
    fn nested_errors_convert() {
        let err: LocateError = PointerError::InvalidEscape { position: 2 }.into();
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid JSON pointer: invalid escape '~' at byte 2, expected '~0' or '~1'"
        );
        let err: LocateError = TrackerError::NotStarted.into();
        assert_eq!(err, LocateError::Tracker(TrackerError::NotStarted));
    }
}
