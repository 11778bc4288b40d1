//! Decoding of JSON string escapes.
//!
//! Single-character escapes go through a fixed table. Four-digit `\u` escapes
//! are accumulated by [`UnicodeEscapeBuffer`] into a UTF-16 code unit, and
//! [`Utf16Joiner`] pairs surrogates into scalars. A surrogate that cannot be
//! paired decodes to U+FFFD.

use alloc::string::String;

/// Escape character → literal character, for every escape except `u`.
const ESCAPES: [(char, char); 8] = [
    ('b', '\u{0008}'),
    ('f', '\u{000C}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
    ('"', '"'),
    ('/', '/'),
    ('\\', '\\'),
];

/// Looks up the literal for a single-character escape.
#[must_use]
pub(crate) fn simple_escape(c: char) -> Option<char> {
    ESCAPES
        .iter()
        .find_map(|&(escape, literal)| (escape == c).then_some(literal))
}

/// Accumulates exactly four hex digits into a UTF-16 code unit.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one hex digit (either case).
    ///
    /// Returns `Ok(Some(unit))` on the fourth digit, after which the buffer is
    /// empty again. Returns `Err(c)` if `c` is not a hex digit.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, char> {
        #[expect(clippy::cast_possible_truncation)]
        let d = c.to_digit(16).ok_or(c)? as u16;
        self.acc = (self.acc << 4) | d;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.acc;
        self.acc = 0;
        self.len = 0;
        Ok(Some(unit))
    }
}

/// Turns a sequence of UTF-16 code units into chars, holding back a high
/// surrogate until the next unit shows whether it completes a pair.
#[derive(Debug, Default)]
pub(crate) struct Utf16Joiner {
    high: Option<u16>,
}

impl Utf16Joiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_unit(&mut self, unit: u16, out: &mut String) {
        match (self.high.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            (pending, 0xD800..=0xDBFF) => {
                if pending.is_some() {
                    out.push(char::REPLACEMENT_CHARACTER);
                }
                self.high = Some(unit);
            }
            (pending, _) => {
                if pending.is_some() {
                    out.push(char::REPLACEMENT_CHARACTER);
                }
                out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }

    /// Emits a replacement for any unpaired high surrogate. Call before
    /// appending anything that is not a `\u` escape.
    pub fn flush(&mut self, out: &mut String) {
        if self.high.take().is_some() {
            out.push(char::REPLACEMENT_CHARACTER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_units(units: &[u16]) -> String {
        let mut joiner = Utf16Joiner::new();
        let mut out = String::new();
        for &unit in units {
            joiner.push_unit(unit, &mut out);
        }
        joiner.flush(&mut out);
        out
    }

    #[test]
    fn table_covers_json_escapes() {
        for (escape, literal) in [('n', '\n'), ('"', '"'), ('/', '/'), ('b', '\u{8}')] {
            assert_eq!(simple_escape(escape), Some(literal));
        }
        assert_eq!(simple_escape('u'), None);
        assert_eq!(simple_escape('x'), None);
    }

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('0'), Ok(None));
        assert_eq!(buf.feed('0'), Ok(None));
        assert_eq!(buf.feed('e'), Ok(None));
        assert_eq!(buf.feed('9'), Ok(Some(0x00E9)));
        // Ready for the next escape.
        for ch in "AbCd".chars() {
            let res = buf.feed(ch).unwrap();
            if ch == 'd' {
                assert_eq!(res, Some(0xABCD));
            }
        }
    }

    #[test]
    fn invalid_hex_digit() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('G'), Err('G'));
    }

    #[test]
    fn surrogate_pairs_join() {
        assert_eq!(decode_units(&[0xD83D, 0xDE00]), "😀");
        assert_eq!(decode_units(&[0x0041, 0x00E9]), "Aé");
    }

    #[test]
    fn lone_surrogates_are_replaced() {
        assert_eq!(decode_units(&[0xD800]), "\u{FFFD}");
        assert_eq!(decode_units(&[0xDC00, 0x0041]), "\u{FFFD}A");
        assert_eq!(decode_units(&[0xD800, 0xD800, 0xDC00]), "\u{FFFD}\u{10000}");
        assert_eq!(decode_units(&[0xD800, 0x0041]), "\u{FFFD}A");
    }
}
