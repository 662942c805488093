//! Decoding of the four hex digits that follow `\u` in a string.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates exactly four ASCII
//! hexadecimal digits (`0-9`, `A-F`, `a-f`) into a `u32` as they arrive and
//! yields the UTF-16 code unit once the fourth digit is fed. Surrogates are
//! returned as-is; pairing them is up to the caller.
//!
//! # Errors
//!
//! Feeding anything but a hex digit returns
//! [`SyntaxError::InvalidCodepoint`].

use crate::error::SyntaxError;

#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u32,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u32> {
        match b {
            b'0'..=b'9' => Some(u32::from(b - b'0')),
            b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one digit.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been provided.
    /// - Returns `Ok(Some(unit))` on the fourth digit and resets the buffer.
    pub fn feed(&mut self, b: u8) -> Result<Option<u32>, SyntaxError> {
        let d = Self::hex_val(b).ok_or(SyntaxError::InvalidCodepoint(b))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::UnicodeEscapeBuffer;
    use crate::error::SyntaxError;

    fn feed_all(buf: &mut UnicodeEscapeBuffer, digits: &[u8]) -> Option<u32> {
        let mut out = None;
        for &d in digits {
            out = buf.feed(d).unwrap();
        }
        out
    }

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'0').unwrap(), None);
        assert_eq!(buf.feed(b'4').unwrap(), None);
        assert_eq!(buf.feed(b'1').unwrap(), Some(0x41));
    }

    #[test]
    fn mixed_case_hex() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(feed_all(&mut buf, b"AbCd"), Some(0xABCD));
    }

    #[test]
    fn resets_after_each_unit() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(feed_all(&mut buf, b"d83d"), Some(0xD83D));
        assert_eq!(feed_all(&mut buf, b"DE00"), Some(0xDE00));
    }

    #[test]
    fn surrogates_are_not_rejected() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(feed_all(&mut buf, b"D800"), Some(0xD800));
    }

    #[test]
    fn reset_clears_buffer() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert!(buf.feed(b'F').unwrap().is_none());
        buf.reset();
        assert_eq!(feed_all(&mut buf, b"0020"), Some(0x20));
    }

    #[test]
    fn invalid_hex_error() {
        let mut buf = UnicodeEscapeBuffer::new();
        let err = buf.feed(b'G').unwrap_err();
        assert_eq!(err, SyntaxError::InvalidCodepoint(b'G'));
    }
}
