//! Byte reader with position tracking and a one-byte pushback slot.
//!
//! The state machine occasionally needs to look at a byte before deciding
//! it belongs to the next token (the byte ending a number, or the byte after
//! a lone high surrogate). That byte goes back through [`Reader::unread`]
//! and is handed out again by the next [`Reader::read`]; no wider lookahead
//! exists.

use crate::source::ByteSource;

/// What [`Reader::read`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PeekedByte {
    Byte(u8),
    /// End of input; reading again keeps returning this.
    EndOfInput,
}

pub(crate) use PeekedByte::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };
}

#[derive(Debug)]
pub(crate) struct Reader<S> {
    source: S,
    pending: Option<PeekedByte>,
    finished: bool,
    /// Position of the next byte pulled from `source`.
    next: Position,
    /// Position of the byte last handed out.
    last: Position,
}

impl<S: ByteSource> Reader<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
            finished: false,
            next: Position::START,
            last: Position::START,
        }
    }

    #[inline]
    pub(crate) fn read(&mut self) -> Result<PeekedByte, S::Error> {
        if let Some(pending) = self.pending.take() {
            return Ok(pending);
        }
        self.last = self.next;
        if self.finished {
            return Ok(EndOfInput);
        }
        match self.source.next_byte()? {
            Some(b) => {
                self.next.offset += 1;
                if b == b'\n' {
                    self.next.line += 1;
                    self.next.column = 1;
                } else {
                    self.next.column += 1;
                }
                Ok(Byte(b))
            }
            None => {
                self.finished = true;
                Ok(EndOfInput)
            }
        }
    }

    /// Hands `peeked` out again on the next [`read`](Self::read).
    #[inline]
    pub(crate) fn unread(&mut self, peeked: PeekedByte) {
        debug_assert!(self.pending.is_none(), "only one byte of pushback");
        self.pending = Some(peeked);
    }

    /// Where the byte last read (or the end of input) sits.
    pub(crate) fn position(&self) -> Position {
        self.last
    }

    /// Number of bytes pulled from the source so far.
    pub(crate) fn consumed(&self) -> usize {
        self.next.offset
    }
}
