//! Single-pass JSON event parser.
//!
//! Overview
//! - Input is pulled one byte at a time from a [`ByteSource`]; nothing but
//!   the literal being scanned is kept in memory.
//! - Grammar is enforced with a single "expected next token" class instead
//!   of recursive descent. Nesting lives in an explicit, bounded
//!   [`PathStack`], so memory and depth stay bounded for any input.
//! - Every container open and every scalar is reported to the
//!   [`EventSink`] together with the full path leading to it.
//!
//! Buffers
//! - `scratch` accumulates the decoded bytes of the current string or the
//!   raw text of the current number, and is reused for every token.
//! - Object keys are copied from `scratch` into the name of the current path
//!   slot; slots keep their name buffers when they are reused.
//!
//! Pushback
//! - The byte that ends a number, and the byte following a lone high
//!   surrogate escape, are read before it is known they belong to the next
//!   token. They are put back into the [`Reader`] and handled as if read
//!   fresh.
//!
//! Failure
//! - The first error ends the parse. There is no resynchronization; the
//!   state machine and its buffers are dropped whatever the outcome.

mod escape_buffer;
mod literal_buffer;
mod reader;
pub(crate) mod scratch;
mod unicode;


use bstr::BStr;
use escape_buffer::UnicodeEscapeBuffer;
use literal_buffer::{ExpectedLiteralBuffer, Step};
use reader::{Byte, EndOfInput, PeekedByte, Reader};
use scratch::ScratchBuffer;
use tracing::{debug, trace};
use unicode::{Surrogates, encode_utf8, is_high_surrogate, pair_surrogates};

use crate::{
    error::{ErrorSource, ParserError, SyntaxError},
    options::ParserOptions,
    path::{NodeKind, PathStack},
    sink::EventSink,
    source::{ByteSource, SliceSource},
};

/// The set of bytes the grammar accepts next, whitespace aside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Start of any value.
    Value,
    /// An object key after `,`.
    String,
    /// The `:` after an object key.
    Colon,
    /// `,` or a closer after a value inside a container.
    CommaOrClose,
    /// Nothing but whitespace until end of input.
    Nothing,
    /// First key of an object, or `}`.
    StringOrObjectClose,
    /// First element of an array, or `]`.
    ValueOrArrayClose,
}

impl Expect {
    fn allows(self, b: u8) -> bool {
        match self {
            Expect::Value => is_value_start(b),
            Expect::String => b == b'"',
            Expect::Colon => b == b':',
            Expect::CommaOrClose => matches!(b, b',' | b']' | b'}'),
            Expect::Nothing => false,
            Expect::StringOrObjectClose => matches!(b, b'"' | b'}'),
            Expect::ValueOrArrayClose => b == b']' || is_value_start(b),
        }
    }
}

#[inline]
fn is_value_start(b: u8) -> bool {
    matches!(b, b'{' | b'[' | b'"' | b'-' | b'0'..=b'9' | b't' | b'f' | b'n')
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Bytes accepted in a number literal. The numeric grammar is not checked.
#[inline]
fn is_number_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'e' | b'E' | b'+' | b'-' | b'.')
}

/// Parses one JSON document per call, reporting events to an
/// [`EventSink`].
///
/// ```rust
/// use jsonevents::{NodeKind, Parser, ParserOptions, Recorder, SliceSource};
///
/// let mut events = Recorder::new();
/// Parser::new(ParserOptions::default())
///     .parse(SliceSource::from(r#"{"a":[true]}"#), &mut events)
///     .unwrap();
///
/// let kinds: Vec<_> = events.events().iter().map(|e| e.kind()).collect();
/// assert_eq!(kinds, [NodeKind::Object, NodeKind::Array, NodeKind::Bool]);
/// assert_eq!(events.events()[2].value, "true");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Maximum number of path nodes, root slot included.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.options.effective_max_depth()
    }

    /// Parses the document read from `source`.
    ///
    /// An empty (or all-whitespace) document is valid and produces no events.
    ///
    /// # Errors
    ///
    /// Stops at the first syntax error, allocation failure, depth overflow,
    /// sink error or source error. Every buffer is released before returning.
    pub fn parse<S, K>(
        &self,
        source: S,
        sink: &mut K,
    ) -> Result<(), ParserError<K::Error, S::Error>>
    where
        S: ByteSource,
        K: EventSink + ?Sized,
    {
        let mut machine = StateMachine::new(Reader::new(source), sink);
        let result = match PathStack::new(self.max_depth()) {
            Ok(mut path) => machine.run(&mut path),
            Err(err) => Err(err.into()),
        };

        match result {
            Ok(()) => {
                debug!(
                    events = machine.events,
                    bytes = machine.reader.consumed(),
                    scratch_capacity = machine.scratch.capacity(),
                    "parse finished"
                );
                Ok(())
            }
            Err(source) => {
                let at = machine.reader.position();
                let err = ParserError {
                    source,
                    offset: at.offset,
                    line: at.line,
                    column: at.column,
                };
                debug!(events = machine.events, error = %err, "parse failed");
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(!self.options.panic_on_error, "{err}");
                Err(err)
            }
        }
    }
}

/// Parses an in-memory document with default options.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse_slice<K>(bytes: &[u8], sink: &mut K) -> Result<(), ParserError<K::Error>>
where
    K: EventSink + ?Sized,
{
    Parser::default().parse(SliceSource::new(bytes), sink)
}

/// Parses a document read from `reader` with default options.
///
/// # Errors
///
/// See [`Parser::parse`]; read failures surface as
/// [`ErrorKind::Input`](crate::ErrorKind::Input).
#[cfg(feature = "std")]
pub fn parse_reader<R, K>(
    reader: R,
    sink: &mut K,
) -> Result<(), ParserError<K::Error, std::io::Error>>
where
    R: std::io::Read,
    K: EventSink + ?Sized,
{
    Parser::default().parse(crate::source::IoSource::new(reader), sink)
}

/// Classifies a byte the grammar does not accept at this point.
fn unexpected(path: &PathStack, b: u8) -> SyntaxError {
    let in_object = path.parent().is_some_and(|p| p.kind() == NodeKind::Object);
    if b == b':' && !in_object {
        SyntaxError::MemberOutsideObject
    } else {
        SyntaxError::InvalidCharacter(b)
    }
}

type Failure<K, S> = ErrorSource<<K as EventSink>::Error, <S as ByteSource>::Error>;

/// Transient state of one parse call.
struct StateMachine<'k, S, K: ?Sized> {
    reader: Reader<S>,
    sink: &'k mut K,
    scratch: ScratchBuffer,
    unicode_escape: UnicodeEscapeBuffer,
    expect: Expect,
    /// The next string is an object key rather than a value.
    in_key: bool,
    events: usize,
}

impl<'k, S, K> StateMachine<'k, S, K>
where
    S: ByteSource,
    K: EventSink + ?Sized,
{
    fn new(reader: Reader<S>, sink: &'k mut K) -> Self {
        Self {
            reader,
            sink,
            scratch: ScratchBuffer::new(),
            unicode_escape: UnicodeEscapeBuffer::new(),
            expect: Expect::Value,
            in_key: false,
            events: 0,
        }
    }

    fn run(&mut self, path: &mut PathStack) -> Result<(), Failure<K, S>> {
        loop {
            let b = match self.read()? {
                Byte(b) => b,
                EndOfInput => break,
            };
            if is_whitespace(b) {
                continue;
            }
            if !self.expect.allows(b) {
                return Err(unexpected(path, b).into());
            }

            match b {
                b'{' => self.open(path, NodeKind::Object)?,
                b'[' => self.open(path, NodeKind::Array)?,
                b'}' => self.close(path, NodeKind::Object)?,
                b']' => self.close(path, NodeKind::Array)?,
                b',' => self.comma(path),
                b':' => self.colon(),
                b'"' => self.string(path)?,
                b't' | b'f' | b'n' => self.literal(path, b)?,
                _ => self.number(path, b)?,
            }
        }

        if path.depth() > 0 {
            return Err(SyntaxError::UnbalancedNodes.into());
        }
        Ok(())
    }

    #[inline]
    fn read(&mut self) -> Result<PeekedByte, Failure<K, S>> {
        self.reader.read().map_err(ErrorSource::Input)
    }

    #[inline]
    fn read_in_token(&mut self) -> Result<u8, Failure<K, S>> {
        match self.read()? {
            Byte(b) => Ok(b),
            EndOfInput => Err(SyntaxError::UnexpectedEndOfInput.into()),
        }
    }

    fn emit(&mut self, path: &PathStack, value: &BStr) -> Result<(), Failure<K, S>> {
        self.events += 1;
        self.sink
            .event(path.path(), value)
            .map_err(ErrorSource::Sink)
    }

    fn emit_scratch(&mut self, path: &PathStack) -> Result<(), Failure<K, S>> {
        self.events += 1;
        self.sink
            .event(path.path(), self.scratch.as_bstr())
            .map_err(ErrorSource::Sink)
    }

    /// Where to go after a complete value.
    fn after_value(&mut self, path: &PathStack) {
        self.expect = if path.depth() == 0 {
            Expect::Nothing
        } else {
            Expect::CommaOrClose
        };
    }

    // ------------------------------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------------------------------

    fn open(&mut self, path: &mut PathStack, kind: NodeKind) -> Result<(), Failure<K, S>> {
        path.open(kind)
            .map_err(|e| ErrorSource::DepthExceeded { max: e.max })?;
        trace!(depth = path.depth(), ?kind, "open");
        self.emit(path, BStr::new(b""))?;
        path.descend();

        if kind == NodeKind::Object {
            self.in_key = true;
            self.expect = Expect::StringOrObjectClose;
        } else {
            self.in_key = false;
            self.expect = Expect::ValueOrArrayClose;
        }
        Ok(())
    }

    fn close(&mut self, path: &mut PathStack, kind: NodeKind) -> Result<(), Failure<K, S>> {
        let completed_child = self.expect == Expect::CommaOrClose;
        path.leave(kind, completed_child)?;
        trace!(depth = path.depth(), ?kind, "close");
        self.in_key = false;
        self.after_value(path);
        Ok(())
    }

    fn comma(&mut self, path: &mut PathStack) {
        path.next_sibling();
        if path.parent().is_some_and(|p| p.kind() == NodeKind::Object) {
            self.in_key = true;
            self.expect = Expect::String;
        } else {
            self.in_key = false;
            self.expect = Expect::Value;
        }
    }

    fn colon(&mut self) {
        self.in_key = false;
        self.expect = Expect::Value;
    }

    // ------------------------------------------------------------------------------------------------
    // Scalars
    // ------------------------------------------------------------------------------------------------

    fn literal(&mut self, path: &mut PathStack, first: u8) -> Result<(), Failure<K, S>> {
        let mut matcher = ExpectedLiteralBuffer::new(first);
        let literal = loop {
            let b = self.read_in_token()?;
            match matcher.step(b) {
                Step::NeedMore => {}
                Step::Done(literal) => break literal,
                Step::Reject => return Err(SyntaxError::InvalidCharacter(b).into()),
            }
        };

        path.set_kind(literal.kind());
        self.emit(path, BStr::new(literal.as_bytes()))?;
        self.after_value(path);
        Ok(())
    }

    fn number(&mut self, path: &mut PathStack, first: u8) -> Result<(), Failure<K, S>> {
        path.set_kind(NodeKind::Number);
        self.scratch.clear();
        self.scratch.push(first)?;
        loop {
            match self.read()? {
                Byte(b) if is_number_byte(b) => self.scratch.push(b)?,
                other => {
                    self.reader.unread(other);
                    break;
                }
            }
        }

        self.emit_scratch(path)?;
        self.after_value(path);
        Ok(())
    }

    fn string(&mut self, path: &mut PathStack) -> Result<(), Failure<K, S>> {
        path.set_kind(NodeKind::String);
        self.scan_string()?;

        if self.in_key {
            path.set_name(self.scratch.as_bytes())?;
            self.expect = Expect::Colon;
        } else {
            self.emit_scratch(path)?;
            self.after_value(path);
        }
        Ok(())
    }

    /// Decodes a string body into `scratch`, up to and including the closing
    /// quote.
    fn scan_string(&mut self) -> Result<(), Failure<K, S>> {
        self.scratch.clear();
        let mut escape = false;
        loop {
            let b = self.read_in_token()?;
            if b < 0x20 {
                return Err(SyntaxError::ControlCharacter(b).into());
            }

            if escape {
                escape = false;
                let decoded = match b {
                    b'"' | b'\\' | b'/' => b,
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        escape = self.unicode_escape()?;
                        continue;
                    }
                    _ => return Err(SyntaxError::InvalidEscape(b).into()),
                };
                self.scratch.push(decoded)?;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                return Ok(());
            } else {
                self.scratch.push(b)?;
            }
        }
    }

    /// Handles a `\u` escape whose `\u` has been consumed.
    ///
    /// A high surrogate looks ahead for a second `\u` escape to pair with.
    /// Returns `true` if the lookahead consumed a `\` that starts some other
    /// escape; the byte after it has been put back.
    fn unicode_escape(&mut self) -> Result<bool, Failure<K, S>> {
        let high = self.hex_unit()?;
        if !is_high_surrogate(high) {
            self.push_scalar(high)?;
            return Ok(false);
        }

        let next = self.read()?;
        if next != Byte(b'\\') {
            self.push_scalar(high)?;
            self.reader.unread(next);
            return Ok(false);
        }
        let next = self.read()?;
        if next != Byte(b'u') {
            self.push_scalar(high)?;
            self.reader.unread(next);
            return Ok(true);
        }

        let low = self.hex_unit()?;
        match pair_surrogates(high, low) {
            Surrogates::Combined(cp) => self.push_scalar(cp)?,
            Surrogates::Unpaired(high, low) => {
                self.push_scalar(high)?;
                self.push_scalar(low)?;
            }
        }
        Ok(false)
    }

    fn hex_unit(&mut self) -> Result<u32, Failure<K, S>> {
        loop {
            let b = self.read_in_token()?;
            if let Some(unit) = self.unicode_escape.feed(b)? {
                return Ok(unit);
            }
        }
    }

    fn push_scalar(&mut self, cp: u32) -> Result<(), Failure<K, S>> {
        let mut buf = [0; 4];
        self.scratch.extend_from_slice(encode_utf8(cp, &mut buf))?;
        Ok(())
    }
}
