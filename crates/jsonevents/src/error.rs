use alloc::collections::TryReserveError;
use core::convert::Infallible;

use thiserror::Error;

/// A parse failure together with the input position where it was detected.
///
/// `K` is the error type of the [`EventSink`](crate::EventSink) and `I` the
/// error type of the [`ByteSource`](crate::ByteSource); both default to
/// [`Infallible`].
#[derive(Error, Debug, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParserError<K = Infallible, I = Infallible> {
    pub(crate) source: ErrorSource<K, I>,
    /// Number of bytes consumed before the offending byte.
    pub offset: usize,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column of the offending byte, counted in bytes.
    pub column: usize,
}

impl<K, I> ParserError<K, I> {
    /// The underlying cause.
    #[must_use]
    pub fn error_source(&self) -> &ErrorSource<K, I> {
        &self.source
    }

    #[must_use]
    pub fn into_source(self) -> ErrorSource<K, I> {
        self.source
    }

    /// Coarse classification of the failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// The grammar violation, if this is a syntax error.
    #[must_use]
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ErrorSource<K, I> {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Alloc(#[from] AllocError),
    #[error("max node depth reached (limit {max})")]
    DepthExceeded { max: usize },
    #[error("aborted by event sink: {0}")]
    Sink(K),
    #[error("input error: {0}")]
    Input(I),
}

impl<K, I> ErrorSource<K, I> {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorSource::Syntax(_) => ErrorKind::InvalidSyntax,
            ErrorSource::Alloc(_) => ErrorKind::OutOfMemory,
            ErrorSource::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            ErrorSource::Sink(_) => ErrorKind::Aborted,
            ErrorSource::Input(_) => ErrorKind::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Allocation failure or length arithmetic overflow.
    OutOfMemory,
    /// Nesting went past the configured maximum depth.
    DepthExceeded,
    /// The input is not well-formed JSON.
    InvalidSyntax,
    /// The event sink asked the parser to stop.
    Aborted,
    /// The byte source failed.
    Input,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("invalid character '{}'", .0.escape_ascii())]
    InvalidCharacter(u8),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unbalanced nodes")]
    UnbalancedNodes,
    #[error("object member, but not in an object")]
    MemberOutsideObject,
    #[error("invalid codepoint: '{}' is not a hex digit", .0.escape_ascii())]
    InvalidCodepoint(u8),
    #[error("invalid escape character '{}'", .0.escape_ascii())]
    InvalidEscape(u8),
    #[error("control character 0x{0:02X} in string")]
    ControlCharacter(u8),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    #[error("buffer length overflow")]
    Overflow,
    #[error("cannot allocate enough memory")]
    OutOfMemory,
}

impl From<TryReserveError> for AllocError {
    fn from(_: TryReserveError) -> Self {
        AllocError::OutOfMemory
    }
}
