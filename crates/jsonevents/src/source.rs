//! Pull interface over the input bytes.

use core::{convert::Infallible, fmt};

/// A strictly sequential supply of bytes.
pub trait ByteSource {
    type Error: fmt::Debug + fmt::Display;

    /// Returns the next byte, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Whatever the underlying input fails with; the parse stops with
    /// [`ErrorKind::Input`](crate::ErrorKind::Input).
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).next_byte()
    }
}

/// Bytes of an in-memory document.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// The bytes not read yet.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ByteSource for SliceSource<'_> {
    type Error = Infallible;

    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>, Infallible> {
        let byte = self.bytes.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

#[cfg(feature = "std")]
pub use io_source::IoSource;

#[cfg(feature = "std")]
mod io_source {
    use std::io::{self, BufReader, Read};

    use super::ByteSource;

    /// Bytes of a [`Read`] implementation, read through a [`BufReader`].
    ///
    /// Reads interrupted by a signal are retried.
    #[derive(Debug)]
    pub struct IoSource<R> {
        bytes: io::Bytes<BufReader<R>>,
    }

    impl<R: Read> IoSource<R> {
        pub fn new(reader: R) -> Self {
            Self {
                bytes: BufReader::new(reader).bytes(),
            }
        }
    }

    impl<R: Read> ByteSource for IoSource<R> {
        type Error = io::Error;

        #[inline]
        fn next_byte(&mut self) -> io::Result<Option<u8>> {
            self.bytes.next().transpose()
        }
    }
}
