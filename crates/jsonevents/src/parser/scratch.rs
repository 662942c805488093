//! Growable byte accumulator for literals of unbounded length.
//!
//! The parser reads one byte at a time, so string and number literals are
//! assembled in a [`ScratchBuffer`] that is reused for every token of a parse.
//! Clearing only resets the length; capacity is kept so that the buffer
//! settles at the size of the largest literal seen.
//!
//! Growth goes through [`ensure_capacity`], which never aborts the process:
//! length overflow is reported as [`AllocError::Overflow`] and a failed
//! allocation as [`AllocError::OutOfMemory`].

use alloc::vec::Vec;

use bstr::BStr;

use crate::error::AllocError;

/// Smallest capacity handed out on the first growth.
const MIN_CAPACITY: usize = 64;

/// Makes room for `extra` more bytes in `buf`.
///
/// Capacity grows geometrically (doubling, starting at [`MIN_CAPACITY`]) so
/// that pushing bytes one by one is amortized O(1).
pub(crate) fn ensure_capacity(buf: &mut Vec<u8>, extra: usize) -> Result<(), AllocError> {
    let need = buf.len().checked_add(extra).ok_or(AllocError::Overflow)?;
    if need <= buf.capacity() {
        return Ok(());
    }

    let target = need
        .checked_next_power_of_two()
        .unwrap_or(need)
        .max(MIN_CAPACITY);
    buf.try_reserve_exact(target - buf.len())?;
    Ok(())
}

#[derive(Debug, Default)]
pub(crate) struct ScratchBuffer {
    bytes: Vec<u8>,
}

impl ScratchBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forgets the contents but keeps the allocation.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub(crate) fn ensure(&mut self, extra: usize) -> Result<(), AllocError> {
        ensure_capacity(&mut self.bytes, extra)
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Result<(), AllocError> {
        self.ensure(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
        self.ensure(bytes.len())?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub(crate) fn as_bstr(&self) -> &BStr {
        BStr::new(&self.bytes)
    }
}
