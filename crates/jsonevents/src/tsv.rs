//! Line-per-event TSV rendering of parse events.
//!
//! Each event becomes one record:
//!
//! ```text
//! <path>\t<type tag>\t<value>\n
//! ```
//!
//! Every object on the path contributes `.` after its name and every array
//! `[]` (or `[index]` with [`TsvOptions::show_indices`]), except that a
//! container's own marker is left off its open event. `{"a":[1]}` renders as
//!
//! ```text
//! \to\t
//! .a\ta\t
//! .a[]\tn\t1
//! ```
//!
//! (tabs shown as `\t`).
//!
//! Names and values escape `\n`, `\t` and `\\`; other control bytes are
//! dropped.

use std::io::{self, Write};

use bstr::BStr;

use crate::{
    path::{NodeKind, PathNode},
    sink::EventSink,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TsvOptions {
    /// Render array steps as `[index]` instead of `[]`.
    pub show_indices: bool,
}

/// Writes `bytes` with `\n`, `\t` and `\\` escaped and other control bytes
/// removed.
pub fn write_escaped<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escaped: &[u8] = match b {
            b'\n' => b"\\n",
            b'\t' => b"\\t",
            b'\\' => b"\\\\",
            0x00..=0x1F | 0x7F => b"",
            _ => continue,
        };
        out.write_all(&bytes[start..i])?;
        out.write_all(escaped)?;
        start = i + 1;
    }
    out.write_all(&bytes[start..])
}

/// Writes the record for one event.
///
/// # Errors
///
/// Only errors from `out`.
pub fn write_record<W: Write + ?Sized>(
    out: &mut W,
    path: &[PathNode],
    value: &[u8],
    options: TsvOptions,
) -> io::Result<()> {
    let Some(last) = path.last() else {
        return Ok(());
    };

    for (i, node) in path.iter().enumerate() {
        write_escaped(out, &node.name)?;
        if i + 1 == path.len() && node.kind.is_container() {
            continue;
        }
        match node.kind {
            NodeKind::Object => out.write_all(b".")?,
            NodeKind::Array if options.show_indices => write!(out, "[{}]", node.child_count)?,
            NodeKind::Array => out.write_all(b"[]")?,
            _ => {}
        }
    }

    out.write_all(&[b'\t', last.kind.tag(), b'\t'])?;
    write_escaped(out, value)?;
    out.write_all(b"\n")
}

/// An [`EventSink`] writing one TSV record per event.
///
/// Writes go straight to `W`; wrap it in a [`std::io::BufWriter`] for
/// anything but in-memory output.
#[derive(Debug)]
pub struct TsvWriter<W> {
    out: W,
    options: TsvOptions,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(out: W, options: TsvOptions) -> Self {
        Self { out, options }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> EventSink for TsvWriter<W> {
    type Error = io::Error;

    fn event(&mut self, path: &[PathNode], value: &BStr) -> io::Result<()> {
        write_record(&mut self.out, path, value, self.options)
    }
}
