//! A single-pass, constant-memory JSON event parser.
//!
//! The parser reads a JSON document byte by byte and reports an event for
//! every container it opens and every scalar it finishes, each carrying the
//! full path from the root. Nothing beyond the current token and the path is
//! buffered, so memory stays bounded regardless of document size.
//!
//! ```rust
//! use jsonevents::{parse_slice, PathNode};
//! use bstr::BStr;
//!
//! let mut lines = Vec::new();
//! let mut sink = |path: &[PathNode], value: &BStr| -> Result<(), std::convert::Infallible> {
//!     let names: Vec<String> = path.iter().map(|n| n.name().to_string()).collect();
//!     lines.push(format!("{}={}", names.join("/"), value));
//!     Ok(())
//! };
//! parse_slice(br#"{"user":{"name":"ada","tags":["x"]}}"#, &mut sink).unwrap();
//!
//! assert_eq!(lines, ["=", "/user=", "/user/name=ada", "/user/tags=", "/user/tags/=x"]);
//! ```
//!
//! With the default `std` feature, [`tsv::TsvWriter`] renders events as the
//! tab-separated records of the `json2tsv` tool.

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod options;
mod parser;
mod path;
mod sink;
mod source;

#[cfg(feature = "std")]
pub mod tsv;

#[cfg(test)]
mod tests;

pub use error::{AllocError, ErrorKind, ErrorSource, ParserError, SyntaxError};
pub use options::{MAX_NODE_DEPTH, ParserOptions};
#[cfg(feature = "std")]
pub use parser::parse_reader;
pub use parser::{Parser, parse_slice};
pub use path::{NodeKind, PathNode};
pub use sink::{EventSink, OwnedEvent, Recorder};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::{ByteSource, SliceSource};
