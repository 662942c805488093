//! The receiving end of parse events.
//!
//! The parser calls [`EventSink::event`] once per container open (with an
//! empty value, before any child) and once per scalar. Nothing is reported
//! when a container closes. The path and value are borrowed from the parser
//! and only valid during the call; sinks copy what they keep.

use alloc::{borrow::ToOwned, vec::Vec};
use core::fmt;

use bstr::{BStr, BString};

use crate::path::{NodeKind, PathNode};

pub trait EventSink {
    type Error: fmt::Debug + fmt::Display;

    /// Receives one event. `path` runs from the root slot to the node the
    /// event is about, inclusive.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the parse; it resurfaces as
    /// [`ErrorKind::Aborted`](crate::ErrorKind::Aborted).
    fn event(&mut self, path: &[PathNode], value: &BStr) -> Result<(), Self::Error>;
}

impl<F, E> EventSink for F
where
    F: FnMut(&[PathNode], &BStr) -> Result<(), E>,
    E: fmt::Debug + fmt::Display,
{
    type Error = E;

    #[inline]
    fn event(&mut self, path: &[PathNode], value: &BStr) -> Result<(), E> {
        self(path, value)
    }
}

/// An event with its path copied out of the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedEvent {
    pub path: Vec<PathNode>,
    pub value: BString,
}

impl OwnedEvent {
    /// The kind of the node the event is about.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.path.last().map(PathNode::kind).unwrap_or_default()
    }

    /// Whether this reports a `{` or `[` rather than a scalar.
    #[must_use]
    pub fn is_container_open(&self) -> bool {
        self.kind().is_container()
    }
}

/// A sink that keeps a copy of every event.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<OwnedEvent>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[OwnedEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<OwnedEvent> {
        self.events
    }
}

impl EventSink for Recorder {
    type Error = core::convert::Infallible;

    fn event(&mut self, path: &[PathNode], value: &BStr) -> Result<(), Self::Error> {
        self.events.push(OwnedEvent {
            path: path.to_vec(),
            value: value.to_owned(),
        });
        Ok(())
    }
}
