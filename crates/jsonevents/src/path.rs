//! The chain of nodes from the document root to the value being parsed.
//!
//! A path is a slice of [`PathNode`]s. Index 0 is the root slot; each
//! container adds one slot for its children. The last node of a path always
//! describes the value the event is about: its [`kind`](PathNode::kind), and
//! the object key it sits under (empty for array elements and the root).
//! Every container node also carries the number of its children completed so
//! far, which for arrays is the index of the child currently being parsed.
//!
//! ```text
//! {"a":[10,20]}
//!
//! event for 20:  [ {Object, "", 0}, {Array, "a", 1}, {Number, "", 0} ]
//! ```

use alloc::vec::Vec;
use core::fmt;

use bstr::{BStr, BString, ByteSlice};

use crate::{
    error::{AllocError, SyntaxError},
    parser::scratch::ensure_capacity,
};

/// The type of a path node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    Array,
    Object,
    String,
    Bool,
    #[default]
    Null,
    Number,
}

impl NodeKind {
    /// One-byte tag used in TSV records.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            NodeKind::Array => b'a',
            NodeKind::Object => b'o',
            NodeKind::String => b's',
            NodeKind::Bool => b'b',
            NodeKind::Null => b'?',
            NodeKind::Number => b'n',
        }
    }

    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }
}

/// One slot of a path.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PathNode {
    pub(crate) kind: NodeKind,
    pub(crate) name: BString,
    pub(crate) child_count: usize,
}

impl PathNode {
    #[must_use]
    pub fn new(kind: NodeKind, name: impl Into<BString>, child_count: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            child_count,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The object key this node was reached through; empty for array
    /// elements and the root.
    #[must_use]
    pub fn name(&self) -> &BStr {
        self.name.as_bstr()
    }

    /// Number of children completed so far. For an array this is the index
    /// of the element being parsed.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.child_count
    }
}

impl fmt::Debug for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}, {})", self.kind, self.name, self.child_count)
    }
}

/// Opening a container would exceed the stack capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DepthExceeded {
    pub(crate) max: usize,
}

/// Fixed-capacity stack of [`PathNode`]s.
///
/// `nodes[..=depth]` is the live path. Slots above `depth` are kept after a
/// container closes so that their name buffers get reused.
#[derive(Debug)]
pub(crate) struct PathStack {
    nodes: Vec<PathNode>,
    depth: usize,
    capacity: usize,
}

impl PathStack {
    /// Creates a stack holding at most `capacity` nodes, the root slot
    /// included. All slots are reserved up front so that entering a
    /// container never reallocates.
    pub(crate) fn new(capacity: usize) -> Result<Self, AllocError> {
        let capacity = capacity.max(1);
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;
        nodes.push(PathNode::default());
        Ok(Self {
            nodes,
            depth: 0,
            capacity,
        })
    }

    /// Current nesting depth; 0 outside any container.
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// The live path, root first.
    #[inline]
    pub(crate) fn path(&self) -> &[PathNode] {
        &self.nodes[..=self.depth]
    }

    #[inline]
    pub(crate) fn current(&self) -> &PathNode {
        &self.nodes[self.depth]
    }

    /// The container holding the current slot.
    #[inline]
    pub(crate) fn parent(&self) -> Option<&PathNode> {
        self.depth.checked_sub(1).map(|i| &self.nodes[i])
    }

    /// Records the scalar kind of the value about to be reported in the
    /// current slot. The slot may have held a closed container sibling, so
    /// its count is cleared.
    #[inline]
    pub(crate) fn set_kind(&mut self, kind: NodeKind) {
        let node = &mut self.nodes[self.depth];
        node.kind = kind;
        node.child_count = 0;
    }

    /// Stores an object key as the name of the current slot.
    pub(crate) fn set_name(&mut self, key: &[u8]) -> Result<(), AllocError> {
        let name: &mut Vec<u8> = &mut self.nodes[self.depth].name;
        name.clear();
        ensure_capacity(name, key.len())?;
        name.extend_from_slice(key);
        Ok(())
    }

    /// Turns the current slot into a container of `kind` without descending.
    ///
    /// Fails when the path is already at capacity; nothing changes then.
    pub(crate) fn open(&mut self, kind: NodeKind) -> Result<(), DepthExceeded> {
        if self.depth + 1 >= self.capacity {
            return Err(DepthExceeded { max: self.capacity });
        }
        let node = &mut self.nodes[self.depth];
        node.kind = kind;
        node.child_count = 0;
        Ok(())
    }

    /// Pushes a fresh child slot under the container opened by
    /// [`open`](Self::open).
    pub(crate) fn descend(&mut self) {
        debug_assert!(self.current().kind.is_container());
        self.depth += 1;
        if self.depth == self.nodes.len() {
            // Never reallocates: `new` reserved every slot.
            self.nodes.push(PathNode::default());
        } else {
            let slot = &mut self.nodes[self.depth];
            slot.kind = NodeKind::default();
            slot.name.clear();
            slot.child_count = 0;
        }
    }

    /// Opens a container of `kind` and descends into it.
    #[cfg(test)]
    pub(crate) fn enter(&mut self, kind: NodeKind) -> Result<(), DepthExceeded> {
        self.open(kind)?;
        self.descend();
        Ok(())
    }

    /// Counts the child just completed and moves on to its next sibling.
    pub(crate) fn next_sibling(&mut self) {
        if let Some(i) = self.depth.checked_sub(1) {
            self.nodes[i].child_count += 1;
        }
    }

    /// Pops the child slot of a container closed by a `]` (`kind` Array) or a
    /// `}` (`kind` Object). `completed_child` tells whether a child was
    /// finished right before the closer; it is counted then.
    pub(crate) fn leave(&mut self, kind: NodeKind, completed_child: bool) -> Result<(), SyntaxError> {
        match self.parent() {
            Some(parent) if parent.kind == kind => {}
            _ => return Err(SyntaxError::UnbalancedNodes),
        }
        self.depth -= 1;
        if completed_child {
            self.nodes[self.depth].child_count += 1;
        }
        Ok(())
    }
}
