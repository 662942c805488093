/// Hard upper bound on the number of path nodes, root slot included.
pub const MAX_NODE_DEPTH: usize = 64;

/// Configuration options for the event parser.
///
/// # Examples
///
/// ```rust
/// use jsonevents::{Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     max_depth: 16,
///     ..Default::default()
/// });
/// assert_eq!(parser.max_depth(), 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum number of path nodes, the root slot included.
    ///
    /// Opening a container when the path already holds this many nodes fails
    /// with [`ErrorKind::DepthExceeded`](crate::ErrorKind::DepthExceeded).
    /// Values above [`MAX_NODE_DEPTH`] are clamped to it and values below 1
    /// behave as 1 (only bare top-level scalars are accepted).
    ///
    /// # Default
    ///
    /// [`MAX_NODE_DEPTH`]
    pub max_depth: usize,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_NODE_DEPTH,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

impl ParserOptions {
    pub(crate) fn effective_max_depth(&self) -> usize {
        self.max_depth.clamp(1, MAX_NODE_DEPTH)
    }
}
