use crate::io::consts::DEFAULT_MAX_NESTING_DEPTH;

/// Knobs for a decode pass.
///
/// # Examples
///
/// ```rust
/// use voxbridge::io::DecodeOptions;
///
/// let options = DecodeOptions::default().with_max_nesting_depth(8);
/// assert_eq!(options.max_nesting_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest chunk nesting accepted; top-level chunks are depth 0.
    pub max_nesting_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub const fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}
