#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// The maximum number of shaped runs and text measurements kept per render
    /// before the text caches are reset.
    ///
    /// - **Higher values**: fewer re-shapes for documents that repeat the same
    ///   text at many widths, at the cost of memory.
    /// - **Lower values**: lower memory usage, but text may be shaped more than
    ///   once per render.
    ///
    /// Defaults to `10000`.
    pub cache_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 10000,
        }
    }
}
