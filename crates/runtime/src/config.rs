//! Preview service configuration.

/// Tuning knobs for [`PreviewService`](crate::PreviewService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Keep evaluated records per snapshot digest and declaration.
    pub cache_records: bool,
    /// Upper bound on evaluations running at once in a batch.
    pub max_concurrency: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_records: true,
            max_concurrency: 8,
        }
    }
}

impl ServiceConfig {
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.cache_records = false;
        self
    }

    /// Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }
}
