/// Edges between two progress notifications when no interval is given.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Knobs for graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Notify the progress sink every this many edges. 0 disables notifications.
    pub progress_interval: u64,
}

impl BuildConfig {
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Whether `edges_processed` lands on a notification boundary.
    pub(crate) fn is_checkpoint(&self, edges_processed: u64) -> bool {
        self.progress_interval != 0 && edges_processed % self.progress_interval == 0
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
