use tracing::info;

/// Observer notified periodically while a graph is being built.
///
/// Purely observational: a sink cannot influence what gets ingested.
pub trait ProgressSink {
    fn progress(&mut self, edges_processed: u64);
}

impl<F: FnMut(u64)> ProgressSink for F {
    fn progress(&mut self, edges_processed: u64) {
        self(edges_processed)
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&mut self, _edges_processed: u64) {}
}

/// Logs each notification as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn progress(&mut self, edges_processed: u64) {
        info!(edges = edges_processed, "edges processed");
    }
}
