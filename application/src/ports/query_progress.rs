//! Per-gene progress port.
//!
//! Drives the TUI log pane and the one-shot console reporter. All methods
//! are fire-and-forget; implementations must not block.

/// Observer for the per-gene phases of a query.
pub trait QueryProgressNotifier: Send + Sync {
    /// A gene's resolve/fetch round trip is starting.
    fn on_gene_started(&self, identifier: &str);

    /// Results for a gene arrived; `rows` may be zero.
    fn on_gene_loaded(&self, symbol: &str, rows: usize);

    /// The upstream knows no gene under this identifier; it was skipped.
    fn on_gene_unresolved(&self, identifier: &str);

    /// The resolve or fetch for this gene failed; the query continues.
    fn on_gene_failed(&self, identifier: &str, message: &str);

    /// The outcome catalog could not be fetched; labels fall back.
    fn on_catalog_unavailable(&self, message: &str);
}

/// No-op notifier for tests and headless runs.
pub struct NoQueryProgress;

impl QueryProgressNotifier for NoQueryProgress {
    fn on_gene_started(&self, _identifier: &str) {}
    fn on_gene_loaded(&self, _symbol: &str, _rows: usize) {}
    fn on_gene_unresolved(&self, _identifier: &str) {}
    fn on_gene_failed(&self, _identifier: &str, _message: &str) {}
    fn on_catalog_unavailable(&self, _message: &str) {}
}
