//! indicatif progress reporter for one-shot mode.
//!
//! Shows a spinner while genes resolve and prints one line per finished
//! gene above it, so the notices survive after the spinner clears.

use indicatif::{ProgressBar, ProgressStyle};
use phenoscope_application::QueryProgressNotifier;
use std::time::Duration;

pub struct ProgressReporter {
    spinner: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner }
    }

    /// Clear the spinner once the query is done.
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryProgressNotifier for ProgressReporter {
    fn on_gene_started(&self, identifier: &str) {
        self.spinner.set_message(format!("Loading {identifier}..."));
    }

    fn on_gene_loaded(&self, symbol: &str, rows: usize) {
        self.spinner.println(format!("{symbol}: {rows} rows."));
    }

    fn on_gene_unresolved(&self, identifier: &str) {
        self.spinner
            .println(format!("! Could not resolve '{identifier}' - skipping."));
    }

    fn on_gene_failed(&self, identifier: &str, message: &str) {
        self.spinner.println(format!("{identifier}: ERROR {message}"));
    }

    fn on_catalog_unavailable(&self, message: &str) {
        self.spinner
            .println(format!("! Outcome catalog unavailable: {message}"));
    }
}
