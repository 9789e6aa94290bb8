//! Query display parameters.
//!
//! [`QueryParams`] groups the knobs that shape how a loaded table is
//! displayed: row limits, the selected metric, the significance threshold,
//! and chart options. These are application-layer concerns, not domain
//! policy — the domain operations take them as plain arguments.

use phenoscope_domain::{InputError, Metric, validate_threshold};
use serde::{Deserialize, Serialize};

/// Display parameters applied to a loaded result table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueryParams {
    /// Maximum rows per gene per category in tables and the chart.
    pub limit: usize,
    /// Statistic driving thresholding, sorting, and the chart y axis.
    pub metric: Metric,
    /// Significance cutoff; rows with `metric >= threshold` are hidden.
    pub threshold: f64,
    /// Render the chart y axis as −log10(metric).
    pub log_scale: bool,
    /// Show the per-gene legend on the chart.
    pub show_legend: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            // Effectively "all rows" unless the user narrows it
            limit: 1_000_000,
            metric: Metric::P,
            threshold: 0.05,
            log_scale: true,
            show_legend: true,
        }
    }
}

impl QueryParams {
    // ==================== Builder Methods ====================

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_log_scale(mut self, log_scale: bool) -> Self {
        self.log_scale = log_scale;
        self
    }

    pub fn with_show_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    /// Validate user-supplied values (threshold range, limit floor).
    pub fn validate(&self) -> Result<(), InputError> {
        validate_threshold(self.threshold)?;
        Ok(())
    }
}
