//! Chart preparation: metric scaling and point layout.
//!
//! The chart shows one point per association, grouped on the x axis by
//! analysis category and colored per gene. Values are optionally −log10
//! transformed; zeros are clamped to an epsilon first so the transform
//! stays finite.

use crate::analysis::{AnalysisKind, Metric};
use crate::association::table::ResultTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};

/// Clamp floor applied before the −log10 transform.
pub const EPSILON: f64 = 1e-300;
/// Half-width of the uniform x jitter around each category index.
pub const JITTER_SPREAD: f64 = 0.09;
/// Fixed jitter seed: identical tables always render identically.
pub const JITTER_SEED: u64 = 0;
/// Significance guide line drawn across the chart.
pub const GUIDE_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// All points of one gene, in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneSeries {
    pub gene: String,
    pub points: Vec<PlotPoint>,
}

/// Display-ready chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    /// One series per gene, sorted by gene name.
    pub series: Vec<GeneSeries>,
    pub metric: Metric,
    pub log_scale: bool,
    /// y position of the significance guide line.
    pub guide_y: f64,
    /// Inclusive y range covering every point and the guide line.
    pub y_bounds: (f64, f64),
}

impl PlotData {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Axis title, e.g. `−log10(p)` or plain `q`.
    pub fn y_label(&self) -> String {
        if self.log_scale {
            format!("-log10({})", self.metric.column())
        } else {
            self.metric.column().to_string()
        }
    }
}

/// Clamp into [EPSILON, 1.0] and optionally −log10 transform.
pub fn scale_value(value: f64, log_scale: bool) -> f64 {
    let clamped = value.clamp(EPSILON, 1.0);
    if log_scale { -clamped.log10() } else { clamped }
}

/// Build chart data from a loaded table.
///
/// Keeps rows with the metric present and a known category, most
/// significant first, at most `limit` per (gene, category) pair.
pub fn prepare(table: &ResultTable, metric: Metric, limit: usize, log_scale: bool) -> PlotData {
    let limit = limit.max(1);
    let guide_y = scale_value(GUIDE_THRESHOLD, log_scale);

    let sorted = table.sorted_by_significance();
    let mut per_group: HashMap<(String, AnalysisKind), usize> = HashMap::new();
    let mut grouped: BTreeMap<String, Vec<(AnalysisKind, f64)>> = BTreeMap::new();

    for row in sorted.rows() {
        let (Some(kind), Some(value)) = (row.kind, row.metric(metric)) else {
            continue;
        };
        let count = per_group.entry((row.gene.clone(), kind)).or_insert(0);
        *count += 1;
        if *count > limit {
            continue;
        }
        grouped.entry(row.gene.clone()).or_default().push((kind, value));
    }

    let mut rng = StdRng::seed_from_u64(JITTER_SEED);
    let mut y_min = guide_y;
    let mut y_max = guide_y;
    let series = grouped
        .into_iter()
        .map(|(gene, values)| {
            let points = values
                .into_iter()
                .map(|(kind, value)| {
                    let jitter: f64 = rng.gen_range(-JITTER_SPREAD..=JITTER_SPREAD);
                    let y = scale_value(value, log_scale);
                    y_min = y_min.min(y);
                    y_max = y_max.max(y);
                    PlotPoint {
                        x: kind.order_index() as f64 + jitter,
                        y,
                    }
                })
                .collect();
            GeneSeries { gene, points }
        })
        .collect();

    PlotData {
        series,
        metric,
        log_scale,
        guide_y,
        y_bounds: (y_min.min(0.0), y_max),
    }
}
