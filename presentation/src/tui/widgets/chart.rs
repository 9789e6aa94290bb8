//! Chart widget — association scatter by analysis category
//!
//! One scatter dataset per gene plus a dashed-looking guide line at the
//! significance threshold, mirroring the table's metric and scale settings.

use crate::tui::state::TuiState;
use phenoscope_domain::plot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

/// Colors cycled across gene series.
const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Abbreviated category labels that fit the x axis.
const X_LABELS: [&str; 4] = ["Continuous", "CV", "Self-rep", "Phecodes"];

pub struct ChartWidget<'a> {
    state: &'a TuiState,
}

impl<'a> ChartWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let params = &self.state.params;
        let data = plot::prepare(
            &self.state.table,
            params.metric,
            params.limit,
            params.log_scale,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} by analysis type ", data.y_label()));

        if data.is_empty() {
            block.render(area, buf);
            return;
        }

        // Owned point buffers; Dataset borrows slices
        let series_points: Vec<Vec<(f64, f64)>> = data
            .series
            .iter()
            .map(|s| s.points.iter().map(|p| (p.x, p.y)).collect())
            .collect();
        let guide_points = [(-0.5, data.guide_y), (3.5, data.guide_y)];

        let mut datasets: Vec<Dataset> = data
            .series
            .iter()
            .zip(&series_points)
            .enumerate()
            .map(|(index, (series, points))| {
                let name = if params.show_legend {
                    series.gene.clone()
                } else {
                    String::new()
                };
                Dataset::default()
                    .name(name)
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(SERIES_COLORS[index % SERIES_COLORS.len()]))
                    .data(points)
            })
            .collect();

        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&guide_points),
        );

        let (y_min, y_max) = data.y_bounds;
        let y_span = (y_max - y_min).max(1e-9);
        let x_axis = Axis::default()
            .bounds([-0.5, 3.5])
            .labels(X_LABELS.iter().map(|l| Span::raw(*l)).collect::<Vec<_>>());
        let y_axis = Axis::default()
            .title(data.y_label())
            .bounds([y_min, y_max + y_span * 0.05])
            .labels(vec![
                Span::raw(format_bound(y_min)),
                Span::raw(format_bound(y_max)),
            ]);

        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

fn format_bound(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(0.05), "0.05");
        assert_eq!(format_bound(300.0), "300");
    }
}
