//! Results panel widget — per-category tabs and the tidy table

use crate::tui::state::{TuiState, ViewPhase};
use phenoscope_domain::AnalysisKind;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Widget},
};

pub struct ResultsPanelWidget<'a> {
    state: &'a TuiState,
}

impl<'a> ResultsPanelWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self.state.phase {
            ViewPhase::Idle => Some("Run a query to load phenotypes (Enter)."),
            ViewPhase::Loading if self.state.table.is_empty() => Some("Loading..."),
            _ if self.state.table.is_empty() => {
                // Explicit empty state, not an error
                Some("No data. Adjust genes, categories, or threshold.")
            }
            _ => None,
        }
    }
}

impl Widget for ResultsPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Phenotypes ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 {
            return;
        }

        // -- Tabs --
        let titles: Vec<Line> = AnalysisKind::ORDER
            .iter()
            .map(|k| Line::from(k.label()))
            .collect();
        let tabs_area = Rect { height: 1, ..inner };
        Tabs::new(titles)
            .select(self.state.active_tab)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .render(tabs_area, buf);

        let body = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };

        if let Some(text) = self.placeholder() {
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .render(body, buf);
            return;
        }

        // -- Table --
        let rows = self.state.visible_rows(self.state.active_kind());
        if rows.is_empty() {
            Paragraph::new("No rows for this category at the current threshold.")
                .style(Style::default().fg(Color::DarkGray))
                .render(body, buf);
            return;
        }

        let visible_height = body.height.saturating_sub(1) as usize; // minus header
        let max_scroll = rows.len().saturating_sub(visible_height.max(1));
        let offset = self.state.table_scroll.min(max_scroll);

        let header = Row::new(vec!["Gene", "Outcome ID", "Description", "p", "q"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let table_rows: Vec<Row> = rows
            .iter()
            .skip(offset)
            .take(visible_height)
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.gene.clone()),
                    Cell::from(row.outcome_id.clone()),
                    Cell::from(row.description.clone()),
                    Cell::from(format_stat(row.p)),
                    Cell::from(format_stat(row.q)),
                ])
            })
            .collect();

        Table::new(
            table_rows,
            [
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Min(24),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .render(body, buf);
    }
}

fn format_stat(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2e}")).unwrap_or_default()
}
