//! Query panel widget — gene input, category filters, and query knobs

use crate::tui::mode::InputMode;
use crate::tui::state::TuiState;
use phenoscope_domain::AnalysisKind;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct QueryPanelWidget<'a> {
    state: &'a TuiState,
}

impl<'a> QueryPanelWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn gene_input_text(&self) -> String {
        // A thin cursor marker keeps the input readable while editing
        if self.state.mode == InputMode::Insert {
            let mut text = self.state.gene_input.clone();
            let pos = self.state.cursor_pos.min(text.len());
            text.insert(pos, '▏');
            text
        } else {
            self.state.gene_input.clone()
        }
    }
}

impl Widget for QueryPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // gene input
                Constraint::Length(6), // categories
                Constraint::Min(0),    // knobs
            ])
            .split(area);

        // -- Gene input --
        let input_style = if self.state.mode == InputMode::Insert {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        Paragraph::new(self.gene_input_text())
            .style(input_style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Genes (comma separated, i to edit) "),
            )
            .render(chunks[0], buf);

        // -- Category filter --
        let mut category_lines = Vec::new();
        for (index, kind) in AnalysisKind::ORDER.iter().enumerate() {
            let selected = self.state.categories.contains(kind);
            let marker = if selected { "[x]" } else { "[ ]" };
            let style = if selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            category_lines.push(Line::from(Span::styled(
                format!("{marker} {} {}", index + 1, kind.label()),
                style,
            )));
        }
        Paragraph::new(category_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Categories (1-4, empty = all) "),
            )
            .render(chunks[1], buf);

        // -- Query knobs --
        let params = &self.state.params;
        let knob_lines = vec![
            Line::from(format!("subset (s):    {}", self.state.subset.label())),
            Line::from(format!("metric (m):    {}", params.metric.label())),
            Line::from(format!("threshold (t): {}", params.threshold)),
            Line::from(format!(
                "scale (o):     {}",
                if params.log_scale { "-log10" } else { "linear" }
            )),
            Line::from(format!(
                "legend (L):    {}",
                if params.show_legend { "on" } else { "off" }
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Enter: run query   e: export CSV",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ];
        Paragraph::new(knob_lines)
            .block(Block::default().borders(Borders::ALL).title(" Query "))
            .render(chunks[2], buf);
    }
}
