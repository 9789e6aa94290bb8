//! Log panel widget — tail of the query notices

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct LogPanelWidget<'a> {
    state: &'a TuiState,
}

impl<'a> LogPanelWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl Widget for LogPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Log ");
        let inner_height = block.inner(area).height as usize;

        let lines = &self.state.log_lines;
        let skip = lines.len().saturating_sub(inner_height);
        let tail: Vec<Line> = lines
            .iter()
            .skip(skip)
            .map(|line| {
                let style = if line.starts_with('!') || line.contains("ERROR") {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::styled(line.clone(), style)
            })
            .collect();

        if tail.is_empty() {
            Paragraph::new("…")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
        } else {
            Paragraph::new(tail).block(block).render(area, buf);
        }
    }
}
