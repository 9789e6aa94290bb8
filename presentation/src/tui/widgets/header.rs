//! Header widget — title, query phase, and spinner

use crate::tui::state::{TuiState, ViewPhase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = Span::styled(
            " phenoscope — ExPheWAS explorer ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let status = match &self.state.phase {
            ViewPhase::Loading => {
                let frame = SPINNER_FRAMES[self.state.spinner_frame % SPINNER_FRAMES.len()];
                Span::styled(
                    format!("{frame} loading"),
                    Style::default().fg(Color::Yellow),
                )
            }
            ViewPhase::ErrorShown(notice) => Span::styled(
                format!("✗ {notice}"),
                Style::default().fg(Color::Red),
            ),
            ViewPhase::Displaying => Span::styled(
                format!("✓ {} rows", self.state.table.len()),
                Style::default().fg(Color::Green),
            ),
            ViewPhase::Idle => Span::styled("idle", Style::default().fg(Color::DarkGray)),
        };

        let line = Line::from(vec![title, Span::raw("  "), status]);
        Paragraph::new(line)
            .block(Block::default().borders(Borders::BOTTOM))
            .render(area, buf);
    }
}
