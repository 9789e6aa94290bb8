//! Status bar widget — mode indicator + key hints + flash messages

use crate::tui::mode::InputMode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let mode = self.state.mode;

        // Left: mode indicator + phase
        let mode_style = Style::default()
            .fg(Color::Black)
            .bg(mode.color())
            .add_modifier(Modifier::BOLD);
        let left_line = Line::from(vec![
            Span::styled(format!(" {} ", mode.indicator()), mode_style),
            Span::styled(
                format!(" {} ", self.state.phase.label()),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
        ]);

        // Flash message or key hints on the right
        let right_text = if let Some((flash, _)) = &self.state.flash_message {
            flash.clone()
        } else {
            match mode {
                InputMode::Normal => {
                    "i:genes  Enter:run  1-4:categories  Tab:tabs  e:export  ?:help  q:quit".into()
                }
                InputMode::Insert => "Enter:run  Esc:normal".into(),
            }
        };
        let right_span = Span::styled(
            right_text.clone(),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );

        let left_width = (mode.indicator().len() + self.state.phase.label().len() + 4) as u16;
        buf.set_line(area.x, area.y, &left_line, left_width);

        // Right-aligned hints
        let right_width = right_text.len() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        if right_x > area.x + left_width {
            buf.set_line(right_x, area.y, &Line::from(vec![right_span]), right_width + 1);
        }
    }
}
