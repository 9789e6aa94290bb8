//! Help overlay — key binding reference

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const BINDINGS: [(&str, &str); 14] = [
    ("i", "edit gene list (Esc to leave)"),
    ("Enter / r", "run the query"),
    ("Esc", "cancel the in-flight query"),
    ("1-4", "toggle category filters"),
    ("s", "cycle analysis subset"),
    ("m", "switch metric (p / q)"),
    ("t", "cycle significance threshold"),
    ("o", "toggle -log10 scale"),
    ("L", "toggle chart legend"),
    ("Tab / h / l", "switch results tab"),
    ("j / k", "scroll the table"),
    ("e", "export combined table as CSV"),
    ("?", "toggle this help"),
    ("q / Ctrl+C", "quit"),
];

pub struct HelpOverlay;

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 52.min(area.width);
        let height = (BINDINGS.len() as u16 + 2).min(area.height);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        Clear.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {key:<12}"),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*description),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Keys "))
            .render(popup, buf);
    }
}
