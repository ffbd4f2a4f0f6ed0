//! Dedicated not-found surface for unknown routes.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::theme::Palette;

pub fn render(frame: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "404",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "This surface does not exist.",
            Style::default().fg(palette.fg),
        )),
        Line::from(Span::styled(
            "Press any key to return home.",
            Style::default().fg(palette.muted),
        )),
    ];
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(widget, area);
}
