//! Multi-hypothesis timeline surface.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::fixtures::TimelineDoc;
use crate::tui::theme::{self, Palette};
use crate::views::{CardSide, TimelineMode, TimelineView};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    doc: &TimelineDoc,
    view: &TimelineView,
    event_cursor: usize,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_selector(frame, rows[0], doc, view, palette);
    match view.mode {
        TimelineMode::Timeline => render_events(frame, rows[1], doc, view, event_cursor, palette),
        TimelineMode::Narrative => render_narrative(frame, rows[1], doc, view, palette),
    }
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    doc: &TimelineDoc,
    view: &TimelineView,
    palette: &Palette,
) {
    let mut spans = vec![Span::raw(" ")];
    for storyline in &doc.storylines {
        let active = storyline.id == view.storyline;
        let style = if active {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(
            format!("[{} - {}% conf.] ", storyline.title, storyline.confidence),
            style,
        ));
    }
    let description = doc
        .storyline(&view.storyline)
        .map(|s| s.description.as_str())
        .unwrap_or_default();

    let widget = Paragraph::new(vec![
        Line::from(spans),
        Line::from(Span::styled(
            format!(" {}", description),
            Style::default().fg(palette.muted),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.border))
            .title(" Multi-Hypothesis Narrative Reconstruction "),
    );
    frame.render_widget(widget, area);
}

fn render_events(
    frame: &mut Frame,
    area: Rect,
    doc: &TimelineDoc,
    view: &TimelineView,
    event_cursor: usize,
    palette: &Palette,
) {
    let events = doc.events_for(&view.storyline);
    let mut lines: Vec<Line> = Vec::new();

    for (i, event) in events.iter().enumerate() {
        let selected = i == event_cursor;
        let cursor = if selected { ">" } else { " " };
        // Cards alternate around the center line by index parity.
        let side = match CardSide::for_index(i) {
            CardSide::Left => "◀",
            CardSide::Right => "▶",
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", cursor), Style::default().fg(palette.accent)),
            Span::styled(
                format!("{} ", event.timestamp.format("%d %b %H:%M")),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                format!("{} ", side),
                Style::default().fg(theme::risk_color(event.importance)),
            ),
            Span::styled(
                format!("{} ", theme::event_icon(event.category)),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                event.title.clone(),
                Style::default()
                    .fg(if selected { palette.accent } else { palette.fg })
                    .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
            Span::styled(
                format!("  [{}]", event.importance.as_str().to_uppercase()),
                Style::default().fg(theme::risk_color(event.importance)),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("      {}", event.description),
            Style::default().fg(palette.muted),
        )));
        if view.expanded_event.as_deref() == Some(event.id.as_str()) {
            lines.push(Line::from(Span::styled(
                format!(
                    "      Source anchor: {} ({})",
                    event.source, event.source_ref
                ),
                Style::default().fg(palette.accent),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "      {} - participants: {}",
                    event.category.label(),
                    event.participants.join(", ")
                ),
                Style::default().fg(palette.muted),
            )));
        }
        lines.push(Line::raw(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" Timeline - {} events ", events.len())),
    );
    frame.render_widget(widget, area);
}

fn render_narrative(
    frame: &mut Frame,
    area: Rect,
    doc: &TimelineDoc,
    view: &TimelineView,
    palette: &Palette,
) {
    let event_count = doc.events_for(&view.storyline).len();
    let mut lines: Vec<Line> = Vec::new();
    if let Some(prose) = doc.narratives.get(&view.storyline) {
        for paragraph in prose.split("\n\n") {
            lines.push(Line::from(Span::styled(
                paragraph.to_string(),
                Style::default().fg(palette.fg),
            )));
            lines.push(Line::raw(""));
        }
    }
    lines.push(Line::from(Span::styled(
        format!(
            "Analyst note: reconstructed by correlating digital forensic artifacts across {} discrete evidence points. Each claim is anchored to a source artifact; toggle back ('n') to inspect individual items.",
            event_count
        ),
        Style::default().fg(palette.accent),
    )));

    let title = doc
        .storyline(&view.storyline)
        .map(|s| format!(" {} - {}% confidence ", s.title, s.confidence))
        .unwrap_or_else(|| " Narrative ".to_string());
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(title),
    );
    frame.render_widget(widget, area);
}
