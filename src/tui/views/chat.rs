//! NLIQ chat surface.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::{ChatRole, ChatTurn};
use crate::responder::SUGGESTED_QUERIES;
use crate::tui::theme::{self, Palette};
use crate::views::ChatView;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    chat: &ChatView,
    citation_cursor: usize,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    render_transcript(frame, rows[0], chat, citation_cursor, palette);
    render_input(frame, rows[1], chat, palette);
}

fn render_transcript(
    frame: &mut Frame,
    area: Rect,
    chat: &ChatView,
    citation_cursor: usize,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" NLIQ - Investigative Chat ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if chat.turns().is_empty() && !chat.thinking {
        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Ask me anything about the case evidence",
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                " Natural language search across all ingested device data",
                Style::default().fg(palette.muted),
            )),
            Line::raw(""),
        ];
        for query in SUGGESTED_QUERIES {
            lines.push(Line::from(Span::styled(
                format!("   - {}", query),
                Style::default().fg(palette.muted),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for turn in chat.turns() {
        match turn.role {
            ChatRole::User => {
                lines.push(Line::from(vec![
                    Span::styled("You ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                    Span::styled(
                        turn.created_at.format("%H:%M:%S").to_string(),
                        Style::default().fg(palette.muted),
                    ),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("  {}", turn.content),
                    Style::default().fg(palette.fg),
                )));
                lines.push(Line::raw(""));
            }
            ChatRole::Assistant => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "NLIQ ",
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        turn.created_at.format("%H:%M:%S").to_string(),
                        Style::default().fg(palette.muted),
                    ),
                ]));
                push_assistant_body(&mut lines, turn, palette);
                push_citations(&mut lines, chat, turn, citation_cursor, palette);
                lines.push(Line::raw(""));
            }
        }
    }
    if chat.thinking {
        lines.push(Line::from(Span::styled(
            " Searching across device data...",
            Style::default().fg(palette.accent),
        )));
    }

    // Keep the tail in view.
    let height = inner.height as usize;
    let scroll = lines.len().saturating_sub(height) as u16;
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(transcript, inner);
}

fn push_assistant_body(lines: &mut Vec<Line>, turn: &ChatTurn, palette: &Palette) {
    for raw in turn.content.lines() {
        if let Some(heading) = raw.strip_prefix("### ") {
            lines.push(Line::from(Span::styled(
                format!("  {}", heading.to_uppercase()),
                Style::default().fg(palette.muted).add_modifier(Modifier::BOLD),
            )));
        } else if !raw.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", raw),
                Style::default().fg(palette.fg),
            )));
        }
    }
}

fn push_citations(
    lines: &mut Vec<Line>,
    chat: &ChatView,
    turn: &ChatTurn,
    citation_cursor: usize,
    palette: &Palette,
) {
    // Only the latest assistant turn carries the citation cursor.
    let is_latest = chat
        .turns()
        .iter()
        .rev()
        .find(|t| t.role == ChatRole::Assistant)
        .map(|t| t.id == turn.id)
        .unwrap_or(false);

    for (i, cite) in turn.citations.iter().enumerate() {
        let selected = is_latest && i == citation_cursor;
        let marker = if selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}[{}] ", marker, i + 1),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                format!("{} ", cite.source),
                Style::default().fg(theme::channel_color(cite.source)),
            ),
            Span::styled(
                format!(
                    "{} {} ",
                    theme::risk_icon(cite.risk_level),
                    cite.risk_level.as_str().to_uppercase()
                ),
                Style::default().fg(theme::risk_color(cite.risk_level)),
            ),
            Span::styled(
                format!("{:.0}% ", cite.relevance_score * 100.0),
                Style::default().fg(palette.muted),
            ),
            Span::styled(cite.content.clone(), Style::default().fg(palette.muted)),
        ]));
        if chat.citation_expanded(cite) {
            lines.push(Line::from(Span::styled(
                format!(
                    "      {} -> {} - {} ({})",
                    cite.sender,
                    cite.receiver,
                    cite.timestamp.format("%d %b %Y %H:%M"),
                    cite.language
                ),
                Style::default().fg(palette.muted),
            )));
            if !cite.flagged_entities.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("      flagged: {}", cite.flagged_entities.join(", ")),
                    Style::default().fg(palette.accent),
                )));
            }
        }
    }
}

fn render_input(frame: &mut Frame, area: Rect, chat: &ChatView, palette: &Palette) {
    let style = if chat.thinking {
        Style::default().fg(palette.muted)
    } else {
        Style::default().fg(palette.fg)
    };
    let input = Paragraph::new(format!(" {}_", chat.input)).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Ask: 'Show me all crypto wallet references' "),
    );
    frame.render_widget(input, area);
}
