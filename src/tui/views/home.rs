//! Home surface: simulated UFDR upload plus investigation history.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

use crate::ingest::{self, IngestPhase, StageStatus};
use crate::models::Identity;
use crate::tui::theme::{self, Palette};
use crate::views::{HomeView, PAST_CASES};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    home: &HomeView,
    file_prompt: Option<&str>,
    identity: Option<&Identity>,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Welcome line
            Constraint::Length(4), // Stat tiles
            Constraint::Min(8),    // Upload + history
        ])
        .split(area);

    render_welcome(frame, rows[0], identity, palette);
    render_stats(frame, rows[1], palette);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(rows[2]);
    render_upload(frame, columns[0], home, file_prompt, palette);
    render_history(frame, columns[1], home, palette);
}

fn render_welcome(frame: &mut Frame, area: Rect, identity: Option<&Identity>, palette: &Palette) {
    let line = match identity {
        Some(identity) => format!(
            " Welcome, {} - {}",
            identity.name.split(' ').next_back().unwrap_or(&identity.name),
            identity.department
        ),
        None => " Welcome".to_string(),
    };
    let widget = Paragraph::new(line).style(Style::default().fg(palette.fg));
    frame.render_widget(widget, area);
}

fn render_stats(frame: &mut Frame, area: Rect, palette: &Palette) {
    let stats = HomeView::stats();
    let tiles: [(&str, String, Color); 4] = [
        ("TOTAL CASES", stats.total.to_string(), palette.accent),
        ("ACTIVE CASES", stats.active.to_string(), Color::Green),
        ("ENTITIES MAPPED", stats.entities_mapped.to_string(), Color::Yellow),
        ("CRITICAL RISKS", stats.critical.to_string(), Color::Red),
    ];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    for ((label, value, color), cell) in tiles.into_iter().zip(cells.iter()) {
        let tile = Paragraph::new(vec![
            Line::from(Span::styled(label, Style::default().fg(palette.muted))),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(tile, *cell);
    }
}

fn render_upload(
    frame: &mut Frame,
    area: Rect,
    home: &HomeView,
    file_prompt: Option<&str>,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" New Case - Upload UFDR ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(prompt) = file_prompt {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " File name:",
                Style::default().fg(palette.muted),
            )),
            Line::from(Span::styled(
                format!(" {}_", prompt),
                Style::default().fg(palette.accent),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                format!(" Accepted: {}", ingest::ACCEPTED_SUFFIXES.join(", ")),
                Style::default().fg(palette.muted),
            )),
            Line::from(Span::styled(
                " Enter:Start  Esc:Cancel",
                Style::default().fg(palette.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    match home.run.phase {
        IngestPhase::Idle => {
            let lines = vec![
                Line::raw(""),
                Line::from(Span::styled(
                    " Press 'u' to select a UFDR export",
                    Style::default().fg(palette.fg),
                )),
                Line::raw(""),
                Line::from(Span::styled(
                    format!(" {} - Max 10 GB", ingest::ACCEPTED_SUFFIXES.join(", ")),
                    Style::default().fg(palette.muted),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        }
        IngestPhase::Uploading => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
                .split(inner);
            let name = Paragraph::new(format!(" {}", home.run.file_name))
                .style(Style::default().fg(palette.fg));
            frame.render_widget(name, rows[0]);
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(palette.accent))
                .label(format!("Uploading {:.0}%", home.run.progress))
                .ratio(home.run.progress / 100.0);
            frame.render_widget(gauge, rows[1]);
        }
        IngestPhase::Processing | IngestPhase::Done => {
            let mut lines = vec![Line::from(Span::styled(
                format!(" {}", home.run.file_name),
                Style::default().fg(palette.fg),
            ))];
            for (i, stage) in ingest::STAGES.iter().enumerate() {
                let status = home.run.stage_status(i);
                let style = match status {
                    StageStatus::Done => Style::default().fg(palette.muted),
                    StageStatus::Current => Style::default().fg(palette.fg),
                    StageStatus::Pending => Style::default().fg(palette.border),
                };
                lines.push(Line::from(Span::styled(
                    format!(" {} {}", theme::stage_glyph(status), stage),
                    style,
                )));
            }
            if home.run.phase == IngestPhase::Done {
                lines.push(Line::from(Span::styled(
                    " Entering case dashboard...",
                    Style::default().fg(Color::Green),
                )));
            }
            frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        }
    }
}

fn render_history(frame: &mut Frame, area: Rect, home: &HomeView, palette: &Palette) {
    let items: Vec<ListItem> = PAST_CASES
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let selected = i == home.selected_case;
            let marker = if selected { ">" } else { " " };
            let header = Line::from(vec![
                Span::styled(
                    format!("{} {} ", marker, case.id),
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("[{}] ", case.status.label()),
                    Style::default().fg(theme::case_status_color(case.status)),
                ),
                Span::styled(
                    case.risk.as_str().to_uppercase(),
                    Style::default().fg(theme::risk_color(case.risk)),
                ),
            ]);
            let title = Line::from(Span::styled(
                format!("  {}", case.title),
                Style::default().fg(palette.fg),
            ));
            let meta = Line::from(Span::styled(
                format!(
                    "  {} devices - {} entities - {}",
                    case.devices, case.entities, case.date
                ),
                Style::default().fg(palette.muted),
            ));
            ListItem::new(vec![header, title, meta, Line::raw("")])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Investigation History "),
    );
    frame.render_widget(list, area);
}
