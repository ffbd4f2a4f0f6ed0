//! Anomaly triage surface.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::fixtures::AnomalyReport;
use crate::models::AnomalyCategory;
use crate::tui::theme::{self, Palette};
use crate::views::{AnomalyView, CategoryFilter};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    report: &AnomalyReport,
    view: &AnomalyView,
    anomaly_cursor: usize,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_summary_bar(frame, rows[0], report, palette);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(30)])
        .split(rows[1]);
    render_sidebar(frame, columns[0], report, view, palette);
    render_findings(frame, columns[1], report, view, anomaly_cursor, palette);
}

fn render_summary_bar(frame: &mut Frame, area: Rect, report: &AnomalyReport, palette: &Palette) {
    let summary = &report.risk_summary;
    let cells: [(&str, String, Color); 6] = [
        (
            "OVERALL",
            summary.overall_risk.as_str().to_uppercase(),
            theme::risk_color(summary.overall_risk),
        ),
        ("CRITICAL", summary.critical.to_string(), Color::Red),
        ("HIGH", summary.high.to_string(), Color::Yellow),
        ("MEDIUM", summary.medium.to_string(), Color::Cyan),
        ("LOW", summary.low.to_string(), Color::DarkGray),
        ("TOTAL", report.anomalies.len().to_string(), palette.fg),
    ];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);
    for ((label, value, color), cell) in cells.into_iter().zip(chunks.iter()) {
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

fn render_sidebar(
    frame: &mut Frame,
    area: Rect,
    report: &AnomalyReport,
    view: &AnomalyView,
    palette: &Palette,
) {
    let baseline = &report.baseline;
    let filter_line = |filter: CategoryFilter| {
        let active = view.filter == filter;
        let marker = if active { ">" } else { " " };
        let style = if active {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        Line::from(Span::styled(format!(" {} {}", marker, filter.label()), style))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            " BEHAVIORAL BASELINE",
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" Active hours  {}", baseline.active_hours),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!(" Language      {}", baseline.primary_language),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!(" Msgs/day      {}", baseline.avg_daily_messages),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!(" Contacts      {}", baseline.typical_contacts),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!(" Media/day     {}", baseline.avg_media_per_day),
            Style::default().fg(palette.muted),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            " FILTER ('f' cycles)",
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        )),
        filter_line(CategoryFilter::All),
    ];
    for category in AnomalyCategory::ALL {
        lines.push(filter_line(CategoryFilter::Only(category)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        " RECOMMENDATION",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!(" {}", report.risk_summary.recommendation),
        Style::default().fg(palette.muted),
    )));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(widget, area);
}

fn render_findings(
    frame: &mut Frame,
    area: Rect,
    report: &AnomalyReport,
    view: &AnomalyView,
    anomaly_cursor: usize,
    palette: &Palette,
) {
    let filtered = view.filtered(&report.anomalies);
    let mut lines: Vec<Line> = Vec::new();

    for (i, finding) in filtered.iter().enumerate() {
        let selected = i == anomaly_cursor;
        let cursor = if selected { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", cursor), Style::default().fg(palette.accent)),
            Span::styled(
                format!("{} ", theme::anomaly_icon(finding.category)),
                Style::default().fg(palette.muted),
            ),
            Span::styled(
                format!("{} ", finding.severity.as_str().to_uppercase()),
                Style::default().fg(theme::risk_color(finding.severity)),
            ),
            Span::styled(
                finding.title.clone(),
                Style::default()
                    .fg(if selected { palette.accent } else { palette.fg })
                    .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
            Span::styled(
                format!("  {}", finding.detected_at.format("%d %b %H:%M")),
                Style::default().fg(palette.muted),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", finding.finding),
            Style::default().fg(palette.muted),
        )));
        if view.expanded.as_deref() == Some(finding.id.as_str()) {
            lines.push(Line::from(Span::styled(
                format!("     Deviation: {}", finding.deviation),
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(Span::styled(
                format!("     Rationale: {}", finding.rationale),
                Style::default().fg(palette.fg),
            )));
            for (n, action) in finding.recommended_actions.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("     {}. {}", n + 1, action),
                    Style::default().fg(palette.accent),
                )));
            }
            if !finding.evidence_refs.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("     Evidence: {}", finding.evidence_refs.join(", ")),
                    Style::default().fg(palette.muted),
                )));
            }
        }
        lines.push(Line::raw(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!(
                " Proactive Lead Detection - {} findings ",
                filtered.len()
            )),
    );
    frame.render_widget(widget, area);
}
