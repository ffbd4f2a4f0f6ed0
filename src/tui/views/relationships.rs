//! Relationship graph surface.

use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, List, ListItem, Paragraph,
        canvas::{Canvas, Circle, Line as CanvasLine},
    },
};

use crate::fixtures::EntityGraph;
use crate::tui::theme::{self, Palette};
use crate::views::{EdgeEmphasis, RelationshipView};

/// Fixture layout coordinate space.
const WORLD_WIDTH: f64 = 800.0;
const WORLD_HEIGHT: f64 = 500.0;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    graph: &EntityGraph,
    view: &RelationshipView,
    node_cursor: usize,
    palette: &Palette,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26),
            Constraint::Min(20),
            Constraint::Length(34),
        ])
        .split(area);

    render_node_list(frame, columns[0], graph, view, node_cursor, palette);
    render_canvas(frame, columns[1], graph, view, palette);
    render_detail(frame, columns[2], graph, view, palette);
}

fn render_node_list(
    frame: &mut Frame,
    area: Rect,
    graph: &EntityGraph,
    view: &RelationshipView,
    node_cursor: usize,
    palette: &Palette,
) {
    let items: Vec<ListItem> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let cursor = if i == node_cursor { ">" } else { " " };
            let selected = view.selected.as_deref() == Some(node.id.as_str());
            let dimmed = view.node_dimmed(&node.id, &graph.edges);
            let style = if selected {
                Style::default()
                    .fg(theme::node_color(node.category))
                    .add_modifier(Modifier::BOLD)
            } else if dimmed {
                Style::default().fg(palette.border)
            } else {
                Style::default().fg(theme::node_color(node.category))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", cursor), Style::default().fg(palette.accent)),
                Span::styled(format!("{:2} ", node.risk_score), style),
                Span::styled(node.label.clone(), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!(
                " Entities ({} / {} edges) ",
                graph.nodes.len(),
                graph.edges.len()
            )),
    );
    frame.render_widget(list, area);
}

fn render_canvas(
    frame: &mut Frame,
    area: Rect,
    graph: &EntityGraph,
    view: &RelationshipView,
    palette: &Palette,
) {
    // Zoom shrinks the visible window around the world center.
    let half_w = WORLD_WIDTH / (2.0 * view.zoom());
    let half_h = WORLD_HEIGHT / (2.0 * view.zoom());
    let (cx, cy) = (WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(format!(
                    " Dynamic Relationship & Entity Map - zoom {:.0}% ",
                    view.zoom() * 100.0
                )),
        )
        .x_bounds([cx - half_w, cx + half_w])
        .y_bounds([cy - half_h, cy + half_h])
        .paint(|ctx| {
            for edge in &graph.edges {
                let (Some(source), Some(target)) =
                    (graph.node(&edge.source), graph.node(&edge.target))
                else {
                    continue;
                };
                let color = match view.edge_emphasis(edge) {
                    EdgeEmphasis::Highlighted => theme::edge_color(edge.category),
                    EdgeEmphasis::Dimmed => Color::DarkGray,
                    EdgeEmphasis::Normal => theme::edge_color(edge.category),
                };
                ctx.draw(&CanvasLine {
                    x1: source.x,
                    y1: WORLD_HEIGHT - source.y,
                    x2: target.x,
                    y2: WORLD_HEIGHT - target.y,
                    color,
                });
            }
            ctx.layer();
            for node in &graph.nodes {
                let dimmed = view.node_dimmed(&node.id, &graph.edges);
                let color = if dimmed {
                    Color::DarkGray
                } else {
                    theme::node_color(node.category)
                };
                ctx.draw(&Circle {
                    x: node.x,
                    y: WORLD_HEIGHT - node.y,
                    radius: 8.0,
                    color,
                });
                ctx.print(
                    node.x,
                    WORLD_HEIGHT - node.y - 20.0,
                    ratatui::text::Line::styled(node.label.clone(), Style::default().fg(color)),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    graph: &EntityGraph,
    view: &RelationshipView,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(" Entity Profile ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(entity) = view.selected.as_deref().and_then(|id| graph.node(id)) else {
        let hint = Paragraph::new("\n Select a node to inspect\n\n Entity details and\n connections appear here")
            .style(Style::default().fg(palette.muted));
        frame.render_widget(hint, inner);
        return;
    };

    let connections = graph.edges_of(&entity.id);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", entity.label),
            Style::default()
                .fg(theme::node_color(entity.category))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" {}", entity.category.label()),
            Style::default().fg(palette.muted),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!(" Phone:    {}", entity.phone),
            Style::default().fg(palette.fg),
        )),
        Line::from(Span::styled(
            format!(" Messages: {}", entity.message_count),
            Style::default().fg(palette.fg),
        )),
        Line::from(Span::styled(
            format!(" Risk:     {}", entity.risk_score),
            Style::default().fg(theme::risk_color(risk_band(entity.risk_score))),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!(" Connections ({})", connections.len()),
            Style::default().fg(palette.muted),
        )),
    ];
    for edge in connections {
        if let Some(other) = edge.other_end(&entity.id).and_then(|id| graph.node(id)) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", other.label),
                    Style::default().fg(palette.fg),
                ),
                Span::styled(
                    edge.label.clone(),
                    Style::default().fg(theme::edge_color(edge.category)),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Risk score band for coloring the profile meter.
fn risk_band(score: u8) -> crate::models::RiskLevel {
    use crate::models::RiskLevel;
    match score {
        81..=u8::MAX => RiskLevel::Critical,
        51..=80 => RiskLevel::High,
        26..=50 => RiskLevel::Medium,
        0..=25 => RiskLevel::Low,
    }
}
