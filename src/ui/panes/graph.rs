//! Graph canvas pane for pathfinding and traversal traces
//!
//! Nodes are drawn at their layout coordinates (screen `y` grows downwards,
//! so it is flipped for the canvas). Node and edge colours are derived from
//! the current frame by [`node_status`] and [`edge_status`].

use crate::graph::{EdgeStatus, Graph, NodeStatus};
use crate::trace::GraphView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

const MARGIN: f64 = 20.0;

/// Static endpoints of the run being shown
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    pub start: &'a str,
    pub end: Option<&'a str>,
}

/// Current > path > visited > start/end > default
pub fn node_status(view: Option<&GraphView>, id: &str, endpoints: Endpoints<'_>) -> NodeStatus {
    if let Some(view) = view {
        if view.current.as_deref() == Some(id) {
            return NodeStatus::Current;
        }
        if view.path_nodes.iter().any(|n| n == id) {
            return NodeStatus::Path;
        }
        if view.visited_nodes.iter().any(|n| n == id) {
            return NodeStatus::Visited;
        }
    }
    if endpoints.start == id {
        NodeStatus::Start
    } else if endpoints.end == Some(id) {
        NodeStatus::End
    } else {
        NodeStatus::Default
    }
}

/// Status of the undirected edge `a`-`b`
pub fn edge_status(view: Option<&GraphView>, a: &str, b: &str) -> EdgeStatus {
    let Some(view) = view else {
        return EdgeStatus::Default;
    };
    if view.path_edges.iter().any(|e| e.joins(a, b)) {
        EdgeStatus::Path
    } else if view.visited_edges.iter().any(|e| e.joins(a, b)) {
        EdgeStatus::Visited
    } else {
        EdgeStatus::Default
    }
}

fn node_color(status: NodeStatus) -> Color {
    match status {
        NodeStatus::Default => DEFAULT_THEME.fg,
        NodeStatus::Start => DEFAULT_THEME.success,
        NodeStatus::End => DEFAULT_THEME.error,
        NodeStatus::Visited => DEFAULT_THEME.visited,
        NodeStatus::Current => DEFAULT_THEME.warning,
        NodeStatus::Path => DEFAULT_THEME.path,
    }
}

fn edge_color(status: EdgeStatus) -> Color {
    match status {
        EdgeStatus::Default => DEFAULT_THEME.comment,
        EdgeStatus::Visited => DEFAULT_THEME.visited,
        EdgeStatus::Path => DEFAULT_THEME.path,
    }
}

/// Render the graph with the state of the current frame
pub fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    graph: &Graph,
    view: Option<&GraphView>,
    endpoints: Endpoints<'_>,
) {
    let block = Block::default()
        .title(" Graph ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if graph.nodes.is_empty() {
        let paragraph = Paragraph::new("(empty graph)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Reserve a line for the BFS queue
    let has_queue = view.is_some_and(|v| v.queue.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(if has_queue { 1 } else { 0 }),
        ])
        .split(block.inner(area));
    frame.render_widget(block, area);

    let (min_x, max_x) = bounds(graph.nodes.iter().map(|n| n.x));
    let (min_y, max_y) = bounds(graph.nodes.iter().map(|n| n.y));
    let flip = |y: f64| max_y + min_y - y;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([min_x - MARGIN, max_x + MARGIN])
        .y_bounds([min_y - MARGIN, max_y + MARGIN])
        .paint(|ctx| {
            for edge in &graph.edges {
                let (Some(a), Some(b)) = (graph.node(&edge.source), graph.node(&edge.target))
                else {
                    continue;
                };
                let color = edge_color(edge_status(view, &a.id, &b.id));
                ctx.draw(&CanvasLine::new(a.x, flip(a.y), b.x, flip(b.y), color));
            }
            ctx.layer();
            for edge in &graph.edges {
                let (Some(a), Some(b), Some(weight)) =
                    (graph.node(&edge.source), graph.node(&edge.target), edge.weight)
                else {
                    continue;
                };
                ctx.print(
                    (a.x + b.x) / 2.0,
                    flip((a.y + b.y) / 2.0),
                    Span::styled(weight.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
                );
            }
            for node in &graph.nodes {
                let color = node_color(node_status(view, &node.id, endpoints));
                ctx.print(
                    node.x,
                    flip(node.y),
                    Span::styled(
                        format!("({})", node.id),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });
    frame.render_widget(canvas, chunks[0]);

    if let Some(queue) = view.and_then(|v| v.queue.as_ref()) {
        let line = Line::from(vec![
            Span::styled(" Queue: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                format!("[{}]", queue.join(", ")),
                Style::default().fg(DEFAULT_THEME.secondary),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeRef;

    const ENDPOINTS: Endpoints<'static> = Endpoints {
        start: "A",
        end: Some("F"),
    };

    #[test]
    fn test_node_status_without_frame() {
        assert_eq!(node_status(None, "A", ENDPOINTS), NodeStatus::Start);
        assert_eq!(node_status(None, "F", ENDPOINTS), NodeStatus::End);
        assert_eq!(node_status(None, "C", ENDPOINTS), NodeStatus::Default);
    }

    #[test]
    fn test_node_status_precedence() {
        let visited = vec!["A".to_string(), "C".to_string()];
        let view = GraphView::of(&visited, &[])
            .current("C")
            .path(&["A".to_string()], &[]);
        assert_eq!(node_status(Some(&view), "C", ENDPOINTS), NodeStatus::Current);
        assert_eq!(node_status(Some(&view), "A", ENDPOINTS), NodeStatus::Path);
        assert_eq!(node_status(Some(&view), "F", ENDPOINTS), NodeStatus::End);
    }

    #[test]
    fn test_edge_status_ignores_direction() {
        let view = GraphView::of(&[], &[EdgeRef::new("C", "A")])
            .path(&[], &[EdgeRef::new("D", "F")]);
        assert_eq!(edge_status(Some(&view), "A", "C"), EdgeStatus::Visited);
        assert_eq!(edge_status(Some(&view), "F", "D"), EdgeStatus::Path);
        assert_eq!(edge_status(Some(&view), "A", "B"), EdgeStatus::Default);
    }
}
