//! Dijkstra shortest-path step generator
//!
//! Minimum selection is a linear scan over the node list; on equal distances
//! the node that comes first in [`Graph::nodes`] wins. The main loop stops as
//! soon as the end node is selected, or when no unvisited node has a finite
//! distance. The path is then rebuilt by following predecessor links back from
//! the end node.
//!
//! Edge weights must be present and are assumed non-negative.

use super::errors::{NodeRole, Result};
use super::{AlgorithmId, AlgorithmInfo, Category, Complexity};
use crate::graph::{EdgeRef, Graph};
use crate::trace::{GraphView, Trace, TraceRecorder};
use tracing::debug;

pub const INFO: AlgorithmInfo = AlgorithmInfo {
    id: AlgorithmId::Dijkstra,
    name: "Dijkstra's Algorithm",
    category: Category::Pathfinding,
    time: Complexity {
        best: "O(E + V log V)",
        average: "O(E + V log V)",
        worst: "O(E + V log V)",
    },
    space: "O(V)",
    stable: true,
    description: "Finds the shortest path between nodes in a weighted graph. It keeps a \
                  tentative distance for every node, repeatedly finalizes the unvisited \
                  node with the smallest distance and relaxes the edges leaving it.",
    pseudocode: &[
        "function Dijkstra(Graph, source, target):",
        "    for each vertex v in Graph.Vertices:",
        "        dist[v] := INFINITY",
        "        prev[v] := UNDEFINED",
        "        add v to Q",
        "    dist[source] := 0",
        "",
        "    while Q is not empty:",
        "        u := vertex in Q with minimum dist[u]",
        "        if u = target: break",
        "        remove u from Q",
        "",
        "        for each neighbor v of u still in Q:",
        "            alt := dist[u] + Graph.Edges(u, v)",
        "            if alt < dist[v]:",
        "                dist[v] := alt; prev[v] := u",
        "",
        "    return path from source to target via prev[]",
    ],
};

/// Record a shortest-path search from `start` to `end`
pub fn generate(graph: &Graph, start: &str, end: &str) -> Result<Trace> {
    let indexed = graph.index()?;
    let start_idx = indexed.require(start, NodeRole::Start)?;
    let end_idx = indexed.require(end, NodeRole::End)?;
    indexed.require_weights()?;

    let n = indexed.len();
    let mut distances: Vec<Option<u64>> = vec![None; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut finalized = vec![false; n];
    let mut visited_nodes: Vec<String> = Vec::new();
    let mut visited_edges: Vec<EdgeRef> = Vec::new();
    distances[start_idx] = Some(0);

    let mut recorder = TraceRecorder::new();
    recorder.emit(
        &[1, 2, 3, 4, 5, 6],
        format!("Initialize Dijkstra's algorithm from node {}", start),
        GraphView::of(&visited_nodes, &visited_edges).current(start),
    );

    let mut current = start_idx;
    for _ in 0..n {
        recorder.emit(
            &[8, 9],
            "Finding the unvisited node with the smallest distance",
            GraphView::of(&visited_nodes, &visited_edges).current(indexed.id(current)),
        );

        let Some((u, dist_u)) = select_min(&distances, &finalized) else {
            recorder.emit(
                &[8],
                "No unvisited node has a finite distance, the rest are unreachable",
                GraphView::of(&visited_nodes, &visited_edges),
            );
            break;
        };

        if u == end_idx {
            recorder.emit(
                &[10],
                format!("Reached end node {} with distance {}", end, dist_u),
                GraphView::of(&visited_nodes, &visited_edges).current(end),
            );
            break;
        }

        finalized[u] = true;
        current = u;
        let u_id = indexed.id(u);
        visited_nodes.push(u_id.to_string());
        recorder.emit(
            &[10, 11],
            format!("Selected node {} with distance {}", u_id, dist_u),
            GraphView::of(&visited_nodes, &visited_edges).current(u_id),
        );

        for neighbor in indexed.neighbors(u) {
            if finalized[neighbor.node] {
                continue;
            }
            let v_id = indexed.id(neighbor.node);
            visited_edges.push(EdgeRef::new(u_id, v_id));
            recorder.emit(
                &[13],
                format!("Checking neighbor {}", v_id),
                GraphView::of(&visited_nodes, &visited_edges)
                    .current(u_id)
                    .comparing(v_id),
            );

            let weight = indexed.edge(neighbor.edge).weight.unwrap_or_default();
            // Overflowing sums are treated as unreachable
            let alt = dist_u.checked_add(weight);
            let known = distances[neighbor.node];
            recorder.emit(
                &[14],
                format!(
                    "Current distance to {}: {}. New potential distance: {}",
                    v_id,
                    format_distance(known),
                    format_distance(alt)
                ),
                GraphView::of(&visited_nodes, &visited_edges)
                    .current(u_id)
                    .comparing(v_id),
            );

            if let Some(alt) = alt.filter(|&a| known.map_or(true, |d| a < d)) {
                recorder.emit(
                    &[15, 16],
                    format!(
                        "Update distance to {} from {} to {}",
                        v_id,
                        format_distance(known),
                        alt
                    ),
                    GraphView::of(&visited_nodes, &visited_edges)
                        .current(u_id)
                        .comparing(v_id),
                );
                distances[neighbor.node] = Some(alt);
                previous[neighbor.node] = Some(u);
            }
        }
    }

    let trace = if previous[end_idx].is_some() || end_idx == start_idx {
        let mut path_nodes = vec![end.to_string()];
        let mut path_edges = Vec::new();
        let mut walk = end_idx;
        while let Some(prev) = previous[walk] {
            path_nodes.push(indexed.id(prev).to_string());
            path_edges.push(EdgeRef::new(indexed.id(prev), indexed.id(walk)));
            walk = prev;
        }
        path_nodes.reverse();
        path_edges.reverse();

        recorder.finish(
            &[18],
            format!(
                "Found shortest path: {} (total distance {})",
                path_nodes.join(" -> "),
                format_distance(distances[end_idx])
            ),
            GraphView::of(&visited_nodes, &visited_edges).path(&path_nodes, &path_edges),
        )
    } else {
        recorder.finish(
            &[18],
            format!("No path found from {} to {}", start, end),
            GraphView::of(&visited_nodes, &visited_edges),
        )
    };

    debug!(
        nodes = n,
        edges = graph.edges.len(),
        start,
        end,
        frames = trace.len(),
        "generated dijkstra trace"
    );
    Ok(trace)
}

/// First unvisited node, in node order, with the smallest finite distance
fn select_min(distances: &[Option<u64>], finalized: &[bool]) -> Option<(usize, u64)> {
    let mut best: Option<(usize, u64)> = None;
    for (idx, dist) in distances.iter().enumerate() {
        if finalized[idx] {
            continue;
        }
        if let Some(d) = *dist {
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((idx, d));
            }
        }
    }
    best
}

fn format_distance(distance: Option<u64>) -> String {
    match distance {
        Some(d) => d.to_string(),
        None => "∞".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::GenerateError;
    use crate::graph::{Edge, Node};

    #[test]
    fn test_sample_shortest_path() {
        let trace = generate(&Graph::sample(), "A", "F").unwrap();
        let view = trace.terminal().unwrap().graph_view().unwrap().clone();
        assert_eq!(view.path_nodes, vec!["A", "C", "D", "F"]);
        assert_eq!(
            view.path_edges,
            vec![
                EdgeRef::new("A", "C"),
                EdgeRef::new("C", "D"),
                EdgeRef::new("D", "F"),
            ]
        );
        assert_eq!(
            trace.terminal().unwrap().message,
            "Found shortest path: A -> C -> D -> F (total distance 6)"
        );
    }

    #[test]
    fn test_select_min_prefers_first_in_node_order() {
        let distances = [Some(0), Some(3), Some(1), Some(1)];
        let finalized = [true, false, false, false];
        assert_eq!(select_min(&distances, &finalized), Some((2, 1)));
        assert_eq!(select_min(&[None, None], &[false, false]), None);
    }

    #[test]
    fn test_infinity_is_rendered() {
        let trace = generate(&Graph::sample(), "A", "F").unwrap();
        assert!(trace
            .iter()
            .any(|f| f.message == "Current distance to B: ∞. New potential distance: 4"));
    }

    #[test]
    fn test_start_equals_end() {
        let trace = generate(&Graph::sample(), "C", "C").unwrap();
        let view = trace.terminal().unwrap().graph_view().unwrap();
        assert_eq!(view.path_nodes, vec!["C"]);
        assert!(view.path_edges.is_empty());
    }

    #[test]
    fn test_unreachable_end() {
        let graph = Graph::new(
            vec![
                Node::new("A", 0.0, 0.0),
                Node::new("B", 1.0, 0.0),
                Node::new("Z", 2.0, 0.0),
            ],
            vec![Edge::weighted("A", "B", 1)],
        );
        let trace = generate(&graph, "A", "Z").unwrap();
        let terminal = trace.terminal().unwrap();
        assert_eq!(terminal.message, "No path found from A to Z");
        assert!(terminal.graph_view().unwrap().path_nodes.is_empty());
        assert_eq!(terminal.graph_view().unwrap().visited_nodes, vec!["A", "B"]);
    }

    #[test]
    fn test_overflowing_distance_is_not_an_improvement() {
        let graph = Graph::new(
            vec![
                Node::new("A", 0.0, 0.0),
                Node::new("B", 1.0, 0.0),
                Node::new("C", 2.0, 0.0),
            ],
            vec![Edge::weighted("A", "B", u64::MAX), Edge::weighted("B", "C", 1)],
        );
        let trace = generate(&graph, "A", "C").unwrap();
        assert!(trace
            .iter()
            .any(|f| f.message == "Current distance to C: ∞. New potential distance: ∞"));
        assert_eq!(trace.terminal().unwrap().message, "No path found from A to C");
    }

    #[test]
    fn test_missing_weight_fails_before_any_frame() {
        let graph = Graph::new(
            vec![Node::new("A", 0.0, 0.0), Node::new("B", 1.0, 0.0)],
            vec![Edge::new("A", "B")],
        );
        assert_eq!(
            generate(&graph, "A", "B").unwrap_err(),
            GenerateError::MissingWeight {
                from: "A".to_string(),
                to: "B".to_string(),
            }
        );
    }
}
