//! Breadth-first search step generator
//!
//! Neighbors are examined in edge-declaration order (see [`crate::graph`]),
//! which pins down the visit order among nodes at the same depth. Every frame
//! carries a snapshot of the FIFO queue.

use super::errors::{NodeRole, Result};
use super::{AlgorithmId, AlgorithmInfo, Category, Complexity};
use crate::graph::{EdgeRef, Graph, IndexedGraph};
use crate::trace::{GraphView, Trace, TraceRecorder};
use std::collections::VecDeque;
use tracing::debug;

pub const INFO: AlgorithmInfo = AlgorithmInfo {
    id: AlgorithmId::Bfs,
    name: "Breadth-First Search",
    category: Category::Graph,
    time: Complexity {
        best: "O(V + E)",
        average: "O(V + E)",
        worst: "O(V + E)",
    },
    space: "O(V)",
    stable: true,
    description: "Explores every vertex at the current depth before moving on to the next \
                  depth level, using a queue of discovered vertices. Finds shortest paths \
                  in unweighted graphs.",
    pseudocode: &[
        "procedure BFS(G, startVertex):",
        "    let Q be a queue",
        "    label startVertex as discovered",
        "    Q.enqueue(startVertex)",
        "    while Q is not empty:",
        "        v := Q.dequeue()",
        "        for all edges from v to w in G.adjacencyList[v] do:",
        "            if w is not labeled as discovered:",
        "                label w as discovered",
        "                Q.enqueue(w)",
    ],
};

/// Record a breadth-first traversal from `start`
pub fn generate(graph: &Graph, start: &str) -> Result<Trace> {
    let indexed = graph.index()?;
    let start_idx = indexed.require(start, NodeRole::Start)?;

    let mut discovered = vec![false; indexed.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut visit_order: Vec<String> = Vec::new();
    let mut tree_edges: Vec<EdgeRef> = Vec::new();

    let mut recorder = TraceRecorder::new();
    let snapshot = |visit_order: &[String], tree_edges: &[EdgeRef], queue: &VecDeque<usize>| {
        GraphView::of(visit_order, tree_edges).queue(queue_ids(&indexed, queue))
    };

    recorder.emit(
        &[1, 2],
        format!("Start BFS from node {}", start),
        snapshot(&visit_order, &tree_edges, &queue),
    );

    discovered[start_idx] = true;
    queue.push_back(start_idx);
    recorder.emit(
        &[3, 4],
        format!("Mark node {} as discovered and add to queue", start),
        snapshot(&visit_order, &tree_edges, &queue).current(start),
    );

    while let Some(&v) = queue.front() {
        recorder.emit(
            &[5],
            format!("Queue: [{}]", queue_ids(&indexed, &queue).join(", ")),
            snapshot(&visit_order, &tree_edges, &queue),
        );

        queue.pop_front();
        let v_id = indexed.id(v);
        visit_order.push(v_id.to_string());
        recorder.emit(
            &[6],
            format!("Dequeue node {}", v_id),
            snapshot(&visit_order, &tree_edges, &queue).current(v_id),
        );

        for neighbor in indexed.neighbors(v) {
            let w_id = indexed.id(neighbor.node);
            recorder.emit(
                &[7],
                format!("Check neighbor {}", w_id),
                snapshot(&visit_order, &tree_edges, &queue)
                    .current(v_id)
                    .comparing(w_id),
            );

            if discovered[neighbor.node] {
                recorder.emit(
                    &[8],
                    format!("Node {} already discovered, skip", w_id),
                    snapshot(&visit_order, &tree_edges, &queue)
                        .current(v_id)
                        .comparing(w_id),
                );
            } else {
                discovered[neighbor.node] = true;
                queue.push_back(neighbor.node);
                tree_edges.push(EdgeRef::new(v_id, w_id));
                recorder.emit(
                    &[8, 9, 10],
                    format!("Mark node {} as discovered and add to queue", w_id),
                    snapshot(&visit_order, &tree_edges, &queue)
                        .current(v_id)
                        .comparing(w_id),
                );
            }
        }
    }

    let message = format!("BFS complete. Visit order: {}", visit_order.join(" -> "));
    let trace = recorder.finish(&[5], message, snapshot(&visit_order, &tree_edges, &queue));
    debug!(
        nodes = indexed.len(),
        start,
        visited = visit_order.len(),
        frames = trace.len(),
        "generated bfs trace"
    );
    Ok(trace)
}

fn queue_ids<'g>(indexed: &IndexedGraph<'g>, queue: &VecDeque<usize>) -> Vec<&'g str> {
    queue.iter().map(|&idx| indexed.id(idx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    #[test]
    fn test_sample_visit_order() {
        let trace = generate(&Graph::sample(), "A").unwrap();
        let terminal = trace.terminal().unwrap();
        assert_eq!(
            terminal.graph_view().unwrap().visited_nodes,
            vec!["A", "B", "C", "D", "E", "F"]
        );
        assert_eq!(
            terminal.message,
            "BFS complete. Visit order: A -> B -> C -> D -> E -> F"
        );
    }

    #[test]
    fn test_queue_snapshot_after_enqueue() {
        let trace = generate(&Graph::sample(), "A").unwrap();
        let frame = trace
            .iter()
            .find(|f| f.message == "Mark node C as discovered and add to queue")
            .unwrap();
        assert_eq!(
            frame.graph_view().unwrap().queue,
            Some(vec!["B".to_string(), "C".to_string()])
        );
    }

    #[test]
    fn test_each_dequeue_follows_its_queue_frame() {
        let trace = generate(&Graph::sample(), "A").unwrap();
        let frames = trace.frames();
        let mut dequeued = 0;
        for (i, frame) in frames.iter().enumerate() {
            let Some(id) = frame.message.strip_prefix("Dequeue node ") else {
                continue;
            };
            dequeued += 1;
            let before = frames[i - 1].graph_view().unwrap();
            assert!(frames[i - 1].message.starts_with("Queue: ["));
            assert_eq!(before.queue.as_ref().unwrap()[0], id);
            assert!(!frame.graph_view().unwrap().queue.as_ref().unwrap().contains(&id.to_string()));
        }
        assert_eq!(dequeued, 6);
    }

    #[test]
    fn test_single_node_graph() {
        let graph = Graph::new(vec![Node::new("A", 0.0, 0.0)], vec![]);
        let trace = generate(&graph, "A").unwrap();
        assert_eq!(
            trace.terminal().unwrap().graph_view().unwrap().visited_nodes,
            vec!["A"]
        );
    }

    #[test]
    fn test_weights_are_ignored() {
        let graph = Graph::new(
            vec![Node::new("A", 0.0, 0.0), Node::new("B", 1.0, 0.0)],
            vec![Edge::new("B", "A")],
        );
        let trace = generate(&graph, "A").unwrap();
        assert_eq!(
            trace.terminal().unwrap().graph_view().unwrap().visited_edges,
            vec![EdgeRef::new("A", "B")]
        );
    }
}
