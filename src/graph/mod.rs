//! Graph input for the pathfinding and traversal generators
//!
//! A [`Graph`] is a plain value object built once by the caller: a list of
//! [`Node`]s with layout coordinates and a list of [`Edge`]s. Generators never
//! mutate it. Edges are undirected: each one is traversable in both directions
//! no matter which end is declared as `source`.
//!
//! Before running, a generator calls [`Graph::index`] to obtain an
//! [`IndexedGraph`], which validates node ids and builds the adjacency lists.
//!
//! # Neighbor order
//!
//! The neighbors of a node are listed in the order edges reference it in
//! [`Graph::edges`], with both directions contributing:
//!
//! ```text
//! edges: A-B, A-C, B-D      neighbors(A) = [B, C]
//!                           neighbors(B) = [A, D]
//! ```
//!
//! This order is observable: it decides visit order among nodes at the same
//! BFS depth and the relaxation order in Dijkstra.

use crate::algorithms::errors::{GenerateError, NodeRole, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Display status of a node, as drawn by the graph pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Default,
    Start,
    End,
    Visited,
    Current,
    Path,
}

/// Display status of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    #[default]
    Default,
    Visited,
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub status: NodeStatus,
}

impl Node {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Node {
            id: id.into(),
            x,
            y,
            status: NodeStatus::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Required by Dijkstra, ignored by BFS
    #[serde(default)]
    pub weight: Option<u64>,
    #[serde(default)]
    pub status: EdgeStatus,
}

impl Edge {
    /// An unweighted edge
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            weight: None,
            status: EdgeStatus::Default,
        }
    }

    pub fn weighted(source: impl Into<String>, target: impl Into<String>, weight: u64) -> Self {
        Edge {
            weight: Some(weight),
            ..Edge::new(source, target)
        }
    }

    /// Whether this edge joins `a` and `b`, in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Directed reference to an edge as recorded in a frame (`source` is the node
/// the edge was traversed from).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeRef {
    pub source: String,
    pub target: String,
}

impl EdgeRef {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        EdgeRef {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether this reference names the undirected edge `a`-`b`
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Graph { nodes, edges }
    }

    /// The six-node weighted demo graph
    ///
    /// ```text
    ///   A --4-- B
    ///   |       |
    ///   2       5
    ///   |       |
    ///   C --1-- D
    ///   |       |
    ///   6       3
    ///   |       |
    ///   E --2-- F
    /// ```
    pub fn sample() -> Self {
        Graph {
            nodes: vec![
                Node::new("A", 50.0, 50.0),
                Node::new("B", 150.0, 50.0),
                Node::new("C", 100.0, 150.0),
                Node::new("D", 200.0, 150.0),
                Node::new("E", 50.0, 250.0),
                Node::new("F", 150.0, 250.0),
            ],
            edges: vec![
                Edge::weighted("A", "B", 4),
                Edge::weighted("A", "C", 2),
                Edge::weighted("B", "D", 5),
                Edge::weighted("C", "D", 1),
                Edge::weighted("C", "E", 6),
                Edge::weighted("D", "F", 3),
                Edge::weighted("E", "F", 2),
            ],
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First declared edge joining `a` and `b`
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    /// Sum of edge weights along a node path, `None` if a hop has no weighted edge
    pub fn path_weight<S: AsRef<str>>(&self, path: &[S]) -> Option<u64> {
        path.windows(2).try_fold(0u64, |total, hop| {
            let edge = self.edge_between(hop[0].as_ref(), hop[1].as_ref())?;
            total.checked_add(edge.weight?)
        })
    }

    /// Validate ids and build the undirected adjacency lists
    pub fn index(&self) -> Result<IndexedGraph<'_>> {
        IndexedGraph::build(self)
    }
}

/// One entry of an adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Index of the neighboring node in [`Graph::nodes`]
    pub node: usize,
    /// Index of the connecting edge in [`Graph::edges`]
    pub edge: usize,
}

/// A validated, read-only view of a [`Graph`] addressed by node index
#[derive(Debug)]
pub struct IndexedGraph<'g> {
    graph: &'g Graph,
    index_of: FxHashMap<&'g str, usize>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl<'g> IndexedGraph<'g> {
    fn build(graph: &'g Graph) -> Result<Self> {
        let mut index_of = FxHashMap::default();
        for (idx, node) in graph.nodes.iter().enumerate() {
            if index_of.insert(node.id.as_str(), idx).is_some() {
                warn!(id = %node.id, "duplicate node id in graph");
                return Err(GenerateError::DuplicateNode(node.id.clone()));
            }
        }

        let mut adjacency = vec![Vec::new(); graph.nodes.len()];
        for (edge_idx, edge) in graph.edges.iter().enumerate() {
            let lookup = |id: &str| {
                index_of.get(id).copied().ok_or_else(|| {
                    warn!(from = %edge.source, to = %edge.target, missing = id, "dangling edge");
                    GenerateError::DanglingEdge {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        missing: id.to_string(),
                    }
                })
            };
            let source = lookup(&edge.source)?;
            let target = lookup(&edge.target)?;
            adjacency[source].push(Neighbor {
                node: target,
                edge: edge_idx,
            });
            adjacency[target].push(Neighbor {
                node: source,
                edge: edge_idx,
            });
        }

        Ok(IndexedGraph {
            graph,
            index_of,
            adjacency,
        })
    }

    pub fn len(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_of.get(id).copied()
    }

    /// Look up an endpoint supplied by the caller, failing if it is absent
    pub fn require(&self, id: &str, role: NodeRole) -> Result<usize> {
        self.index_of(id).ok_or_else(|| {
            warn!(id, %role, "endpoint not in graph");
            GenerateError::UnknownNode {
                id: id.to_string(),
                role,
            }
        })
    }

    /// Id of the node at `idx`
    pub fn id(&self, idx: usize) -> &'g str {
        &self.graph.nodes[idx].id
    }

    pub fn neighbors(&self, idx: usize) -> &[Neighbor] {
        &self.adjacency[idx]
    }

    pub fn edge(&self, edge_idx: usize) -> &'g Edge {
        &self.graph.edges[edge_idx]
    }

    /// Fail on the first edge that carries no weight
    pub fn require_weights(&self) -> Result<()> {
        match self.graph.edges.iter().find(|e| e.weight.is_none()) {
            Some(edge) => Err(GenerateError::MissingWeight {
                from: edge.source.clone(),
                to: edge.target.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_follows_edge_declaration_order() {
        let graph = Graph::sample();
        let indexed = graph.index().unwrap();

        let ids = |id: &str| -> Vec<&str> {
            let idx = indexed.index_of(id).unwrap();
            indexed
                .neighbors(idx)
                .iter()
                .map(|n| indexed.id(n.node))
                .collect()
        };

        assert_eq!(ids("A"), vec!["B", "C"]);
        assert_eq!(ids("C"), vec!["A", "D", "E"]);
        assert_eq!(ids("D"), vec!["B", "C", "F"]);
        assert_eq!(ids("F"), vec!["D", "E"]);
    }

    #[test]
    fn test_dangling_edge_is_rejected() {
        let graph = Graph::new(
            vec![Node::new("A", 0.0, 0.0)],
            vec![Edge::new("A", "Z")],
        );
        let err = graph.index().unwrap_err();
        assert_eq!(
            err,
            GenerateError::DanglingEdge {
                from: "A".to_string(),
                to: "Z".to_string(),
                missing: "Z".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let graph = Graph::new(
            vec![Node::new("A", 0.0, 0.0), Node::new("A", 1.0, 1.0)],
            vec![],
        );
        assert_eq!(
            graph.index().unwrap_err(),
            GenerateError::DuplicateNode("A".to_string())
        );
    }

    #[test]
    fn test_require_reports_role() {
        let graph = Graph::sample();
        let indexed = graph.index().unwrap();
        let err = indexed.require("Q", NodeRole::End).unwrap_err();
        assert_eq!(err.to_string(), "end node 'Q' is not in the graph");
    }

    #[test]
    fn test_path_weight() {
        let graph = Graph::sample();
        assert_eq!(graph.path_weight(&["A", "C", "D", "F"]), Some(6));
        assert_eq!(graph.path_weight(&["A", "F"]), None);
        assert_eq!(graph.path_weight(&["A"]), Some(0));
    }

    #[test]
    fn test_graph_json_defaults() {
        let json = r#"{
            "nodes": [{"id": "A", "x": 0, "y": 0}, {"id": "B", "x": 10, "y": 0}],
            "edges": [{"source": "A", "target": "B"}]
        }"#;
        let graph: Graph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.nodes[0].status, NodeStatus::Default);
        assert_eq!(graph.edges[0].weight, None);
        assert!(graph.index().unwrap().require_weights().is_err());
    }
}
