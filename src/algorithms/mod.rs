//! Step generators and algorithm descriptors
//!
//! Each submodule re-executes one textbook algorithm with instrumentation and
//! returns the full [`Trace`] of its run:
//! - [`bubble_sort`]: adjacent compare-and-swap passes with early exit
//! - [`binary_search`]: sort, then recursive window narrowing
//! - [`dijkstra`]: linear-scan minimum selection with edge relaxation
//! - [`bfs`]: FIFO traversal over the undirected adjacency
//! - [`errors`]: structural input errors
//!
//! Generators are pure and deterministic: the same input always yields an
//! identical trace. Each one also publishes a static [`AlgorithmInfo`] with the
//! pseudocode its frames highlight.

pub mod bfs;
pub mod binary_search;
pub mod bubble_sort;
pub mod dijkstra;
pub mod errors;

use crate::graph::Graph;
use crate::trace::Trace;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use errors::{GenerateError, NodeRole, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmId {
    BubbleSort,
    BinarySearch,
    Dijkstra,
    Bfs,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 4] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::BinarySearch,
        AlgorithmId::Dijkstra,
        AlgorithmId::Bfs,
    ];

    pub fn info(self) -> &'static AlgorithmInfo {
        match self {
            AlgorithmId::BubbleSort => &bubble_sort::INFO,
            AlgorithmId::BinarySearch => &binary_search::INFO,
            AlgorithmId::Dijkstra => &dijkstra::INFO,
            AlgorithmId::Bfs => &bfs::INFO,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "bubble-sort",
            AlgorithmId::BinarySearch => "binary-search",
            AlgorithmId::Dijkstra => "dijkstra",
            AlgorithmId::Bfs => "bfs",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sorting,
    Searching,
    Pathfinding,
    Graph,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Pathfinding => "pathfinding",
            Category::Graph => "graph",
        };
        f.write_str(name)
    }
}

/// Display strings, not computed bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
}

/// Static metadata for one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub name: &'static str,
    pub category: Category,
    pub time: Complexity,
    pub space: &'static str,
    pub stable: bool,
    pub description: &'static str,
    /// Frames refer to these by 1-based line number
    pub pseudocode: &'static [&'static str],
}

/// Input for one generator run
#[derive(Debug, Clone, Copy)]
pub enum AlgorithmInput<'a> {
    BubbleSort {
        values: &'a [i64],
    },
    BinarySearch {
        values: &'a [i64],
        target: i64,
    },
    Dijkstra {
        graph: &'a Graph,
        start: &'a str,
        end: &'a str,
    },
    Bfs {
        graph: &'a Graph,
        start: &'a str,
    },
}

impl AlgorithmInput<'_> {
    pub fn algorithm(&self) -> AlgorithmId {
        match self {
            AlgorithmInput::BubbleSort { .. } => AlgorithmId::BubbleSort,
            AlgorithmInput::BinarySearch { .. } => AlgorithmId::BinarySearch,
            AlgorithmInput::Dijkstra { .. } => AlgorithmId::Dijkstra,
            AlgorithmInput::Bfs { .. } => AlgorithmId::Bfs,
        }
    }
}

/// Run the matching generator
pub fn generate(input: AlgorithmInput<'_>) -> Result<Trace> {
    match input {
        AlgorithmInput::BubbleSort { values } => Ok(bubble_sort::generate(values)),
        AlgorithmInput::BinarySearch { values, target } => {
            Ok(binary_search::generate(values, target))
        }
        AlgorithmInput::Dijkstra { graph, start, end } => dijkstra::generate(graph, start, end),
        AlgorithmInput::Bfs { graph, start } => bfs::generate(graph, start),
    }
}
