//! Error types for trace generation
//!
//! Generators fail fast on structural problems with their input (a start node
//! that is not in the graph, an edge pointing at a missing node, a weighted
//! algorithm handed an unweighted edge). These are caller contract violations
//! and are reported before any frame is produced.
//!
//! A target that is absent from the array or an end node that cannot be reached
//! is *not* an error: those runs end in an ordinary terminal frame.

use std::fmt;
use thiserror::Error;

/// Result type for trace generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Which endpoint of a run a node id was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Start,
    End,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Start => write!(f, "start"),
            NodeRole::End => write!(f, "end"),
        }
    }
}

/// Structural input errors raised by the step generators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Start or end id not present in the node list
    #[error("{role} node '{id}' is not in the graph")]
    UnknownNode { id: String, role: NodeRole },

    /// An edge endpoint that does not name a node
    #[error("edge {from} -> {to} references unknown node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    /// Two nodes share one id
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// A weight-requiring algorithm found an edge without a weight
    #[error("edge {from} -> {to} has no weight")]
    MissingWeight { from: String, to: String },
}
