//! Frame model and trace recording
//!
//! A generator runs its algorithm to completion and records one [`Frame`] at
//! every decision point. Frames are snapshots: each view owns copies of the
//! containers it reports, taken when the view is built, so later mutation of a
//! generator's working state can never reach an already recorded frame.
//!
//! [`TraceRecorder`] is the only way to build a [`Trace`]. It assigns
//! `index` in emission order and seals the trace with exactly one terminal
//! frame (`complete = true`), which is always the last one.

use crate::graph::EdgeRef;
use serde::{Deserialize, Serialize};

/// One instant of an algorithm's execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Position in the trace
    pub index: usize,
    /// 1-based pseudocode lines active during this frame
    pub highlighted_lines: Vec<usize>,
    /// Narration of the transition
    pub message: String,
    /// Set on the terminal frame only
    pub complete: bool,
    pub view: FrameView,
}

impl Frame {
    pub fn array_view(&self) -> Option<&ArrayView> {
        match &self.view {
            FrameView::Array(view) => Some(view),
            FrameView::Graph(_) => None,
        }
    }

    pub fn graph_view(&self) -> Option<&GraphView> {
        match &self.view {
            FrameView::Graph(view) => Some(view),
            FrameView::Array(_) => None,
        }
    }
}

/// Algorithm-specific payload of a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FrameView {
    Array(ArrayView),
    Graph(GraphView),
}

/// State of an array algorithm (sorting, searching)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArrayView {
    pub array: Vec<i64>,
    pub current: Option<usize>,
    pub comparing: Vec<usize>,
    pub swapping: Vec<usize>,
    /// Index reported by a successful search, terminal frame only
    pub found: Option<usize>,
}

impl ArrayView {
    /// Snapshot the working array
    pub fn of(values: &[i64]) -> Self {
        ArrayView {
            array: values.to_vec(),
            ..ArrayView::default()
        }
    }

    pub fn current(mut self, index: usize) -> Self {
        self.current = Some(index);
        self
    }

    pub fn comparing(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.comparing = indices.into_iter().collect();
        self
    }

    pub fn swapping(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.swapping = indices.into_iter().collect();
        self
    }

    pub fn found(mut self, index: usize) -> Self {
        self.found = Some(index);
        self
    }
}

impl From<ArrayView> for FrameView {
    fn from(view: ArrayView) -> Self {
        FrameView::Array(view)
    }
}

/// State of a graph algorithm (pathfinding, traversal)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphView {
    /// Node being processed
    pub current: Option<String>,
    /// Nodes under consideration
    pub comparing: Vec<String>,
    /// Cumulative, append-only within a trace
    pub visited_nodes: Vec<String>,
    /// Cumulative, append-only within a trace
    pub visited_edges: Vec<EdgeRef>,
    pub path_nodes: Vec<String>,
    pub path_edges: Vec<EdgeRef>,
    /// FIFO frontier, BFS only
    pub queue: Option<Vec<String>>,
}

impl GraphView {
    /// Snapshot the visited sets
    pub fn of(visited_nodes: &[String], visited_edges: &[EdgeRef]) -> Self {
        GraphView {
            visited_nodes: visited_nodes.to_vec(),
            visited_edges: visited_edges.to_vec(),
            ..GraphView::default()
        }
    }

    pub fn current(mut self, id: impl Into<String>) -> Self {
        self.current = Some(id.into());
        self
    }

    pub fn comparing(mut self, id: impl Into<String>) -> Self {
        self.comparing = vec![id.into()];
        self
    }

    pub fn path(mut self, nodes: &[String], edges: &[EdgeRef]) -> Self {
        self.path_nodes = nodes.to_vec();
        self.path_edges = edges.to_vec();
        self
    }

    pub fn queue<S: AsRef<str>>(mut self, queue: impl IntoIterator<Item = S>) -> Self {
        self.queue = Some(queue.into_iter().map(|s| s.as_ref().to_string()).collect());
        self
    }
}

impl From<GraphView> for FrameView {
    fn from(view: GraphView) -> Self {
        FrameView::Graph(view)
    }
}

/// Builds a trace one frame at a time
#[derive(Debug, Default)]
pub struct TraceRecorder {
    frames: Vec<Frame>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        TraceRecorder { frames: Vec::new() }
    }

    /// Record a non-terminal frame
    pub fn emit(&mut self, lines: &[usize], message: impl Into<String>, view: impl Into<FrameView>) {
        self.push(lines, message.into(), view.into(), false);
    }

    /// Record the terminal frame and seal the trace
    pub fn finish(
        mut self,
        lines: &[usize],
        message: impl Into<String>,
        view: impl Into<FrameView>,
    ) -> Trace {
        self.push(lines, message.into(), view.into(), true);
        Trace {
            frames: self.frames,
        }
    }

    fn push(&mut self, lines: &[usize], message: String, view: FrameView, complete: bool) {
        self.frames.push(Frame {
            index: self.frames.len(),
            highlighted_lines: lines.to_vec(),
            message,
            complete,
            view,
        });
    }
}

/// An immutable, randomly addressable frame sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// The frame with `complete = true`
    pub fn terminal(&self) -> Option<&Frame> {
        self.frames.last().filter(|f| f.complete)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_assigns_indices_and_seals() {
        let mut recorder = TraceRecorder::new();
        recorder.emit(&[1], "first", ArrayView::of(&[1, 2]));
        recorder.emit(&[2], "second", ArrayView::of(&[1, 2]));
        let trace = recorder.finish(&[3], "done", ArrayView::of(&[1, 2]));

        assert_eq!(trace.len(), 3);
        for (i, frame) in trace.iter().enumerate() {
            assert_eq!(frame.index, i);
        }
        assert_eq!(trace.iter().filter(|f| f.complete).count(), 1);
        assert_eq!(trace.terminal().map(|f| f.message.as_str()), Some("done"));
    }

    #[test]
    fn test_views_snapshot_working_state() {
        let mut working = vec![3, 1, 2];
        let mut recorder = TraceRecorder::new();
        recorder.emit(&[1], "before", ArrayView::of(&working));
        working.swap(0, 1);
        let trace = recorder.finish(&[2], "after", ArrayView::of(&working));

        assert_eq!(trace.frames()[0].array_view().unwrap().array, vec![3, 1, 2]);
        assert_eq!(trace.frames()[1].array_view().unwrap().array, vec![1, 3, 2]);
    }

    #[test]
    fn test_graph_view_builders() {
        let visited = vec!["A".to_string()];
        let edges = vec![EdgeRef::new("A", "B")];
        let view = GraphView::of(&visited, &edges)
            .current("A")
            .comparing("B")
            .queue(["B", "C"]);

        assert_eq!(view.current.as_deref(), Some("A"));
        assert_eq!(view.comparing, vec!["B".to_string()]);
        assert_eq!(view.queue, Some(vec!["B".to_string(), "C".to_string()]));
        assert!(view.path_nodes.is_empty());
    }

    #[test]
    fn test_frame_json_is_tagged_by_kind() {
        let trace = TraceRecorder::new().finish(&[1], "only", ArrayView::of(&[7]));
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json[0]["view"]["kind"], "array");
        assert_eq!(json[0]["highlightedLines"][0], 1);
        assert_eq!(json[0]["complete"], true);
    }
}
