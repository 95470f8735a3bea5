//! # Introduction
//!
//! Algoscope runs classic algorithms over user input and records every step
//! as an immutable [`trace::Frame`]. The recorded trace is then played back
//! forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui), or dumped as text or JSON.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Generator → Trace → PlaybackController → TUI / text / JSON
//! ```
//!
//! 1. [`algorithms`]: one pure generator per algorithm plus the static
//!    catalog of descriptors (name, complexity, pseudocode).
//! 2. [`graph`]: the graph model used by the pathfinding and traversal
//!    generators, including the built-in sample graph.
//! 3. [`trace`]: frames, their array or graph views, and the recorder that
//!    numbers them and seals the terminal frame.
//! 4. [`playback`]: cursor over a trace with a single pending auto-advance.
//! 5. [`cli`] and [`logging`]: argument parsing, input validation and
//!    `tracing` setup.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Bubble sort, binary search, Dijkstra's shortest path and breadth-first
//! search.

pub mod algorithms;
pub mod cli;
pub mod graph;
pub mod logging;
pub mod playback;
pub mod trace;
pub mod ui;
