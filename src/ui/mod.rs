//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: render functions that are pure functions of the current
//!   frame plus static metadata (array bars, graph canvas, pseudocode, narration,
//!   algorithm info, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`PlaybackController`] and call [`App::run`] to start the event loop.
//!
//! [`PlaybackController`]: crate::playback::PlaybackController
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, Scene};
