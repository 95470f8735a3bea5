//! Rendering logic for each TUI pane

pub mod array;
pub mod graph;
pub mod info;
pub mod narration;
pub mod pseudocode;
pub mod status;

pub use array::render_array_pane;
pub use graph::{render_graph_pane, Endpoints};
pub use info::render_info_pane;
pub use narration::render_narration_pane;
pub use pseudocode::{render_pseudocode_pane, PseudocodeScrollState};
pub use status::{render_status_bar, StatusInfo};
