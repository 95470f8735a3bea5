//! Main TUI application state and logic

use crate::algorithms::AlgorithmInfo;
use crate::graph::Graph;
use crate::playback::{self, PlaybackController, PlaybackState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on how long the loop waits for a key
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What the visualization pane draws under the frame state
#[derive(Debug)]
pub enum Scene {
    Array,
    Graph {
        graph: Graph,
        start: String,
        end: Option<String>,
    },
}

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Pseudocode,
    Narration,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Pseudocode => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::Pseudocode,
        }
    }

    pub fn prev(self) -> Self {
        // Only two panes take focus
        self.next()
    }
}

/// The main application state
pub struct App {
    pub playback: PlaybackController,

    /// Descriptor of the algorithm that produced the trace
    pub info: &'static AlgorithmInfo,

    pub scene: Scene,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub pseudocode_scroll: crate::ui::panes::PseudocodeScrollState,

    /// `usize::MAX` follows the newest message
    pub narration_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(playback: PlaybackController, info: &'static AlgorithmInfo, scene: Scene) -> Self {
        App {
            playback,
            info,
            scene,
            focused_pane: FocusedPane::Pseudocode,
            pseudocode_scroll: Default::default(),
            narration_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let now = Instant::now();
            if self.playback.tick_at(now) {
                self.narration_scroll = usize::MAX;
                self.status_message = match self.playback.state() {
                    PlaybackState::Finished => "Playback complete".to_string(),
                    _ => "Playing...".to_string(),
                };
            }

            // Wake up in time for the next advance, but keep the UI responsive
            let timeout = self
                .playback
                .time_until_next(now)
                .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: visualization (top) | narration (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: info (top) | pseudocode (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(0)])
            .split(columns[1]);

        let current = self.playback.current_frame();

        match &self.scene {
            Scene::Array => super::panes::render_array_pane(
                frame,
                left_rows[0],
                current.and_then(|f| f.array_view()),
            ),
            Scene::Graph { graph, start, end } => super::panes::render_graph_pane(
                frame,
                left_rows[0],
                graph,
                current.and_then(|f| f.graph_view()),
                super::panes::Endpoints {
                    start,
                    end: end.as_deref(),
                },
            ),
        }

        super::panes::render_narration_pane(
            frame,
            left_rows[1],
            self.playback.trace(),
            self.playback.index(),
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
        );

        super::panes::render_info_pane(frame, right_rows[0], self.info);

        super::panes::render_pseudocode_pane(
            frame,
            right_rows[1],
            self.info.pseudocode,
            current.map_or(&[][..], |f| f.highlighted_lines.as_slice()),
            self.focused_pane == FocusedPane::Pseudocode,
            &mut self.pseudocode_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusInfo {
                message: &self.status_message,
                index: self.playback.index(),
                total: self.playback.len(),
                speed: self.playback.speed(),
                state: self.playback.state(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.playback.pause();
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.playback.step_forward()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.playback.pause();
                self.step_backward();
            }
            KeyCode::Right => {
                self.playback.pause();
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Pseudocode => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.pseudocode_scroll.target_line_row {
                        self.pseudocode_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Pseudocode => {
                    if let Some(row) = self.pseudocode_scroll.target_line_row {
                        self.pseudocode_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.set_speed(playback::faster(self.playback.speed()));
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.set_speed(playback::slower(self.playback.speed()));
            }
            KeyCode::Enter => {
                self.playback.pause();
                self.playback.seek(self.playback.len().saturating_sub(1));
                self.status_message = "Jumped to end".to_string();
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.playback.reset();
                self.status_message = "Jumped to start".to_string();
                self.narration_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    fn toggle_play(&mut self) {
        if self.playback.is_playing() {
            self.playback.pause();
            self.status_message = "Paused".to_string();
            return;
        }
        self.playback.play();
        self.narration_scroll = usize::MAX;
        self.status_message = if self.playback.is_playing() {
            "Playing...".to_string()
        } else {
            "Nothing to play".to_string()
        };
    }

    fn set_speed(&mut self, speed: f64) {
        match self.playback.change_speed(speed) {
            Ok(()) => self.status_message = format!("Speed {}x", speed),
            Err(e) => {
                debug!(error = %e, "speed change rejected");
                self.status_message = e.to_string();
            }
        }
    }

    fn step_forward(&mut self) {
        if self.playback.step_forward() {
            self.status_message = "Stepped forward".to_string();
            self.narration_scroll = usize::MAX;
        } else {
            self.status_message = "Cannot step forward: already at the last frame".to_string();
        }
    }

    fn step_backward(&mut self) {
        if self.playback.step_backward() {
            self.status_message = "Stepped backward".to_string();
            self.narration_scroll = usize::MAX;
        } else {
            self.status_message = "Cannot step backward: already at the first frame".to_string();
        }
    }
}
