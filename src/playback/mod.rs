//! Playback controller for a recorded trace
//!
//! [`PlaybackController`] treats a [`Trace`] as an immutable timeline and
//! holds the only time-based state in the crate: a single pending
//! auto-advance. The controller never sleeps or spawns anything. The owner's
//! event loop calls [`PlaybackController::tick_at`] and uses
//! [`PlaybackController::time_until_next`] as its poll timeout.
//!
//! # States
//!
//! ```text
//!            play                tick (reaches last)
//!   Idle ───────────▶ Playing ─────────────────────▶ Finished
//!    ▲                 │   ▲                            │
//!    │ reset      pause│   │play                        │ play (rewinds to 0)
//!    │                 ▼   │                            │
//!    └──────────────  Paused ◀──────────────────────────┘
//! ```
//!
//! `playing` is exactly "an advance is pending". Pausing, resetting, or loading
//! a new trace drops the pending advance, so a cancelled advance can never fire.
//!
//! # Speed
//!
//! Each advance waits `base_interval / speed`. Changing the speed while playing
//! re-arms the pending advance from the moment of the change.

use crate::trace::{Frame, Trace};
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace};

/// Delay between frames at 1x
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// Accepted speed multipliers, inclusive
pub const SPEED_RANGE: (f64, f64) = (0.01, 100.0);

/// Longest accepted delay between frames at 1x
pub const MAX_BASE_INTERVAL: Duration = Duration::from_secs(3600);

/// Speed multipliers offered by the front end
pub const SPEED_PRESETS: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlaybackError {
    #[error(
        "playback speed must be between {}x and {}x (got {})",
        SPEED_RANGE.0,
        SPEED_RANGE.1,
        .0
    )]
    InvalidSpeed(f64),

    #[error("base interval must be at most {}s (got {}ms)", MAX_BASE_INTERVAL.as_secs(), .0.as_millis())]
    InvalidInterval(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub base_interval: Duration,
    pub speed: f64,
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<()> {
        validate_speed(self.speed)?;
        if self.base_interval > MAX_BASE_INTERVAL {
            return Err(PlaybackError::InvalidInterval(self.base_interval));
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_interval: DEFAULT_BASE_INTERVAL,
            speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// At the first frame, not playing
    Idle,
    Playing,
    /// Somewhere in the middle, not playing
    Paused,
    /// At the last frame, not playing
    Finished,
}

/// The one in-flight auto-advance
#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    due: Instant,
}

#[derive(Debug)]
pub struct PlaybackController {
    trace: Trace,
    index: usize,
    speed: f64,
    base_interval: Duration,
    pending: Option<PendingAdvance>,
}

impl PlaybackController {
    pub fn new(trace: Trace) -> Self {
        PlaybackController {
            trace,
            index: 0,
            speed: 1.0,
            base_interval: DEFAULT_BASE_INTERVAL,
            pending: None,
        }
    }

    pub fn with_config(trace: Trace, config: PlaybackConfig) -> Result<Self> {
        config.validate()?;
        Ok(PlaybackController {
            speed: config.speed,
            base_interval: config.base_interval,
            ..PlaybackController::new(trace)
        })
    }

    // ========== Queries ==========

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.trace.get(self.index)
    }

    /// Total number of frames
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn is_playing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Delay before the next auto-advance at the current speed
    pub fn interval(&self) -> Duration {
        self.base_interval.div_f64(self.speed)
    }

    pub fn state(&self) -> PlaybackState {
        if self.is_playing() {
            PlaybackState::Playing
        } else if self.index == 0 {
            PlaybackState::Idle
        } else if self.index == self.last_index() {
            PlaybackState::Finished
        } else {
            PlaybackState::Paused
        }
    }

    /// Time left before the pending advance is due, `None` when not playing
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    // ========== Transitions ==========

    /// Replace the timeline; always resets
    pub fn load(&mut self, trace: Trace) {
        debug!(frames = trace.len(), "loading new trace");
        self.trace = trace;
        self.reset();
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    /// Start auto-advancing; rewinds first when sitting on the last frame
    pub fn play_at(&mut self, now: Instant) {
        if self.index >= self.last_index() {
            self.index = 0;
        }
        if self.trace.len() < 2 {
            trace!("nothing to play");
            return;
        }
        if self.pending.is_none() {
            self.arm(now);
            debug!(index = self.index, speed = self.speed, "playback started");
        }
    }

    pub fn pause(&mut self) {
        self.cancel();
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.cancel();
    }

    /// Move one frame forward; `false` at the last frame
    pub fn step_forward(&mut self) -> bool {
        if self.index >= self.last_index() {
            return false;
        }
        self.index += 1;
        if self.index == self.last_index() {
            self.cancel();
        }
        true
    }

    /// Move one frame back; `false` at the first frame
    pub fn step_backward(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to `index`; ignored when out of bounds
    pub fn seek(&mut self, index: usize) -> bool {
        if index >= self.trace.len() {
            trace!(index, len = self.trace.len(), "seek out of bounds ignored");
            return false;
        }
        self.index = index;
        true
    }

    pub fn change_speed(&mut self, speed: f64) -> Result<()> {
        self.change_speed_at(speed, Instant::now())
    }

    /// Set the multiplier; a pending advance is re-armed with the new interval
    pub fn change_speed_at(&mut self, speed: f64, now: Instant) -> Result<()> {
        validate_speed(speed)?;
        self.speed = speed;
        if self.pending.is_some() {
            self.arm(now);
        }
        debug!(speed, "playback speed changed");
        Ok(())
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Apply the pending advance if it is due; `true` when the index moved
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if now < pending.due {
            return false;
        }

        self.pending = None;
        if self.index >= self.last_index() {
            return false;
        }
        self.index += 1;
        if self.index < self.last_index() {
            self.arm(now);
        } else {
            debug!(index = self.index, "playback finished");
        }
        true
    }

    fn last_index(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    fn arm(&mut self, now: Instant) {
        self.pending = Some(PendingAdvance {
            due: now + self.interval(),
        });
    }

    fn cancel(&mut self) {
        if self.pending.take().is_some() {
            trace!(index = self.index, "pending advance cancelled");
        }
    }
}

fn validate_speed(speed: f64) -> Result<()> {
    // Also rejects NaN
    if (SPEED_RANGE.0..=SPEED_RANGE.1).contains(&speed) {
        Ok(())
    } else {
        Err(PlaybackError::InvalidSpeed(speed))
    }
}

/// Next faster preset, staying on the fastest
pub fn faster(speed: f64) -> f64 {
    SPEED_PRESETS
        .iter()
        .copied()
        .find(|&preset| preset > speed)
        .unwrap_or(SPEED_PRESETS[SPEED_PRESETS.len() - 1])
}

/// Next slower preset, staying on the slowest
pub fn slower(speed: f64) -> f64 {
    SPEED_PRESETS
        .iter()
        .rev()
        .copied()
        .find(|&preset| preset < speed)
        .unwrap_or(SPEED_PRESETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bubble_sort;

    const SECOND: Duration = Duration::from_secs(1);

    fn controller() -> PlaybackController {
        // 7 frames: start, set n, pass, compare, no swap, pass end, sorted
        PlaybackController::new(bubble_sort::generate(&[1, 2]))
    }

    #[test]
    fn test_initial_state() {
        let playback = controller();
        assert_eq!(playback.index(), 0);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.is_playing());
        assert_eq!(playback.time_until_next(Instant::now()), None);
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut playback = controller();
        let t0 = Instant::now();
        playback.play_at(t0);

        assert!(!playback.tick_at(t0 + Duration::from_millis(999)));
        assert_eq!(playback.index(), 0);
        assert!(playback.tick_at(t0 + SECOND));
        assert_eq!(playback.index(), 1);
        assert_eq!(playback.time_until_next(t0 + SECOND), Some(SECOND));
    }

    #[test]
    fn test_plays_to_finished() {
        let mut playback = controller();
        let last = playback.len() - 1;
        let mut now = Instant::now();
        playback.play_at(now);
        for _ in 0..last {
            now += SECOND;
            assert!(playback.tick_at(now));
        }
        assert_eq!(playback.index(), last);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert!(!playback.tick_at(now + SECOND * 10));
    }

    #[test]
    fn test_speed_divides_interval() {
        let mut playback = controller();
        let t0 = Instant::now();
        playback.change_speed_at(2.0, t0).unwrap();
        playback.play_at(t0);
        assert!(playback.tick_at(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_speed_change_rearms_pending_advance() {
        let mut playback = controller();
        let t0 = Instant::now();
        playback.play_at(t0);
        playback
            .change_speed_at(0.5, t0 + Duration::from_millis(900))
            .unwrap();
        assert!(!playback.tick_at(t0 + SECOND));
        assert!(playback.tick_at(t0 + Duration::from_millis(2900)));
    }

    #[test]
    fn test_tiny_speed_rejected_before_play() {
        let mut playback = controller();
        let t0 = Instant::now();
        assert_eq!(
            playback.change_speed_at(1e-300, t0),
            Err(PlaybackError::InvalidSpeed(1e-300))
        );
        playback.play_at(t0);
        assert_eq!(playback.time_until_next(t0), Some(SECOND));
    }

    #[test]
    fn test_config_bounds() {
        assert!(PlaybackConfig::default().validate().is_ok());
        let slowest = PlaybackConfig {
            base_interval: MAX_BASE_INTERVAL,
            speed: SPEED_RANGE.0,
        };
        let mut playback = PlaybackController::with_config(controller().trace().clone(), slowest).unwrap();
        let t0 = Instant::now();
        playback.play_at(t0);
        assert!(playback.is_playing());

        let too_long = PlaybackConfig {
            base_interval: MAX_BASE_INTERVAL + SECOND,
            ..PlaybackConfig::default()
        };
        assert_eq!(
            too_long.validate(),
            Err(PlaybackError::InvalidInterval(MAX_BASE_INTERVAL + SECOND))
        );
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let mut playback = controller();
        assert_eq!(
            playback.change_speed(0.0),
            Err(PlaybackError::InvalidSpeed(0.0))
        );
        assert!(playback.change_speed(f64::INFINITY).is_err());
        assert!(playback.change_speed(f64::NAN).is_err());
        assert_eq!(playback.speed(), 1.0);
    }

    #[test]
    fn test_speed_presets() {
        assert_eq!(faster(1.0), 1.5);
        assert_eq!(faster(2.0), 2.0);
        assert_eq!(slower(1.0), 0.5);
        assert_eq!(slower(0.5), 0.5);
        assert_eq!(slower(3.0), 2.0);
    }
}
