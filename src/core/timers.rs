//! Core domain: step-driven timed effects.
//!
//! Everything that "waits" in gameplay (wall-jump lockout, invincibility,
//! squish-then-fade, bouncepad compression) is one of these, advanced
//! explicitly once per fixed step by the owning system.

use bevy::prelude::*;
use std::time::Duration;

/// Remaining time below this counts as elapsed, so a run of float-sized
/// steps lands on the step that sums to the duration.
const SNAP: Duration = Duration::from_micros(1);

/// A one-shot [`Timer`] that sits paused until started and pauses again
/// when it finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTimer {
    timer: Timer,
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl StepTimer {
    /// Create an idle timer with the given duration in seconds.
    pub fn new(duration: f32) -> Self {
        let mut timer = Timer::from_seconds(duration.max(0.0), TimerMode::Once);
        timer.pause();
        Self { timer }
    }

    /// (Re)start from zero.
    pub fn start(&mut self) {
        self.timer.reset();
        self.timer.unpause();
    }

    /// Stop without finishing.
    pub fn cancel(&mut self) {
        self.timer.reset();
        self.timer.pause();
    }

    /// Advance by `dt` seconds. Returns true on the step the timer finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.timer.is_paused() {
            return false;
        }
        let mut step = Duration::from_secs_f32(dt.max(0.0));
        if self.timer.remaining().saturating_sub(step) <= SNAP {
            step = self.timer.remaining();
        }
        self.timer.tick(step);
        if self.timer.just_finished() {
            self.timer.pause();
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        !self.timer.is_paused()
    }

    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed_secs()
    }

    pub fn duration(&self) -> f32 {
        self.timer.duration().as_secs_f32()
    }

    /// Progress in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.timer.fraction()
    }
}
