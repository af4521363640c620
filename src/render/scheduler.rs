//! Frame rate cap.
//!
//! The scheduler never sleeps. When a frame finishes under budget it records
//! how long to wait, and [`FrameScheduler::should_render`] answers `false`
//! until that time has passed. The caller keeps polling events in between, so
//! input stays responsive while the cap is active.
//!
//! All durations are whole microseconds. Instants are passed in by the caller.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    target_fps: u16,
    frame_start: Option<Instant>,
    wait_start: Option<Instant>,
    wait_micros: u64,
}

impl FrameScheduler {
    /// `target_fps == 0` disables the cap.
    pub fn new(target_fps: u16) -> Self {
        Self {
            target_fps,
            frame_start: None,
            wait_start: None,
            wait_micros: 0,
        }
    }

    pub fn target_fps(&self) -> u16 {
        self.target_fps
    }

    pub fn set_target_fps(&mut self, target_fps: u16) {
        self.target_fps = target_fps;
        if target_fps == 0 {
            self.wait_micros = 0;
        }
    }

    /// Microseconds available per frame, or `None` when uncapped.
    pub fn frame_budget_micros(&self) -> Option<u64> {
        (self.target_fps > 0).then(|| 1_000_000 / u64::from(self.target_fps))
    }

    /// Remaining wait recorded by the last frame, in microseconds.
    pub fn wait_micros(&self) -> u64 {
        self.wait_micros
    }

    /// Whether a new frame may start at `now`. Clears the wait once it has elapsed.
    pub fn should_render(&mut self, now: Instant) -> bool {
        if self.wait_micros == 0 {
            return true;
        }
        let waited = self
            .wait_start
            .map_or(u64::MAX, |start| micros_between(start, now));
        if waited < self.wait_micros {
            return false;
        }
        self.wait_micros = 0;
        self.wait_start = None;
        true
    }

    pub fn begin_frame(&mut self, now: Instant) {
        self.frame_start = Some(now);
    }

    /// Records the wait for a frame that took less than the budget.
    pub fn end_frame(&mut self, now: Instant) {
        let Some(start) = self.frame_start.take() else {
            return;
        };
        let Some(budget) = self.frame_budget_micros() else {
            return;
        };
        let elapsed = micros_between(start, now);
        if elapsed < budget {
            self.wait_micros = budget - elapsed;
            self.wait_start = Some(now);
        }
    }
}

fn micros_between(start: Instant, end: Instant) -> u64 {
    u64::try_from(end.saturating_duration_since(start).as_micros()).unwrap_or(u64::MAX)
}
