//! Time-window button debouncer.
//!
//! A raw level change is only committed when more than the debounce
//! window has passed since the previous committed change. Changes inside
//! the window are dropped outright; they do not restart the window.
//!
//! Timestamps are free-running `u32` milliseconds. Elapsed time is taken
//! with `wrapping_sub`, so the ~49.7-day counter wrap is harmless.

use crate::config::DEBOUNCE_WINDOW_MS;

/// Logic level of a released button (pull-up, active-low wiring).
pub const RELEASED: bool = true;

/// Logic level of a pressed button.
pub const PRESSED: bool = false;

/// A committed level change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released → pressed.
    Falling,
    /// Pressed → released.
    Rising,
}

/// Debounce state for one physical button.
#[derive(Clone, Debug)]
pub struct Debouncer {
    last_level: bool,
    last_change_ms: u32,
    window_ms: u32,
}

impl Debouncer {
    /// Button assumed released at `now_ms`.
    pub const fn new(now_ms: u32) -> Self {
        Self::with_window(now_ms, DEBOUNCE_WINDOW_MS)
    }

    pub const fn with_window(now_ms: u32, window_ms: u32) -> Self {
        Self {
            last_level: RELEASED,
            last_change_ms: now_ms,
            window_ms,
        }
    }

    /// Feed one raw sample. Returns the edge if the change was committed.
    pub fn update(&mut self, raw_level: bool, now_ms: u32) -> Option<Edge> {
        if raw_level == self.last_level {
            return None;
        }

        if now_ms.wrapping_sub(self.last_change_ms) <= self.window_ms {
            return None;
        }

        self.last_level = raw_level;
        self.last_change_ms = now_ms;

        if raw_level == PRESSED {
            Some(Edge::Falling)
        } else {
            Some(Edge::Rising)
        }
    }

    /// Last committed level.
    pub fn level(&self) -> bool {
        self.last_level
    }

    pub fn is_pressed(&self) -> bool {
        self.last_level == PRESSED
    }
}
