//! Platform abstraction layer
//!
//! The simulation only needs two things from the platform:
//! - A monotonic millisecond clock
//! - Polled input events and the cursor position

use std::collections::VecDeque;
use std::time::Instant;

use glam::Vec2;

use crate::sim::InputEvent;

/// Monotonic time source, queried once per frame
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock advanced explicitly (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// Source of input events
pub trait InputSource {
    /// Drain events since the last poll
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn cursor_position(&self) -> Vec2;
}

/// Replays queued frames of input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
    cursor: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events for one future poll
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Move the cursor and queue a click at its new position
    pub fn click_at(&mut self, pos: Vec2) {
        self.cursor = pos;
        self.push_frame(vec![InputEvent::Click { x: pos.x, y: pos.y }]);
    }

    pub fn set_cursor(&mut self, pos: Vec2) {
        self.cursor = pos;
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }

    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }
}

/// Emits `InputEvent::DirectionTick` on a fixed cadence
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: u64,
    next_ms: u64,
}

impl IntervalTimer {
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        Self {
            period_ms,
            next_ms: now_ms + period_ms,
        }
    }

    /// True once per elapsed period
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_ms {
            return false;
        }
        self.next_ms += self.period_ms.max(1);
        true
    }
}
