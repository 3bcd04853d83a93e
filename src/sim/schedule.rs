//! Timed velocity overrides
//!
//! Enemies script short movements (peeks, the death fall) as actions with an
//! absolute start time. All times are milliseconds from the external clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Velocity override for the interval `[start_ms, start_ms + duration_ms]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub start_ms: u64,
    pub duration_ms: u64,
    /// Velocity applied while active; `vel.y` grows by `accel_y` each active frame
    pub vel: Vec2,
    pub accel_y: f32,
}

impl ScheduledAction {
    pub fn new(start_ms: u64, duration_ms: u64, vel: Vec2) -> Self {
        Self {
            start_ms,
            duration_ms,
            vel,
            accel_y: 0.0,
        }
    }

    pub fn with_accel(mut self, accel_y: f32) -> Self {
        self.accel_y = accel_y;
        self
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.end_ms() < now_ms
    }

    pub fn contains(&self, now_ms: u64) -> bool {
        self.start_ms <= now_ms && now_ms <= self.end_ms()
    }
}

/// An enemy's pending actions, kept sorted by start time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    actions: Vec<ScheduledAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after any action with the same or an earlier start
    pub fn push(&mut self, action: ScheduledAction) {
        let at = self.actions.partition_point(|a| a.start_ms <= action.start_ms);
        self.actions.insert(at, action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledAction> {
        self.actions.iter()
    }

    /// Drop expired actions and return the velocity of the first active one.
    ///
    /// The chosen action's y-velocity is advanced by its acceleration, so a
    /// falling action speeds up every frame it stays active.
    pub fn evaluate(&mut self, now_ms: u64) -> Option<Vec2> {
        self.actions.retain(|a| !a.is_expired(now_ms));
        let action = self.actions.iter_mut().find(|a| a.contains(now_ms))?;
        action.vel.y += action.accel_y;
        Some(action.vel)
    }
}
