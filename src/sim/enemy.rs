//! Enemy behavior state machine
//!
//! An enemy wanders at its resting velocity until it takes damage, then
//! panics and runs for the nearest obstacle. Once fully behind cover it hides,
//! peeking out now and then, and returns to wandering after a random recovery
//! time. Running out of hit points starts a one-way death fall.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::{find_nearest, velocity_toward};
use super::schedule::{ActionQueue, ScheduledAction};
use crate::settings::{EnemyTuning, SpawnTuning};

/// Behavior mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Cruising at the resting velocity
    #[default]
    Wander,
    /// Fleeing toward the nearest obstacle
    Panic,
    /// Behind cover, stationary apart from peeks
    Hide,
}

/// Something that can move an enemy between modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Hit points dropped below the comfort threshold
    Struck,
    /// An obstacle fully encloses the enemy
    Covered,
    /// The recovery time has passed
    Recovered,
}

impl Mode {
    /// Transition table; `None` means the event does not apply in this mode
    pub fn on(self, event: ModeEvent) -> Option<Mode> {
        match (self, event) {
            (Mode::Wander, ModeEvent::Struck) => Some(Mode::Panic),
            (Mode::Hide, ModeEvent::Struck) => Some(Mode::Panic),
            (Mode::Panic, ModeEvent::Covered) => Some(Mode::Hide),
            (Mode::Hide, ModeEvent::Recovered) => Some(Mode::Wander),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Wander => "wander",
            Mode::Panic => "panic",
            Mode::Hide => "hide",
        }
    }
}

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// A hostile body with behavior state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    default_vel: Vec2,
    panic_multiplier: f32,
    mode: Mode,
    actions: ActionQueue,
    /// When hiding ends; `None` until the enemy first hides
    recovery_at_ms: Option<u64>,
    /// Hit points at the last panic
    comfort_hp: i32,
    dead: bool,
    facing: Facing,
}

impl Enemy {
    pub fn new(id: u32, mut body: Body, default_vel: Vec2, panic_multiplier: f32) -> Self {
        body.vel = default_vel;
        let comfort_hp = body.max_hp();
        let mut enemy = Self {
            id,
            body,
            default_vel,
            panic_multiplier,
            mode: Mode::Wander,
            actions: ActionQueue::new(),
            recovery_at_ms: None,
            comfort_hp,
            dead: false,
            facing: Facing::Right,
        };
        enemy.update_facing();
        enemy
    }

    /// A fresh enemy at `point` using the spawn and behavior tuning
    pub fn spawn(id: u32, point: Vec2, spawn: &SpawnTuning, tuning: &EnemyTuning) -> Self {
        let body = Body::new(point, spawn.size, spawn.distance, spawn.hp);
        Self::new(id, body, spawn.velocity, tuning.panic_multiplier)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn comfort_hp(&self) -> i32 {
        self.comfort_hp
    }

    pub fn recovery_at_ms(&self) -> Option<u64> {
        self.recovery_at_ms
    }

    pub fn default_vel(&self) -> Vec2 {
        self.default_vel
    }

    pub fn actions(&self) -> &ActionQueue {
        &self.actions
    }

    pub fn schedule(&mut self, action: ScheduledAction) {
        self.actions.push(action);
    }

    /// Reverse horizontal direction; dead enemies keep falling straight
    pub fn change_direction(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.body.vel.x = -self.body.vel.x;
        self.update_facing();
        true
    }

    /// Advance one frame at time `now_ms`.
    ///
    /// Returns true on the frame the body is first marked for removal.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        obstacles: &[Body],
        tuning: &EnemyTuning,
        rng: &mut R,
    ) -> bool {
        if let Some(vel) = self.actions.evaluate(now_ms) {
            self.body.vel = vel;
        }

        let removed = self.body.update();

        if self.body.is_depleted() && !self.dead {
            self.die(now_ms, tuning);
        }

        if !self.dead {
            if self.body.hp < self.comfort_hp && self.transition(ModeEvent::Struck) {
                self.panic(obstacles);
                self.comfort_hp = self.body.hp;
            }

            if self.mode == Mode::Panic && obstacles.iter().any(|o| o.encloses(&self.body)) {
                self.hide(now_ms, tuning, rng);
            }

            if self.mode == Mode::Hide {
                self.update_hidden(now_ms, obstacles, tuning, rng);
            }
        }

        self.update_facing();
        removed
    }

    fn transition(&mut self, event: ModeEvent) -> bool {
        match self.mode.on(event) {
            Some(next) => {
                log::debug!(
                    "Enemy {}: {} -> {} ({:?})",
                    self.id,
                    self.mode.as_str(),
                    next.as_str(),
                    event
                );
                self.mode = next;
                true
            }
            None => false,
        }
    }

    /// Head for the nearest obstacle at the panic speed
    fn panic(&mut self, obstacles: &[Body]) {
        self.actions.clear();
        let Some(nearest) = find_nearest(&self.body, obstacles) else {
            return;
        };
        let goal = obstacles[nearest].pos;
        let speed = self.default_vel.length() * self.panic_multiplier;
        self.body.vel = velocity_toward(speed, self.body.pos, goal);
    }

    fn hide<R: Rng + ?Sized>(&mut self, now_ms: u64, tuning: &EnemyTuning, rng: &mut R) {
        if !self.transition(ModeEvent::Covered) {
            return;
        }
        self.body.vel = Vec2::ZERO;
        self.recovery_at_ms = Some(now_ms + tuning.recovery_ms.sample(rng));
    }

    fn update_hidden<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        obstacles: &[Body],
        tuning: &EnemyTuning,
        rng: &mut R,
    ) {
        let recovered = self.recovery_at_ms.is_none_or(|at| now_ms >= at);
        if recovered && self.transition(ModeEvent::Recovered) {
            self.actions.clear();
            self.body.vel = self.default_vel;
            return;
        }

        if self.actions.is_empty() {
            let start = now_ms + tuning.peek_delay_ms.sample(rng);
            self.peek(start, tuning.peek_duration_ms, tuning.peek_speed);
        }

        // Settle between peeks
        if obstacles.iter().any(|o| o.encloses(&self.body)) {
            self.body.vel = Vec2::ZERO;
        }
    }

    /// Out and back again, each leg taking half of `duration_ms`
    pub fn peek(&mut self, start_ms: u64, duration_ms: u64, speed: f32) {
        let half = duration_ms / 2;
        self.actions
            .push(ScheduledAction::new(start_ms, half, Vec2::new(speed, 0.0)));
        self.actions
            .push(ScheduledAction::new(start_ms + half, half, Vec2::new(-speed, 0.0)));
    }

    fn die(&mut self, now_ms: u64, tuning: &EnemyTuning) {
        self.dead = true;
        self.actions.clear();
        self.actions.push(
            ScheduledAction::new(now_ms, tuning.death_fall_ms, Vec2::ZERO)
                .with_accel(tuning.death_fall_accel),
        );
        log::debug!("Enemy {} died at ({}, {})", self.id, self.body.pos.x, self.body.pos.y);
    }

    fn update_facing(&mut self) {
        if self.dead {
            return;
        }
        self.facing = if self.body.vel.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        };
    }
}
