//! Simulated bodies
//!
//! A `Body` is the shared physical part of every obstacle, enemy and popup:
//! an axis-aligned box anchored at its top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::ObstacleSpec;

/// An axis-aligned box with hit points and a per-frame velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left anchor
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    pub hp: i32,
    max_hp: i32,
    /// Depth from the shooter; a shot reaches the body once it has travelled this far
    pub distance: u32,
    invulnerable: bool,
    /// Set once the body has run out of hit points
    #[serde(default)]
    removed: bool,
}

impl Body {
    /// A negative `hp` makes the body permanently invulnerable
    pub fn new(pos: Vec2, size: Vec2, distance: u32, hp: i32) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            hp,
            max_hp: hp,
            distance,
            invulnerable: hp < 0,
            removed: false,
        }
    }

    /// An invulnerable obstacle at depth zero
    pub fn obstacle(obstacle: &ObstacleSpec) -> Self {
        Self::new(
            Vec2::new(obstacle.x, obstacle.y),
            Vec2::new(obstacle.width, obstacle.height),
            0,
            crate::consts::INVULNERABLE_HP,
        )
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Whether a previous `update` marked this body for removal
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Out of hit points (never true for invulnerable bodies)
    pub fn is_depleted(&self) -> bool {
        !self.invulnerable && self.hp <= 0
    }

    /// Translate without any collision checks
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Advance by one frame of velocity, then mark for removal if depleted.
    ///
    /// Returns true only on the call that applies the mark.
    pub fn update(&mut self) -> bool {
        self.move_by(self.vel);
        if self.is_depleted() && !self.removed {
            self.removed = true;
            return true;
        }
        false
    }

    /// Subtract damage; invulnerable bodies and negative amounts are ignored
    pub fn apply_damage(&mut self, amount: i32) {
        if !self.invulnerable && amount > 0 {
            self.hp -= amount;
        }
    }

    /// Geometric center of the box
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Distance from the center to the horizontal edge
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Remaining hit points as a fraction of the maximum, clamped to `[0, 1]`
    pub fn hp_fraction(&self) -> f32 {
        if self.invulnerable || self.max_hp <= 0 {
            return 1.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Point lies inside the box, edges included
    pub fn lies_on(&self, px: f32, py: f32) -> bool {
        self.pos.x <= px && px <= self.right() && self.pos.y <= py && py <= self.bottom()
    }

    /// `other` is fully inside this box, edges included
    pub fn encloses(&self, other: &Body) -> bool {
        self.pos.x <= other.pos.x
            && other.right() <= self.right()
            && self.pos.y <= other.pos.y
            && other.bottom() <= self.bottom()
    }
}
