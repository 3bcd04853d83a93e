//! Shots and damage falloff
//!
//! A projectile sits at its aim point and "travels" only in depth: each frame
//! adds `speed` to its travelled distance, and a body can be hit once the shot
//! has travelled at least as far as the body's own `distance`. With a large
//! speed this is a hitscan that resolves on the frame it is fired.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::distance;
use crate::settings::WeaponTuning;

/// A fired shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Impact point (equal to the aim point)
    pub pos: Vec2,
    /// Travel per frame
    pub speed: f32,
    /// Accumulated travel, never decreases
    traveled: f32,
    pub damage: f32,
    pub aoe_damage: f32,
    /// Area radius; zero or negative disables area damage
    pub aoe_range: f32,
    pub aoe_falloff: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, speed: f32, damage: f32) -> Self {
        Self {
            pos,
            speed: speed.max(0.0),
            traveled: 0.0,
            damage,
            aoe_damage: 0.0,
            aoe_range: 0.0,
            aoe_falloff: true,
        }
    }

    /// Builder for area damage
    pub fn with_area(mut self, aoe_damage: f32, aoe_range: f32, aoe_falloff: bool) -> Self {
        self.aoe_damage = aoe_damage;
        self.aoe_range = aoe_range;
        self.aoe_falloff = aoe_falloff;
        self
    }

    /// A shot at `target` using the configured weapon
    pub fn fire(target: Vec2, weapon: &WeaponTuning) -> Self {
        Self::new(target, weapon.speed, weapon.damage).with_area(
            weapon.aoe_damage,
            weapon.aoe_range,
            weapon.aoe_falloff,
        )
    }

    pub fn traveled(&self) -> f32 {
        self.traveled
    }

    pub fn has_area(&self) -> bool {
        self.aoe_range > 0.0
    }

    /// Advance one frame
    pub fn advance(&mut self) {
        self.traveled += self.speed;
    }

    /// Indices (in iteration order) of the candidates this shot hits.
    ///
    /// Candidates deeper than the distance travelled so far are skipped. Without
    /// an area radius the impact point must lie on the body; with one, the
    /// body's center must be within range (only when `check_area` is set).
    pub fn check_for_hit<'a, I>(&self, candidates: I, check_area: bool) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let reach = self.traveled.floor();
        candidates
            .into_iter()
            .enumerate()
            .filter(|(_, body)| body.distance as f32 <= reach)
            .filter(|(_, body)| {
                if !self.has_area() {
                    body.lies_on(self.pos.x, self.pos.y)
                } else {
                    check_area && distance(body.center(), self.pos) <= self.aoe_range
                }
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Direct hit scaling: 1 at the body's center, 0 at its horizontal edge
    pub fn direct_multiplier(&self, body: &Body) -> f32 {
        let radius = body.radius();
        if radius <= 0.0 {
            return 0.0;
        }
        let d = distance(body.center(), self.pos);
        ((radius - d) / radius).max(0.0)
    }

    /// Area scaling: 0 outside the radius, otherwise 1 or a linear falloff
    pub fn area_multiplier(&self, body: &Body) -> f32 {
        if !self.has_area() {
            return 0.0;
        }
        let d = distance(body.center(), self.pos);
        if d > self.aoe_range {
            return 0.0;
        }
        if self.aoe_falloff {
            ((self.aoe_range - d) / self.aoe_range).max(0.0)
        } else {
            1.0
        }
    }

    /// The stronger of the direct and area channels; the two are never summed
    pub fn damage_against(&self, body: &Body) -> f32 {
        let direct = self.damage * self.direct_multiplier(body);
        let area = self.aoe_damage * self.area_multiplier(body);
        direct.max(area)
    }
}
