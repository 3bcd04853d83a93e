//! Scene configuration and gameplay tuning
//!
//! Everything the source hard-coded (crate layout, spawn cadence, screen size,
//! shot range) plus the behavior constants that drifted between revisions.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Inclusive millisecond range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsRange {
    pub min: u64,
    pub max: u64,
}

impl MsRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Uniform sample in `[min, max]`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Axis-aligned obstacle placement (top-left anchor plus size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Enemy behavior tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Flee speed as a multiple of the resting speed
    pub panic_multiplier: f32,
    /// Total time of one out-and-back peek
    pub peek_duration_ms: u64,
    /// Horizontal speed while peeking (pixels/frame)
    pub peek_speed: f32,
    /// Delay before the next peek is scheduled to start
    pub peek_delay_ms: MsRange,
    /// Time spent hiding before returning to wander
    pub recovery_ms: MsRange,
    /// Length of the death fall
    pub death_fall_ms: u64,
    /// Downward acceleration of the death fall (pixels/frame²)
    pub death_fall_accel: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            panic_multiplier: 2.0,
            peek_duration_ms: 400,
            peek_speed: 4.0,
            peek_delay_ms: MsRange::new(1000, 5000),
            recovery_ms: MsRange::new(8000, 18000),
            death_fall_ms: 10_000,
            death_fall_accel: 0.5,
        }
    }
}

/// Shot parameters used on every click
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Travel per frame; very high values behave as hitscan
    pub speed: f32,
    pub damage: f32,
    pub aoe_damage: f32,
    /// Area radius; zero or negative disables area damage
    pub aoe_range: f32,
    pub aoe_falloff: bool,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            speed: 1000.0,
            damage: 80.0,
            aoe_damage: 0.0,
            aoe_range: 0.0,
            aoe_falloff: true,
        }
    }
}

/// Parameters for newly spawned enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub size: Vec2,
    pub hp: i32,
    /// Depth from the shooter; shots must travel this far to reach the enemy
    pub distance: u32,
    pub velocity: Vec2,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(50.0, 50.0),
            hp: 100,
            distance: 100,
            velocity: Vec2::new(2.0, 0.0),
        }
    }
}

/// Floating score text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupTuning {
    pub lifetime_ms: u64,
    /// Upward drift (pixels/frame)
    pub rise_speed: f32,
}

impl Default for PopupTuning {
    fn default() -> Self {
        Self {
            lifetime_ms: 1000,
            rise_speed: 1.0,
        }
    }
}

/// Full scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub spawn_point: Vec2,
    pub spawn_interval_ms: MsRange,
    pub obstacles: Vec<ObstacleSpec>,
    /// Playable area (width, height); enemies leaving it are culled
    pub screen_bounds: Vec2,
    /// Shots that travel further than this are discarded
    pub max_projectile_range: f32,
    pub enemy: EnemyTuning,
    pub weapon: WeaponTuning,
    pub spawn: SpawnTuning,
    pub popup: PopupTuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_point: Vec2::new(450.0, 300.0),
            spawn_interval_ms: MsRange::new(1000, 2000),
            obstacles: vec![
                ObstacleSpec {
                    x: 100.0,
                    y: 400.0,
                    width: 100.0,
                    height: 100.0,
                },
                ObstacleSpec {
                    x: 200.0,
                    y: 300.0,
                    width: 100.0,
                    height: 100.0,
                },
            ],
            screen_bounds: Vec2::new(900.0, 600.0),
            max_projectile_range: 1000.0,
            enemy: EnemyTuning::default(),
            weapon: WeaponTuning::default(),
            spawn: SpawnTuning::default(),
            popup: PopupTuning::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} obstacles, screen {}x{}",
            config.obstacles.len(),
            config.screen_bounds.x,
            config.screen_bounds.y
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_bounds.x <= 0.0 || self.screen_bounds.y <= 0.0 {
            return Err(ConfigError::EmptyScreen {
                width: self.screen_bounds.x,
                height: self.screen_bounds.y,
            });
        }
        if self.max_projectile_range <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "max_projectile_range",
                value: self.max_projectile_range,
            });
        }
        if self.weapon.speed <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "weapon.speed",
                value: self.weapon.speed,
            });
        }
        for (name, value) in [
            ("weapon.damage", self.weapon.damage),
            ("weapon.aoe_damage", self.weapon.aoe_damage),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        self.spawn_interval_ms.validate("spawn_interval_ms")?;
        self.enemy.peek_delay_ms.validate("enemy.peek_delay_ms")?;
        self.enemy.recovery_ms.validate("enemy.recovery_ms")?;

        for obstacle in &self.obstacles {
            if obstacle.width <= 0.0 || obstacle.height <= 0.0 {
                log::warn!("Obstacle at ({}, {}) has no area", obstacle.x, obstacle.y);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.obstacles.len(), 2);
        assert_eq!(config.screen_bounds, Vec2::new(900.0, 600.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "max_projectile_range": 500.0 }"#).unwrap();
        assert_eq!(config.max_projectile_range, 500.0);
        assert_eq!(config.spawn_interval_ms, MsRange::new(1000, 2000));
        assert_eq!(config.enemy.panic_multiplier, 2.0);
    }

    #[test]
    fn test_json_roundtrip_preserves_tuning() {
        let mut config = GameConfig::default();
        config.enemy.peek_duration_ms = 1000;
        config.weapon.aoe_range = 50.0;
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = GameConfig::default();
        config.spawn_interval_ms = MsRange::new(5000, 1000);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { name: "spawn_interval_ms", .. })
        ));
    }

    #[test]
    fn test_negative_damage_rejected() {
        let mut config = GameConfig::default();
        config.weapon.damage = -10.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "weapon.damage",
                value: -10.0
            })
        );

        let mut config = GameConfig::default();
        config.weapon.aoe_damage = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "weapon.aoe_damage",
                ..
            })
        ));

        // Zero is a disabled channel, not an error
        let mut config = GameConfig::default();
        config.weapon.damage = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_range_sample_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let range = MsRange::new(8000, 18000);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
        assert_eq!(MsRange::new(300, 300).sample(&mut rng), 300);
    }
}
