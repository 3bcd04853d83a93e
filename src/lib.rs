//! Pooper Hunt - a 2D cover shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (bodies, projectiles, enemy behavior, scene tick)
//! - `renderer`: Draw-call seam and image caching
//! - `platform`: Clock and input sources
//! - `settings`: Scene configuration and gameplay tuning
//! - `error`: Asset and configuration errors

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AssetError, ConfigError};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Frames per second the per-frame velocities are tuned for
    pub const TARGET_FPS: u32 = 60;
    /// Cadence of the external direction-flip timer
    pub const DIRECTION_TICK_MS: u64 = 1000;
    /// Chance that a wandering enemy flips direction on each direction tick
    pub const DIRECTION_FLIP_CHANCE: f64 = 0.25;

    /// Smallest award for a shot that kills anything
    pub const MIN_KILL_SCORE: u64 = 100;

    /// Hit point bar geometry (pixels)
    pub const HP_BAR_OFFSET: f32 = 15.0;
    pub const HP_BAR_HEIGHT: f32 = 10.0;
    pub const HP_BAR_INSET: f32 = 3.0;

    /// Hit point value that marks a body as invulnerable
    pub const INVULNERABLE_HP: i32 = -1;
}
