//! Error types
//!
//! Gameplay itself is total; errors only come from loading assets and
//! validating configuration, both of which happen before the first frame.

use thiserror::Error;

/// Failure to produce an image handle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No image exists at the requested path
    #[error("image not found: {0}")]
    NotFound(String),

    /// The file exists but could not be decoded or scaled
    #[error("failed to decode image '{path}': {reason}")]
    Decode { path: String, reason: String },
}

/// A configuration that cannot drive a scene
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config '{path}': {reason}")]
    Io { path: String, reason: String },

    /// Configuration text is not valid JSON for `GameConfig`
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A `[min, max]` range with `min > max`
    #[error("invalid range for {name}: {min} > {max}")]
    InvertedRange { name: &'static str, min: u64, max: u64 },

    /// Screen bounds with a zero or negative extent
    #[error("screen bounds must be positive, got {width}x{height}")]
    EmptyScreen { width: f32, height: f32 },

    /// A value that must be strictly positive
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    /// A value that must not be below zero
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
