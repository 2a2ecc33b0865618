//! Table construction parameters
//!
//! Supplied once when the table is populated. Can be loaded from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration cannot build a table
#[derive(Debug)]
pub enum ConfigError {
    NoBalls,
    BadRadius { min: f32, max: f32 },
    BadDimensions { width: f32, height: f32 },
    BadRestitution(f32),
    /// The largest ball cannot be placed inside the spawn margin
    TableTooSmall,
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoBalls => write!(f, "ball count must be at least 1"),
            ConfigError::BadRadius { min, max } => {
                write!(f, "radius range {min}..={max} must be positive and ordered")
            }
            ConfigError::BadDimensions { width, height } => {
                write!(f, "table size {width}x{height} must be positive")
            }
            ConfigError::BadRestitution(r) => write!(f, "restitution {r} must be in (0, 1]"),
            ConfigError::TableTooSmall => write!(f, "table is too small for the largest ball"),
            ConfigError::Json(e) => write!(f, "invalid config JSON: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Table and ball parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub ball_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub width: f32,
    pub height: f32,
    /// Fraction of velocity kept after each impact
    pub restitution: f32,
    /// RNG seed; a random one is used when absent
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            ball_count: DEFAULT_BALL_COUNT,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            restitution: DEFAULT_RESTITUTION,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the parameters can produce a table
    ///
    /// This does not prove the requested balls fit; dense tables may still
    /// spin forever during placement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ball_count == 0 {
            return Err(ConfigError::NoBalls);
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(ConfigError::BadRadius {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(ConfigError::BadRestitution(self.restitution));
        }
        let span = 2.0 * (self.max_radius + SPAWN_MARGIN);
        if span > self.width || span > self.height {
            return Err(ConfigError::TableTooSmall);
        }
        Ok(())
    }
}
