//! Match configuration
//!
//! Loaded from JSON (any missing field falls back to the classic defaults)
//! and validated before a match starts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;
use crate::colors::{BLUE, YELLOW};
use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a match needs at least 2 cannons, got {0}")]
    NotEnoughCannons(usize),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("total_rounds must be at least 1")]
    NoRounds,
    #[error("cannon {index} at ({x}, {y}) is outside the field")]
    CannonOutsideField { index: usize, x: f32, y: f32 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One player's cannon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannonConfig {
    /// Anchor position (world units)
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub ball_radius: f32,
    /// Velocity of a freshly loaded ball
    pub vx: f32,
    pub vy: f32,
}

impl CannonConfig {
    /// Standard 30x30 cannon resting on the ground at `x`
    pub fn at(x: f32, color: Color) -> Self {
        Self {
            x,
            y: CANNON_HEIGHT,
            width: CANNON_WIDTH,
            height: CANNON_HEIGHT,
            color,
            ball_radius: BALL_RADIUS,
            vx: 10.0,
            vy: 10.0,
        }
    }
}

/// Everything tunable about a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// World units to screen pixels
    pub scale: f32,
    /// Spacing of the background grid (cosmetic)
    pub grid_spacing: f32,

    // === Physics ===
    pub gravity: f32,
    pub mass: f32,
    pub drag: f32,
    pub max_velocity: f32,
    /// Wind x is drawn from [-wind_max, wind_max] each turn
    pub wind_max: f32,

    // === Timing ===
    pub frames_per_second: f32,
    /// Simulated seconds per real second
    pub speedup: f32,

    // === Rules ===
    pub total_rounds: u32,
    pub cannons: Vec<CannonConfig>,
    /// Pin the wind RNG (random when absent)
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            scale: SCALE,
            grid_spacing: GRID_SPACING,

            gravity: GRAVITY,
            mass: MASS,
            drag: DRAG,
            max_velocity: MAX_VELOCITY,
            wind_max: WIND_MAX,

            frames_per_second: FRAMES_PER_SECOND,
            speedup: SPEEDUP,

            total_rounds: TOTAL_ROUNDS,
            cannons: vec![CannonConfig::at(200.0, BLUE), CannonConfig::at(1800.0, YELLOW)],
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Physics timestep for one frame (seconds)
    #[inline]
    pub fn dt(&self) -> f32 {
        self.speedup / self.frames_per_second
    }

    /// Screen size in pixels
    pub fn screen_size(&self) -> (u32, u32) {
        (
            (self.field_width * self.scale) as u32,
            (self.field_height * self.scale) as u32,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cannons.len() < 2 {
            return Err(ConfigError::NotEnoughCannons(self.cannons.len()));
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("scale", self.scale),
            ("grid_spacing", self.grid_spacing),
            ("mass", self.mass),
            ("gravity", self.gravity),
            ("max_velocity", self.max_velocity),
            ("frames_per_second", self.frames_per_second),
            ("speedup", self.speedup),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [("drag", self.drag), ("wind_max", self.wind_max)];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (index, cannon) in self.cannons.iter().enumerate() {
            for (field, value) in [
                ("cannon width", cannon.width),
                ("cannon height", cannon.height),
                ("ball_radius", cannon.ball_radius),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::NotPositive { field, value });
                }
            }
            let inside = cannon.x > 0.0
                && cannon.x < self.field_width
                && cannon.y >= 0.0
                && cannon.y <= self.field_height;
            if !inside {
                return Err(ConfigError::CannonOutsideField {
                    index,
                    x: cannon.x,
                    y: cannon.y,
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded match config: {} cannons, {} rounds",
            config.cannons.len(),
            config.total_rounds
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
