//! Cannon Duel - a two-player artillery game
//!
//! Core modules:
//! - `sim`: Headless match engine (aiming, flight physics, hits, turns)
//! - `settings`: Match configuration and validation
//! - `viewport`: World/screen coordinate transform
//! - `input`: Input sources (scripted, auto gunner)
//! - `render`: Renderer seam and a log-backed renderer
//! - `game`: Frame driver tying input, engine and renderer together

pub mod game;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use game::{FrameStatus, Game};
pub use settings::{CannonConfig, ConfigError, MatchConfig};
pub use viewport::Viewport;

use glam::Vec2;

/// Default match constants
pub mod consts {
    /// Frames rendered per second
    pub const FRAMES_PER_SECOND: f32 = 60.0;
    /// Simulation speed-up applied to each frame's timestep
    pub const SPEEDUP: f32 = 8.0;

    /// Field dimensions (world units)
    pub const FIELD_WIDTH: f32 = 2000.0;
    pub const FIELD_HEIGHT: f32 = 1000.0;
    /// Grid line spacing (world units)
    pub const GRID_SPACING: f32 = 100.0;
    /// World units to screen pixels
    pub const SCALE: f32 = 0.5;

    /// Gravitational acceleration (m/s²)
    pub const GRAVITY: f32 = 9.8;
    /// Projectile mass (kg)
    pub const MASS: f32 = 1.0;
    /// Linear drag coefficient
    pub const DRAG: f32 = 0.1;
    /// Maximum launch speed
    pub const MAX_VELOCITY: f32 = 230.0;
    /// Cursor distance that reaches full launch power
    pub const FULL_POWER_DISTANCE: f32 = 100.0;

    /// Wind x-component is drawn from [-WIND_MAX, WIND_MAX]
    pub const WIND_MAX: f32 = 15.0;

    pub const TOTAL_ROUNDS: u32 = 5;

    /// Cannon defaults
    pub const CANNON_WIDTH: f32 = 30.0;
    pub const CANNON_HEIGHT: f32 = 30.0;
    pub const BALL_RADIUS: f32 = 10.0;
}

/// An RGB color
pub type Color = [u8; 3];

pub mod colors {
    use super::Color;

    pub const BLUE: Color = [0, 0, 255];
    pub const YELLOW: Color = [255, 255, 0];
}

/// Angle of a screen-space vector given its world-space components
/// (screen y grows downward).
#[inline]
pub fn screen_angle(delta: Vec2) -> f32 {
    (-delta.y).atan2(delta.x)
}
