//! Aiming and projectile flight integration
//!
//! Flight is a single point mass under constant gravity plus linear drag
//! relative to the wind, advanced with explicit (forward) Euler steps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FULL_POWER_DISTANCE;
use crate::screen_angle;

/// Physical constants for projectile flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub mass: f32,
    /// Linear drag coefficient
    pub drag: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        use crate::consts::{DRAG, GRAVITY, MASS};
        Self {
            gravity: GRAVITY,
            mass: MASS,
            drag: DRAG,
        }
    }
}

impl PhysicsParams {
    /// Net force on a projectile moving at `vel` through `wind`
    #[inline]
    pub fn force(&self, vel: Vec2, wind: Vec2) -> Vec2 {
        let gravity = Vec2::new(0.0, -self.mass * self.gravity);
        let drag = -self.drag * (vel - wind);
        gravity + drag
    }

    #[inline]
    pub fn acceleration(&self, vel: Vec2, wind: Vec2) -> Vec2 {
        self.force(vel, wind) / self.mass
    }
}

/// Advance one Euler step: velocity first, then position with the new velocity.
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, wind: Vec2, params: &PhysicsParams, dt: f32) {
    let accel = params.acceleration(*vel, wind);
    *vel += accel * dt;
    *pos += *vel * dt;
}

/// Result of pointing the cursor somewhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    /// Screen-space barrel angle
    pub angle: f32,
    /// Launch velocity, `None` when the cursor sits exactly on the anchor
    pub velocity: Option<Vec2>,
}

/// Aim from `anchor` toward `cursor` (both in world units).
///
/// Power ramps linearly up to `max_velocity` at [`FULL_POWER_DISTANCE`].
pub fn aim_at(anchor: Vec2, cursor: Vec2, max_velocity: f32) -> Aim {
    let delta = cursor - anchor;
    let angle = screen_angle(delta);
    let distance = delta.length();

    let velocity = (distance > 0.0).then(|| {
        let power = (distance / FULL_POWER_DISTANCE).min(1.0);
        delta / distance * max_velocity * power
    });

    Aim { angle, velocity }
}
