//! Hit and boundary tests for the projectile
//!
//! The hit radius is the target cannon's width, measured from its anchor
//! point, so the drawn cannon size doubles as the hit threshold.

use glam::Vec2;

use super::state::Cannon;

/// Why a flight stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightResult {
    /// Still airborne and inside the field
    InFlight,
    /// Struck the target cannon
    Hit,
    /// Left the field
    OutOfBounds,
}

/// True when `pos` is within `target.width` of the target's anchor (inclusive)
#[inline]
pub fn check_hit(pos: Vec2, target: &Cannon) -> bool {
    pos.distance(target.pos) <= target.width
}

/// Strictly inside the side walls and above the ground
#[inline]
pub fn is_inside_field(pos: Vec2, field_width: f32) -> bool {
    pos.x > 0.0 && pos.x < field_width && pos.y > 0.0
}

/// Classify a projectile position. A hit takes priority over leaving the field.
pub fn classify(pos: Vec2, target: &Cannon, field_width: f32) -> FlightResult {
    if check_hit(pos, target) {
        FlightResult::Hit
    } else if !is_inside_field(pos, field_width) {
        FlightResult::OutOfBounds
    } else {
        FlightResult::InFlight
    }
}
