//! World/screen coordinate transform
//!
//! World space has y pointing up from the ground; screen space has y
//! pointing down from the top edge.

use glam::Vec2;

use crate::settings::MatchConfig;

/// Affine map between world units and screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pixels per world unit
    pub scale: f32,
    pub world_width: f32,
    pub world_height: f32,
}

impl Viewport {
    pub fn new(scale: f32, world_width: f32, world_height: f32) -> Self {
        Self {
            scale,
            world_width,
            world_height,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(config.scale, config.field_width, config.field_height)
    }

    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x * self.scale, (self.world_height - world.y) * self.scale)
    }

    #[inline]
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x / self.scale, self.world_height - screen.y / self.scale)
    }

    /// Screen size in pixels
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height) * self.scale
    }

    /// Background grid as world-space segments: vertical lines first, then
    /// horizontal, each starting at 0 and stepping by `spacing`.
    pub fn grid_lines(&self, spacing: f32) -> Vec<(Vec2, Vec2)> {
        if spacing <= 0.0 {
            return Vec::new();
        }
        let columns = (self.world_width / spacing) as u32;
        let rows = (self.world_height / spacing) as u32;

        let vertical = (0..columns).map(|i| {
            let x = i as f32 * spacing;
            (Vec2::new(x, 0.0), Vec2::new(x, self.world_height))
        });
        let horizontal = (0..rows).map(|i| {
            let y = i as f32 * spacing;
            (Vec2::new(0.0, y), Vec2::new(self.world_width, y))
        });
        vertical.chain(horizontal).collect()
    }
}
