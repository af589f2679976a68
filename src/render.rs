//! Renderer seam
//!
//! The engine never draws. Each frame the driver hands the full match state
//! to a [`Renderer`], plus the cosmetic options the engine does not own.

use glam::Vec2;

use crate::sim::MatchState;
use crate::viewport::Viewport;

/// Screen-space origin of the wind arrow
pub const WIND_ARROW_ORIGIN: Vec2 = Vec2::new(50.0, 50.0);
/// Arrow pixels per unit of wind
pub const WIND_ARROW_SCALE: f32 = 2.0;

/// Cosmetic display state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudOptions {
    pub show_grid: bool,
    /// Background grid spacing (world units)
    pub grid_spacing: f32,
}

impl Default for HudOptions {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_spacing: crate::consts::GRID_SPACING,
        }
    }
}

pub trait Renderer {
    fn render(&mut self, state: &MatchState, viewport: &Viewport, hud: &HudOptions);
}

/// "Scores - Cannon 1: a | Cannon 2: b"
pub fn score_text(state: &MatchState) -> String {
    let parts: Vec<String> = state
        .scores
        .iter()
        .enumerate()
        .map(|(i, s)| format!("Cannon {}: {}", i + 1, s))
        .collect();
    format!("Scores - {}", parts.join(" | "))
}

/// "Round: r / total"
pub fn round_text(state: &MatchState) -> String {
    format!("Round: {} / {}", state.round, state.rules.total_rounds)
}

/// Barrel angle for each cannon: the active one tracks the aim, the rest rest at 0
pub fn barrel_angle(state: &MatchState, cannon: usize) -> f32 {
    if cannon == state.turn {
        state.aim_angle
    } else {
        0.0
    }
}

/// Start and end of the wind arrow in screen pixels
pub fn wind_arrow(wind: Vec2) -> (Vec2, Vec2) {
    let end = WIND_ARROW_ORIGIN + Vec2::new(wind.x * WIND_ARROW_SCALE, 0.0);
    (WIND_ARROW_ORIGIN, end)
}

/// Headless renderer that writes the HUD to the log
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
    last_hud: Option<(String, String)>,
    grid_lines: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// HUD lines from the most recent frame
    pub fn last_hud(&self) -> Option<&(String, String)> {
        self.last_hud.as_ref()
    }

    /// Grid lines drawn on the most recent frame
    pub fn grid_lines(&self) -> usize {
        self.grid_lines
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &MatchState, viewport: &Viewport, hud: &HudOptions) {
        self.frames += 1;

        self.grid_lines = if hud.show_grid {
            viewport.grid_lines(hud.grid_spacing).len()
        } else {
            0
        };

        let ball = viewport.to_screen(state.projectile.pos);
        log::trace!(
            "frame {}: ball at ({:.0}, {:.0}) px, barrel {:.2} rad, {} grid lines",
            self.frames,
            ball.x,
            ball.y,
            barrel_angle(state, state.turn),
            self.grid_lines
        );

        let lines = (score_text(state), round_text(state));
        if self.last_hud.as_ref() != Some(&lines) {
            let (_, arrow_end) = wind_arrow(state.wind);
            log::debug!(
                "{} | {} | wind arrow to x={:.0}",
                lines.0,
                lines.1,
                arrow_end.x
            );
            self.last_hud = Some(lines);
        }
    }
}
