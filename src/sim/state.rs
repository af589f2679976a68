//! Match state and core simulation types
//!
//! Everything the engine reads or writes between ticks lives in [`MatchState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::PhysicsParams;
use super::wind::WindSource;
use crate::Color;
use crate::settings::{CannonConfig, ConfigError, MatchConfig};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active cannon follows the cursor, waiting for the fire trigger
    Aiming,
    /// Projectile in flight
    Firing,
    /// All rounds played (terminal)
    MatchOver { outcome: MatchOutcome },
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Index of the cannon with the single highest score
    Winner(usize),
    Tie,
}

impl MatchOutcome {
    /// Highest score wins; a shared highest score is a tie.
    pub fn from_scores(scores: &[u32]) -> Self {
        let Some(&best) = scores.iter().max() else {
            return MatchOutcome::Tie;
        };
        let mut leaders = scores.iter().enumerate().filter(|(_, s)| **s == best);
        match (leaders.next(), leaders.next()) {
            (Some((idx, _)), None) => MatchOutcome::Winner(idx),
            _ => MatchOutcome::Tie,
        }
    }

    /// Human-readable result line
    pub fn announcement(&self) -> String {
        match self {
            MatchOutcome::Winner(idx) => format!("Cannon {} wins!", idx + 1),
            MatchOutcome::Tie => "It's a tie!".to_string(),
        }
    }
}

/// A player's cannon. Never moves during a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    /// Anchor point (aiming origin and hit-test center)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Radius of the balls this cannon fires
    pub ball_radius: f32,
    /// Velocity a fresh projectile starts with before any aiming
    pub default_velocity: Vec2,
}

impl Cannon {
    pub fn from_config(cfg: &CannonConfig) -> Self {
        Self {
            pos: Vec2::new(cfg.x, cfg.y),
            width: cfg.width,
            height: cfg.height,
            color: cfg.color,
            ball_radius: cfg.ball_radius,
            default_velocity: Vec2::new(cfg.vx, cfg.vy),
        }
    }

    /// Center of the cannon body, where projectiles are spawned
    #[inline]
    pub fn launch_point(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.width / 2.0,
            self.pos.y - self.height / 2.0,
        )
    }
}

/// The active shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Projectile {
    /// Fresh projectile sitting in the given cannon
    pub fn loaded_in(cannon: &Cannon) -> Self {
        Self {
            pos: cannon.launch_point(),
            vel: cannon.default_velocity,
            radius: cannon.ball_radius,
            color: cannon.color,
        }
    }
}

/// Fixed rules for one match, derived from [`MatchConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRules {
    pub field_width: f32,
    pub field_height: f32,
    pub total_rounds: u32,
    pub max_velocity: f32,
    pub wind_max: f32,
    pub physics: PhysicsParams,
}

impl MatchRules {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            field_width: config.field_width,
            field_height: config.field_height,
            total_rounds: config.total_rounds,
            max_velocity: config.max_velocity,
            wind_max: config.wind_max,
            physics: PhysicsParams {
                gravity: config.gravity,
                mass: config.mass,
                drag: config.drag,
            },
        }
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub rules: MatchRules,
    /// All cannons in turn order
    pub cannons: Vec<Cannon>,
    /// One score per cannon
    pub scores: Vec<u32>,
    /// Index of the active cannon
    pub turn: usize,
    /// 1-based round counter
    pub round: u32,
    pub phase: MatchPhase,
    /// Screen-space barrel angle of the active cannon
    pub aim_angle: f32,
    /// Wind for the current turn (y is always zero)
    pub wind: Vec2,
    pub projectile: Projectile,
}

impl MatchState {
    /// Start a match: player 0 aiming in round 1, wind rolled once.
    ///
    /// Rejects configs that fail [`MatchConfig::validate`].
    pub fn new(config: &MatchConfig, wind: &mut dyn WindSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = MatchRules::from_config(config);
        let cannons: Vec<Cannon> = config.cannons.iter().map(Cannon::from_config).collect();
        let projectile = Projectile::loaded_in(&cannons[0]);
        let wind = Vec2::new(wind.next_wind(rules.wind_max), 0.0);

        Ok(Self {
            rules,
            scores: vec![0; cannons.len()],
            cannons,
            turn: 0,
            round: 1,
            phase: MatchPhase::Aiming,
            aim_angle: 0.0,
            wind,
            projectile,
        })
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.cannons.len()
    }

    pub fn active_cannon(&self) -> &Cannon {
        &self.cannons[self.turn]
    }

    /// The cannon the active player is shooting at (next in turn order)
    pub fn target_index(&self) -> usize {
        (self.turn + 1) % self.player_count()
    }

    pub fn target_cannon(&self) -> &Cannon {
        &self.cannons[self.target_index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::MatchOver { .. })
    }

    /// Reload the projectile into the active cannon
    pub fn reload(&mut self) {
        self.projectile = Projectile::loaded_in(&self.cannons[self.turn]);
    }
}
