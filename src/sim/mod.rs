//! Match engine
//!
//! All gameplay logic lives here. This module is headless:
//! - Fixed timestep only
//! - Randomness only through an injected [`WindSource`]
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;
pub mod wind;

pub use collision::{FlightResult, check_hit, classify, is_inside_field};
pub use physics::{Aim, PhysicsParams, aim_at, integrate};
pub use state::{Cannon, MatchOutcome, MatchPhase, MatchRules, MatchState, Projectile};
pub use tick::{MatchEvent, TickInput, apply_aim, end_turn, resolve_flight, step_flight, tick};
pub use wind::{FixedWind, RandomWind, ScriptedWind, WindSource};
