//! Input sources
//!
//! An [`InputSource`] is polled once per frame and reports what the player
//! did in screen space. The [`Game`](crate::Game) driver converts the cursor
//! to world coordinates before the engine sees it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{MatchPhase, MatchState};
use crate::viewport::Viewport;

/// One frame of player input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Cursor position in screen pixels
    pub cursor: Option<Vec2>,
    /// Fire trigger (space)
    pub fire: bool,
    /// Quit request (window close or `q`)
    pub quit: bool,
    /// Toggle the background grid (`g`)
    pub toggle_grid: bool,
}

pub trait InputSource {
    fn poll(&mut self, state: &MatchState, viewport: &Viewport) -> InputFrame;
}

/// Replays a fixed list of frames, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &MatchState, _viewport: &Viewport) -> InputFrame {
        self.frames.pop_front().unwrap_or(InputFrame {
            quit: true,
            ..Default::default()
        })
    }
}

/// Computer player for every cannon.
///
/// At the start of each turn it picks a random elevation and power toward
/// the opponent, sweeps the cursor there for a few frames, then fires.
#[derive(Debug, Clone)]
pub struct AutoGunner {
    rng: Pcg32,
    /// Frames spent aiming before pulling the trigger
    pub aim_frames: u32,
    plan: Option<Plan>,
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    turn: usize,
    round: u32,
    /// Cursor offset from the active anchor (world units)
    offset: Vec2,
    frames_aimed: u32,
}

impl AutoGunner {
    pub const DEFAULT_AIM_FRAMES: u32 = 20;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            aim_frames: Self::DEFAULT_AIM_FRAMES,
            plan: None,
        }
    }

    fn plan_shot(&mut self, state: &MatchState) -> Plan {
        let anchor = state.active_cannon().pos;
        let toward = (state.target_cannon().pos.x - anchor.x).signum();

        let elevation = self.rng.random_range(25.0f32..65.0).to_radians();
        let power = self.rng.random_range(0.55f32..=1.0);
        let reach = power * crate::consts::FULL_POWER_DISTANCE;
        let offset = Vec2::new(toward * elevation.cos(), elevation.sin()) * reach;

        log::debug!(
            "Auto gunner {} aiming at {:.0}° with {:.0}% power",
            state.turn + 1,
            elevation.to_degrees(),
            power * 100.0
        );

        Plan {
            turn: state.turn,
            round: state.round,
            offset,
            frames_aimed: 0,
        }
    }
}

impl InputSource for AutoGunner {
    fn poll(&mut self, state: &MatchState, viewport: &Viewport) -> InputFrame {
        if state.phase != MatchPhase::Aiming {
            return InputFrame::default();
        }

        let stale = self
            .plan
            .is_none_or(|p| p.turn != state.turn || p.round != state.round);
        if stale {
            self.plan = Some(self.plan_shot(state));
        }
        let Some(plan) = self.plan.as_mut() else {
            return InputFrame::default();
        };

        if plan.frames_aimed >= self.aim_frames {
            return InputFrame {
                fire: true,
                ..Default::default()
            };
        }

        // Sweep out from the anchor so the barrel visibly swings into place
        plan.frames_aimed += 1;
        let t = plan.frames_aimed as f32 / self.aim_frames.max(1) as f32;
        let world = state.active_cannon().pos + plan.offset * t;

        InputFrame {
            cursor: Some(viewport.to_screen(world)),
            ..Default::default()
        }
    }
}
