//! Per-turn wind sources
//!
//! Wind only blows along x. The engine asks its [`WindSource`] for a fresh
//! value once per turn and never touches it again until the next turn.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies the wind x-component for each new turn
pub trait WindSource {
    /// Next wind value within `[-max, max]`
    fn next_wind(&mut self, max: f32) -> f32;
}

/// Uniform random wind backed by a PCG32 stream
#[derive(Debug, Clone)]
pub struct RandomWind {
    rng: Pcg32,
}

impl RandomWind {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl WindSource for RandomWind {
    fn next_wind(&mut self, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-max..=max)
    }
}

/// Always the same wind, clamped to the allowed range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWind(pub f32);

impl WindSource for FixedWind {
    fn next_wind(&mut self, max: f32) -> f32 {
        self.0.clamp(-max, max)
    }
}

/// Plays back a fixed list of wind values, then calm air
#[derive(Debug, Clone, Default)]
pub struct ScriptedWind {
    values: VecDeque<f32>,
}

impl ScriptedWind {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl WindSource for ScriptedWind {
    fn next_wind(&mut self, _max: f32) -> f32 {
        self.values.pop_front().unwrap_or(0.0)
    }
}
