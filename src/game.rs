//! Frame driver
//!
//! Ties an input source, the match engine and a renderer together. One call
//! to [`Game::frame`] is one frame: poll input, tick once, render.

use crate::input::InputSource;
use crate::render::{HudOptions, Renderer};
use crate::settings::{ConfigError, MatchConfig};
use crate::sim::{MatchEvent, MatchOutcome, MatchPhase, MatchState, TickInput, WindSource, tick};
use crate::viewport::Viewport;

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    /// The player asked to quit
    Quit,
    /// All rounds played
    Finished(MatchOutcome),
}

/// A match plus everything needed to drive it frame by frame
pub struct Game<W: WindSource> {
    pub state: MatchState,
    pub hud: HudOptions,
    viewport: Viewport,
    wind: W,
    dt: f32,
    frame_count: u64,
}

impl<W: WindSource> Game<W> {
    /// Validate the config and set up a fresh match
    pub fn new(config: MatchConfig, mut wind: W) -> Result<Self, ConfigError> {
        let state = MatchState::new(&config, &mut wind)?;
        let viewport = Viewport::from_config(&config);
        let dt = config.dt();

        log::info!(
            "New match: {} cannons, {} rounds, dt {:.4}s, opening wind {:.2}",
            state.player_count(),
            config.total_rounds,
            dt,
            state.wind.x
        );

        Ok(Self {
            state,
            hud: HudOptions {
                show_grid: true,
                grid_spacing: config.grid_spacing,
            },
            viewport,
            wind,
            dt,
            frame_count: 0,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run a single frame
    pub fn frame(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> (FrameStatus, Vec<MatchEvent>) {
        let frame = input.poll(&self.state, &self.viewport);
        if frame.quit {
            log::info!("Quit requested after {} frames", self.frame_count);
            return (FrameStatus::Quit, Vec::new());
        }
        if frame.toggle_grid {
            self.hud.show_grid = !self.hud.show_grid;
        }

        let tick_input = TickInput {
            aim_target: frame.cursor.map(|c| self.viewport.to_world(c)),
            fire: frame.fire,
        };
        let events = tick(&mut self.state, &tick_input, self.dt, &mut self.wind);
        self.frame_count += 1;

        renderer.render(&self.state, &self.viewport, &self.hud);

        let status = match self.state.phase {
            MatchPhase::MatchOver { outcome } => FrameStatus::Finished(outcome),
            _ => FrameStatus::Running,
        };
        (status, events)
    }

    /// Run frames until the match ends or the player quits
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> FrameStatus {
        loop {
            let (status, _) = self.frame(input, renderer);
            if status != FrameStatus::Running {
                if let FrameStatus::Finished(_) = status {
                    log::info!(
                        "Final scores after {} frames: {:?}",
                        self.frame_count,
                        self.state.scores
                    );
                }
                return status;
            }
        }
    }
}
