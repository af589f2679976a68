//! Cannon Duel entry point
//!
//! Runs a headless match between two computer gunners. Pass a JSON config
//! path as the first argument to override the defaults; set `RUST_LOG=debug`
//! to watch the HUD and every turn change.

use anyhow::{Context, Result};

use cannon_duel::input::AutoGunner;
use cannon_duel::render::LogRenderer;
use cannon_duel::sim::RandomWind;
use cannon_duel::{FrameStatus, Game, MatchConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Cannon Duel (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => MatchConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => MatchConfig::default(),
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("Wind seed: {}", seed);

    let mut game = Game::new(config, RandomWind::new(seed)).context("starting match")?;
    let mut gunner = AutoGunner::new(seed.wrapping_add(1));
    let mut renderer = LogRenderer::new();

    match game.run(&mut gunner, &mut renderer) {
        FrameStatus::Finished(outcome) => println!("{}", outcome.announcement()),
        FrameStatus::Quit | FrameStatus::Running => println!("Match abandoned"),
    }

    Ok(())
}
