//! Fixed timestep match tick
//!
//! One call advances the match by exactly one frame: either the active
//! cannon re-aims, or the projectile takes one physics step and is checked
//! against the target and the field bounds.

use glam::Vec2;

use super::collision::{FlightResult, classify};
use super::physics::{aim_at, integrate};
use super::state::{MatchOutcome, MatchPhase, MatchState};
use super::wind::WindSource;

/// Input commands for a single tick, already in world coordinates
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position to aim at
    pub aim_target: Option<Vec2>,
    /// Fire the loaded projectile
    pub fire: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// The active cannon fired with this launch velocity
    Fired { shooter: usize, velocity: Vec2 },
    /// The shot struck the target cannon
    Hit {
        shooter: usize,
        target: usize,
        score: u32,
    },
    /// The shot left the field
    OutOfBounds { shooter: usize, pos: Vec2 },
    /// A new turn began aiming
    TurnStarted { turn: usize, round: u32, wind: f32 },
    /// Final round finished
    MatchOver {
        outcome: MatchOutcome,
        scores: Vec<u32>,
    },
}

/// Advance the match by one fixed timestep
pub fn tick(
    state: &mut MatchState,
    input: &TickInput,
    dt: f32,
    wind: &mut dyn WindSource,
) -> Vec<MatchEvent> {
    let mut events = Vec::new();

    match state.phase {
        MatchPhase::MatchOver { .. } => return events,
        MatchPhase::Aiming => {
            if input.fire {
                // Aim is locked as of the previous tick
                state.phase = MatchPhase::Firing;
                events.push(MatchEvent::Fired {
                    shooter: state.turn,
                    velocity: state.projectile.vel,
                });
            } else if let Some(target) = input.aim_target {
                apply_aim(state, target);
            }
        }
        MatchPhase::Firing => {}
    }

    if state.phase == MatchPhase::Firing {
        step_flight(state, dt);
        resolve_flight(state, wind, &mut events);
    }

    events
}

/// Point the active cannon at `target`.
///
/// A cursor exactly on the anchor only updates the barrel angle.
pub fn apply_aim(state: &mut MatchState, target: Vec2) {
    let aim = aim_at(state.active_cannon().pos, target, state.rules.max_velocity);
    state.aim_angle = aim.angle;
    if let Some(velocity) = aim.velocity {
        state.projectile.vel = velocity;
    }
}

/// One Euler step of the projectile under the current turn's wind
pub fn step_flight(state: &mut MatchState, dt: f32) {
    let projectile = &mut state.projectile;
    integrate(
        &mut projectile.pos,
        &mut projectile.vel,
        state.wind,
        &state.rules.physics,
        dt,
    );
}

/// Check the projectile's current position and end the turn on a hit or
/// when it has left the field.
pub fn resolve_flight(
    state: &mut MatchState,
    wind: &mut dyn WindSource,
    events: &mut Vec<MatchEvent>,
) -> FlightResult {
    let shooter = state.turn;
    let target = state.target_index();
    let result = classify(
        state.projectile.pos,
        &state.cannons[target],
        state.rules.field_width,
    );

    match result {
        FlightResult::InFlight => return result,
        FlightResult::Hit => {
            state.scores[shooter] += 1;
            let score = state.scores[shooter];
            log::info!(
                "Player {} hit the other cannon! Score: {}",
                shooter + 1,
                score
            );
            events.push(MatchEvent::Hit {
                shooter,
                target,
                score,
            });
        }
        FlightResult::OutOfBounds => {
            let pos = state.projectile.pos;
            log::debug!(
                "Player {} missed, shot left the field at ({:.1}, {:.1})",
                shooter + 1,
                pos.x,
                pos.y
            );
            events.push(MatchEvent::OutOfBounds { shooter, pos });
        }
    }

    events.push(end_turn(state, wind));
    result
}

/// Hand the turn to the next cannon.
///
/// Wrapping back to player 0 starts a new round; running past the last
/// round ends the match. Otherwise the wind is re-rolled and the projectile
/// reloaded for the new shooter.
pub fn end_turn(state: &mut MatchState, wind: &mut dyn WindSource) -> MatchEvent {
    if let MatchPhase::MatchOver { outcome } = state.phase {
        return MatchEvent::MatchOver {
            outcome,
            scores: state.scores.clone(),
        };
    }

    state.turn = (state.turn + 1) % state.player_count();
    if state.turn == 0 {
        state.round += 1;
        if state.round > state.rules.total_rounds {
            let outcome = MatchOutcome::from_scores(&state.scores);
            state.phase = MatchPhase::MatchOver { outcome };
            log::info!(
                "Game over! {} rounds completed.",
                state.rules.total_rounds
            );
            log::info!("{}", outcome.announcement());
            return MatchEvent::MatchOver {
                outcome,
                scores: state.scores.clone(),
            };
        }
    }

    state.wind = Vec2::new(wind.next_wind(state.rules.wind_max), 0.0);
    state.reload();
    state.aim_angle = 0.0;
    state.phase = MatchPhase::Aiming;
    log::debug!(
        "Round {}: player {} to aim, wind {:.2}",
        state.round,
        state.turn + 1,
        state.wind.x
    );

    MatchEvent::TurnStarted {
        turn: state.turn,
        round: state.round,
        wind: state.wind.x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchConfig;
    use crate::sim::wind::{FixedWind, ScriptedWind};
    use proptest::prelude::*;

    fn new_match(total_rounds: u32, wind: &mut dyn WindSource) -> (MatchConfig, MatchState) {
        let config = MatchConfig {
            total_rounds,
            ..MatchConfig::default()
        };
        let state = MatchState::new(&config, wind).unwrap();
        (config, state)
    }

    /// Drop the projectile straight onto the target's anchor and resolve it
    fn force_hit(state: &mut MatchState, wind: &mut dyn WindSource) -> Vec<MatchEvent> {
        state.phase = MatchPhase::Firing;
        state.projectile.pos = state.target_cannon().pos;
        let mut events = Vec::new();
        resolve_flight(state, wind, &mut events);
        events
    }

    #[test]
    fn test_aiming_follows_cursor() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(5, &mut wind);
        let input = TickInput {
            aim_target: Some(Vec2::new(300.0, 130.0)),
            fire: false,
        };
        let events = tick(&mut state, &input, config.dt(), &mut wind);

        assert!(events.is_empty());
        assert_eq!(state.phase, MatchPhase::Aiming);
        let expected = 230.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((state.projectile.vel.x - expected).abs() < 1e-3);
        assert!((state.projectile.vel.y - expected).abs() < 1e-3);
        // Aiming never moves the ball
        assert_eq!(state.projectile.pos, Vec2::new(215.0, 15.0));
    }

    #[test]
    fn test_zero_distance_aim_keeps_velocity() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(5, &mut wind);
        let before = state.projectile.vel;
        let anchor = state.active_cannon().pos;
        let input = TickInput {
            aim_target: Some(anchor),
            fire: false,
        };
        tick(&mut state, &input, config.dt(), &mut wind);
        assert_eq!(state.projectile.vel, before);
    }

    #[test]
    fn test_fire_locks_previous_aim_and_steps() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(5, &mut wind);
        let aim = TickInput {
            aim_target: Some(Vec2::new(400.0, 230.0)),
            fire: false,
        };
        tick(&mut state, &aim, config.dt(), &mut wind);
        let locked = state.projectile.vel;

        let fire = TickInput {
            aim_target: Some(Vec2::new(100.0, 500.0)),
            fire: true,
        };
        let events = tick(&mut state, &fire, config.dt(), &mut wind);

        assert_eq!(
            events,
            vec![MatchEvent::Fired {
                shooter: 0,
                velocity: locked
            }]
        );
        assert_eq!(state.phase, MatchPhase::Firing);
        assert_ne!(state.projectile.pos, Vec2::new(215.0, 15.0));
    }

    #[test]
    fn test_aim_ignored_while_firing() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(5, &mut wind);
        state.phase = MatchPhase::Firing;
        state.projectile.pos = Vec2::new(1000.0, 500.0);
        state.projectile.vel = Vec2::new(0.0, 50.0);

        let mut expected = state.clone();
        step_flight(&mut expected, config.dt());

        let input = TickInput {
            aim_target: Some(Vec2::new(0.0, 0.0)),
            fire: true,
        };
        let events = tick(&mut state, &input, config.dt(), &mut wind);
        assert!(events.is_empty());
        assert_eq!(state.projectile, expected.projectile);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                aim_target: Some(Vec2::new(260.0, 120.0)),
                fire: false,
            },
            TickInput {
                aim_target: Some(Vec2::new(290.0, 110.0)),
                fire: false,
            },
            TickInput {
                aim_target: None,
                fire: true,
            },
        ];

        let run = || {
            let mut wind = FixedWind(-7.5);
            let (config, mut state) = new_match(5, &mut wind);
            let mut trajectory = Vec::new();
            for input in &inputs {
                tick(&mut state, input, config.dt(), &mut wind);
            }
            for _ in 0..60 {
                tick(&mut state, &TickInput::default(), config.dt(), &mut wind);
                let pos = state.projectile.pos;
                trajectory.push((pos.x.to_bits(), pos.y.to_bits()));
            }
            trajectory
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_scenario_short_shot_lands_out_of_bounds() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(5, &mut wind);
        assert!((config.dt() - 8.0 / 60.0).abs() < 1e-7);

        state.phase = MatchPhase::Firing;
        state.projectile.vel = Vec2::new(50.0, 80.0);

        let mut events = Vec::new();
        for _ in 0..10_000 {
            events = tick(&mut state, &TickInput::default(), config.dt(), &mut wind);
            if !events.is_empty() {
                break;
            }
        }

        match &events[0] {
            MatchEvent::OutOfBounds { shooter, pos } => {
                assert_eq!(*shooter, 0);
                assert!(pos.y <= 0.0);
                assert!((pos.x - state.cannons[1].pos.x).abs() > state.cannons[1].width);
            }
            other => panic!("expected out of bounds, got {other:?}"),
        }
        assert_eq!(state.scores, vec![0, 0]);
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, MatchPhase::Aiming);
    }

    #[test]
    fn test_direct_hit_scores_and_passes_turn() {
        let mut wind = ScriptedWind::new([3.0, -6.0]);
        let (_config, mut state) = new_match(5, &mut wind);
        assert_eq!(state.wind.x, 3.0);

        let events = force_hit(&mut state, &mut wind);

        assert_eq!(
            events,
            vec![
                MatchEvent::Hit {
                    shooter: 0,
                    target: 1,
                    score: 1
                },
                MatchEvent::TurnStarted {
                    turn: 1,
                    round: 1,
                    wind: -6.0
                },
            ]
        );
        assert_eq!(state.scores, vec![1, 0]);
        assert_eq!(state.phase, MatchPhase::Aiming);
        assert_eq!(state.wind, Vec2::new(-6.0, 0.0));
        // Reloaded into cannon 2 (anchor 1800, 30)
        assert_eq!(state.projectile.pos, Vec2::new(1815.0, 15.0));
        assert_eq!(state.projectile.color, state.cannons[1].color);
    }

    #[test]
    fn test_slow_drop_onto_target_is_a_hit_via_tick() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(5, &mut wind);
        state.phase = MatchPhase::Firing;
        state.projectile.pos = state.target_cannon().pos + Vec2::new(0.0, 5.0);
        state.projectile.vel = Vec2::ZERO;

        let events = tick(&mut state, &TickInput::default(), config.dt(), &mut wind);
        assert!(matches!(events[0], MatchEvent::Hit { shooter: 0, .. }));
        assert_eq!(state.scores, vec![1, 0]);
    }

    #[test]
    fn test_wind_constant_during_flight_then_rerolled() {
        let mut wind = ScriptedWind::new([4.0, -11.0, 2.0]);
        let (config, mut state) = new_match(5, &mut wind);
        state.phase = MatchPhase::Firing;
        state.projectile.pos = Vec2::new(1900.0, 500.0);
        state.projectile.vel = Vec2::new(200.0, 0.0);

        let mut ticks = 0;
        loop {
            assert_eq!(state.wind, Vec2::new(4.0, 0.0));
            let events = tick(&mut state, &TickInput::default(), config.dt(), &mut wind);
            ticks += 1;
            if !events.is_empty() {
                break;
            }
            assert!(ticks < 100);
        }
        assert!(ticks > 1);
        assert_eq!(state.wind, Vec2::new(-11.0, 0.0));
        assert_eq!(wind.remaining(), 1);
    }

    #[test]
    fn test_match_over_after_last_round() {
        let mut wind = FixedWind(0.0);
        let (config, mut state) = new_match(2, &mut wind);

        for _ in 0..3 {
            let event = end_turn(&mut state, &mut wind);
            assert!(matches!(event, MatchEvent::TurnStarted { .. }));
        }
        let event = end_turn(&mut state, &mut wind);
        assert_eq!(
            event,
            MatchEvent::MatchOver {
                outcome: MatchOutcome::Tie,
                scores: vec![0, 0]
            }
        );
        assert!(state.is_over());

        // Terminal: input is ignored
        let snapshot = state.clone();
        let input = TickInput {
            aim_target: Some(Vec2::new(500.0, 500.0)),
            fire: true,
        };
        assert!(tick(&mut state, &input, config.dt(), &mut wind).is_empty());
        assert_eq!(state.phase, snapshot.phase);
        assert_eq!(state.projectile, snapshot.projectile);
    }

    #[test]
    fn test_winner_reported() {
        let mut wind = FixedWind(0.0);
        let (_config, mut state) = new_match(1, &mut wind);

        force_hit(&mut state, &mut wind);
        let events = {
            state.phase = MatchPhase::Firing;
            state.projectile.pos = Vec2::new(-5.0, 100.0);
            let mut events = Vec::new();
            resolve_flight(&mut state, &mut wind, &mut events);
            events
        };

        assert_eq!(
            events.last(),
            Some(&MatchEvent::MatchOver {
                outcome: MatchOutcome::Winner(0),
                scores: vec![1, 0]
            })
        );
    }

    #[test]
    fn test_tie_when_scores_equal() {
        let mut wind = FixedWind(0.0);
        let (_config, mut state) = new_match(1, &mut wind);

        force_hit(&mut state, &mut wind);
        let events = force_hit(&mut state, &mut wind);

        assert_eq!(state.scores, vec![1, 1]);
        assert_eq!(
            state.phase,
            MatchPhase::MatchOver {
                outcome: MatchOutcome::Tie
            }
        );
        assert!(matches!(
            events.last(),
            Some(MatchEvent::MatchOver {
                outcome: MatchOutcome::Tie,
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn turns_alternate_and_rounds_count(n in 0usize..100) {
            let mut wind = FixedWind(0.0);
            let (_config, mut state) = new_match(60, &mut wind);
            for _ in 0..n {
                end_turn(&mut state, &mut wind);
            }
            prop_assert_eq!(state.turn, n % 2);
            prop_assert_eq!(state.round as usize, 1 + n / 2);
            prop_assert!(!state.is_over());
        }

        #[test]
        fn match_ends_exactly_after_last_turn(rounds in 1u32..20) {
            let mut wind = FixedWind(0.0);
            let (_config, mut state) = new_match(rounds, &mut wind);
            for _ in 0..(2 * rounds - 1) {
                end_turn(&mut state, &mut wind);
                prop_assert!(!state.is_over());
            }
            end_turn(&mut state, &mut wind);
            prop_assert!(state.is_over());
        }

        #[test]
        fn flight_is_deterministic(
            vx in -230.0f32..230.0,
            vy in 0.0f32..230.0,
            w in -15.0f32..15.0,
        ) {
            let mut wind = FixedWind(w);
            let (config, start) = new_match(5, &mut wind);
            let mut a = start.clone();
            let mut b = start;
            a.projectile.vel = Vec2::new(vx, vy);
            b.projectile.vel = Vec2::new(vx, vy);
            for _ in 0..200 {
                step_flight(&mut a, config.dt());
                step_flight(&mut b, config.dt());
                prop_assert_eq!(a.projectile.pos.x.to_bits(), b.projectile.pos.x.to_bits());
                prop_assert_eq!(a.projectile.pos.y.to_bits(), b.projectile.pos.y.to_bits());
            }
        }
    }
}
