//! Tilt Table demo driver
//!
//! Runs a headless scripted session: charges the plunger, launches, works
//! the flippers on a fixed cadence, and plays until game over, persisting
//! the high score on the way out. A real frontend would translate device
//! input into [`TickInput`] commands and render from the public state
//! between ticks; this binary stands in for one.

use tilt_table::consts::*;
use tilt_table::highscore;
use tilt_table::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Frame rate the driver pretends to run at; the simulation itself steps
/// at SIM_DT inside the accumulator.
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this much simulated time if the session refuses to end.
const MAX_SIM_SECONDS: f32 = 600.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xB17B_A11);

    let mut state = GameState::new(seed);
    state.high_score = highscore::load();
    let session_best = state.high_score;
    log::info!("session start, seed {seed}, high score to beat {session_best}");

    let mut input = TickInput::default();
    let mut accumulator = 0.0f32;
    let mut effects = 0u64;
    let mut saves = 0u32;
    let mut last_phase = state.phase;

    let max_frames = (MAX_SIM_SECONDS / FRAME_DT) as u64;
    for frame in 0..max_frames {
        script_input(&mut input, &state, frame);

        accumulator += FRAME_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs fire on a single processed tick
            input.nudge = false;
            input.toggle_pause = false;
            input.restart = false;
            input.left_flipper = None;
            input.right_flipper = None;
        }

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreDelta { amount } => {
                    log::debug!("+{amount} -> {}", state.score);
                }
                GameEvent::Effect { pos, color, .. } => {
                    effects += 1;
                    log::trace!("effect {color:?} at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::BallSaved => {
                    saves += 1;
                    log::info!("ball saved");
                }
                GameEvent::BallLost { balls_remaining } => {
                    log::info!("ball lost, {balls_remaining} remaining");
                }
                GameEvent::GameOver { final_score } => {
                    log::info!("game over at {final_score}");
                }
                GameEvent::TiltActivated => log::info!("TILT"),
                GameEvent::TiltCleared => log::info!("tilt cleared"),
            }
        }

        // Persist on the transition into game over (the state already
        // folded the session score into its high score)
        if state.phase == GamePhase::GameOver && last_phase != GamePhase::GameOver {
            highscore::save(state.high_score);
        }
        last_phase = state.phase;

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!("final score   {}", state.score);
    println!("high score    {}", state.high_score);
    println!("ball saves    {saves}");
    println!("hit effects   {effects}");
    if state.phase != GamePhase::GameOver {
        println!("(stopped after {MAX_SIM_SECONDS} simulated seconds)");
    }
}

/// A crude player: charge-and-release from the launch lane, then bat both
/// flippers on a cadence with the occasional nudge.
fn script_input(input: &mut TickInput, state: &GameState, frame: u64) {
    match state.phase {
        GamePhase::Idle => {
            // Hold for ~0.5 s of charge, then let go
            input.plunger_held = state.plunger_charge < PLUNGER_MAX * 0.9;
        }
        GamePhase::InPlay => {
            input.plunger_held = false;
            // Flip for 10 frames out of every 45
            let engaged = frame % 45 < 10;
            input.left_flipper = Some(engaged);
            input.right_flipper = Some(engaged);
            if frame % 600 == 599 {
                input.nudge = true;
            }
        }
        GamePhase::GameOver => {}
    }
}
