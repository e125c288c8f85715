//! Tilt Table - an old-school 2D pinball simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, table rules)
//! - `highscore`: Single-record high score persistence
//!
//! The crate contains no rendering or input polling. A frontend feeds
//! discrete commands into [`sim::TickInput`], advances the table with
//! [`sim::tick`], and drains [`sim::GameEvent`]s for presentation.

pub mod highscore;
pub mod sim;

pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game configuration constants
///
/// Coordinates are screen-style: x grows right, y grows down.
pub mod consts {
    const DEG: f32 = std::f32::consts::PI / 180.0;

    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 650.0;

    /// Downward gravity (px/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Proportional air drag, applied at a 60 Hz reference rate
    pub const AIR_FRICTION: f32 = 0.0005;
    /// Fraction of tangential speed lost on wall contact
    pub const TANGENTIAL_FRICTION: f32 = 0.02;
    /// Hard ceiling on ball speed (px/s)
    pub const MAX_BALL_SPEED: f32 = 2400.0;

    /// Restitution per collider family
    pub const RESTI_BALL_WALL: f32 = 0.85;
    pub const RESTI_BALL_BUMPER: f32 = 1.05;
    pub const RESTI_BALL_FLIPPER: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_MASS: f32 = 1.0;
    /// Trailing-position history capacity (cosmetic only)
    pub const TRAIL_POINTS: usize = 14;

    /// Flipper geometry and sweep
    pub const FLIPPER_LENGTH: f32 = 140.0;
    /// Angular rate of the flipper sweep (rad/s)
    pub const FLIPPER_SPEED: f32 = 900.0 * DEG;
    pub const FLIPPER_LEFT_MIN: f32 = 15.0 * DEG;
    pub const FLIPPER_LEFT_MAX: f32 = 70.0 * DEG;
    pub const FLIPPER_RIGHT_MIN: f32 = -70.0 * DEG;
    pub const FLIPPER_RIGHT_MAX: f32 = -15.0 * DEG;
    /// Fraction of the flipper's contact-point speed transferred to the ball
    pub const FLIPPER_BOOST: f32 = 0.9;
    /// Flat score per flipper contact
    pub const FLIPPER_SCORE: u64 = 1;

    /// Plunger launch power cap and charge rate (px/s, px/s per second held)
    pub const PLUNGER_MAX: f32 = 480.0;
    pub const PLUNGER_CHARGE_RATE: f32 = 900.0;
    /// Speed added to every launch on top of the accumulated charge
    pub const LAUNCH_BASE_SPEED: f32 = 400.0;
    /// Launch cone, measured from +x toward up-left (radians)
    pub const LAUNCH_ANGLE_MIN: f32 = 100.0 * DEG;
    pub const LAUNCH_ANGLE_MAX: f32 = 120.0 * DEG;

    /// Session rules
    pub const START_BALLS: u8 = 3;
    /// Seconds of ball save after each launch
    pub const BALL_SAVE_TIME: f32 = 8.0;

    /// Nudge and tilt
    pub const NUDGE_IMPULSE: f32 = 260.0;
    /// Nudges before the table tilts
    pub const TILT_MAX: f32 = 3.0;
    /// Tilt meter decay per second while not tilted
    pub const TILT_DECAY: f32 = 0.4;
    /// Seconds the tilt lockout disables the flippers
    pub const TILT_LOCKOUT: f32 = 4.0;

    /// Bumpers kick the ball outward beyond pure reflection (px/s)
    pub const BUMPER_KICK: f32 = 200.0;

    /// Completing the rollover set
    pub const ROLLOVER_BONUS: u64 = 1000;
    pub const BUMPER_MULT: u32 = 2;
    pub const BUMPER_MULT_TIME: f32 = 15.0;
}
