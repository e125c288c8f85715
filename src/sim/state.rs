//! Game state and core simulation types
//!
//! Everything the session owns lives here: the ball, both flippers, the
//! rollover set, score and lives, and the tilt / ball-save / multiplier
//! timers. State transitions (launch, drain, tilt, restart) are methods on
//! [`GameState`] so the tick loop stays a thin driver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::table::{ColorTag, Rollover, Table};
use crate::consts::*;

/// Current phase of the session
///
/// `paused`, `tilt_active`, and `ball_save_active` are orthogonal flags on
/// [`GameState`]. A drain resolves within the tick that detects it, so
/// there is no observable in-between phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting in the launch lane, plunger armed
    Idle,
    /// Ball live on the playfield
    InPlay,
    /// Out of balls; only restart is accepted
    GameOver,
}

/// An event record produced during a tick, drained by the consumer after
/// the tick. The core never calls back into presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score increased by `amount` (score itself never decreases mid-run)
    ScoreDelta { amount: u64 },
    /// Cosmetic hit feedback: spawn position, outward direction, palette tag
    Effect { pos: Vec2, dir: Vec2, color: ColorTag },
    BallSaved,
    BallLost { balls_remaining: u8 },
    GameOver { final_score: u64 },
    TiltActivated,
    TiltCleared,
}

/// The one ball on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Nominal only; collision response currently treats the ball as unit mass
    pub mass: f32,
    /// False while resting in the launch lane awaiting the plunger
    pub in_play: bool,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            in_play: false,
            trail: Vec::with_capacity(TRAIL_POINTS),
        }
    }

    /// Advance the ball one timestep: gravity, air drag, speed clamp,
    /// position integration. A ball that is not in play stays put in the
    /// launch lane.
    pub fn integrate(&mut self, dt: f32) {
        if !self.in_play {
            return;
        }
        self.vel.y += GRAVITY * dt;
        // Drag is expressed against a 60 Hz reference so the damping per
        // second is identical at any tick rate.
        self.vel *= (1.0 - AIR_FRICTION).powf(dt * 60.0);
        let speed = self.vel.length();
        if speed > MAX_BALL_SPEED {
            self.vel *= MAX_BALL_SPEED / speed;
        }
        self.pos += self.vel * dt;
        debug_assert!(self.pos.is_finite() && self.vel.is_finite());
        self.record_trail();
    }

    /// Record current position to trail (newest first, oldest dropped)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        if self.trail.len() > TRAIL_POINTS {
            self.trail.pop();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// Which side of the table a flipper guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

/// A powered flipper
///
/// The angle is measured conventionally with y negated for screen
/// coordinates: the left flipper rests low and sweeps up as the angle
/// grows toward its max; the right flipper mirrors through its negated
/// angle range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub pivot: Vec2,
    pub length: f32,
    pub side: FlipperSide,
    pub angle: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    /// Angular velocity of the last update step (rad/s, derived)
    pub ang_vel: f32,
    /// Activation intent from input translation; forced off while tilted
    pub engaged: bool,
}

impl Flipper {
    pub fn new(pivot: Vec2, side: FlipperSide) -> Self {
        let (min_angle, max_angle) = match side {
            FlipperSide::Left => (FLIPPER_LEFT_MIN, FLIPPER_LEFT_MAX),
            FlipperSide::Right => (FLIPPER_RIGHT_MIN, FLIPPER_RIGHT_MAX),
        };
        Self {
            pivot,
            length: FLIPPER_LENGTH,
            side,
            angle: min_angle,
            min_angle,
            max_angle,
            ang_vel: 0.0,
            engaged: false,
        }
    }

    /// Sweep toward the engaged/rest target at the fixed angular rate,
    /// never overshooting, and derive the step's angular velocity.
    pub fn update(&mut self, dt: f32) {
        let target = if self.engaged { self.max_angle } else { self.min_angle };
        let prev = self.angle;
        if self.angle < target {
            self.angle = (self.angle + FLIPPER_SPEED * dt).min(target);
        } else if self.angle > target {
            self.angle = (self.angle - FLIPPER_SPEED * dt).max(target);
        }
        // Invariant: angle stays within the hinge stops
        self.angle = self.angle.clamp(self.min_angle, self.max_angle);
        self.ang_vel = (self.angle - prev) / dt.max(1e-6);
    }

    /// Segment from pivot to tip at the current angle (y negated for
    /// screen coordinates).
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let dir = Vec2::new(self.angle.cos(), -self.angle.sin());
        (self.pivot, self.pivot + dir * self.length)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub table: Table,
    /// Lit flags cycle as sets complete; owned by the rules layer
    pub rollovers: Vec<Rollover>,
    pub ball: Ball,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    pub phase: GamePhase,
    pub paused: bool,
    pub score: u64,
    /// Best score seen across sessions; the driver loads and persists it
    pub high_score: u64,
    pub balls_left: u8,
    /// Accumulated plunger power, released into the launch speed
    pub plunger_charge: f32,
    pub ball_save_active: bool,
    pub ball_save_timer: f32,
    /// Bumper score multiplier, raised by completing the rollover set
    pub bumper_mult: u32,
    pub bumper_mult_timer: f32,
    /// Accumulated nudges; decays while the table is not tilted
    pub tilt_meter: f32,
    pub tilt_active: bool,
    pub tilt_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session on the classic table.
    pub fn new(seed: u64) -> Self {
        let table = Table::classic();
        let rollovers = table.rollovers();
        let ball = Ball::new(table.launch_pos);
        let left_flipper = Flipper::new(table.left_pivot, FlipperSide::Left);
        let right_flipper = Flipper::new(table.right_pivot, FlipperSide::Right);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            table,
            rollovers,
            ball,
            left_flipper,
            right_flipper,
            phase: GamePhase::Idle,
            paused: false,
            score: 0,
            high_score: 0,
            balls_left: START_BALLS,
            plunger_charge: 0.0,
            ball_save_active: false,
            ball_save_timer: 0.0,
            bumper_mult: 1,
            bumper_mult_timer: 0.0,
            tilt_meter: 0.0,
            tilt_active: false,
            tilt_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take all events appended since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Add to the score and record the delta.
    pub(crate) fn award(&mut self, amount: u64) {
        self.score += amount;
        self.events.push(GameEvent::ScoreDelta { amount });
    }

    /// Cosmetic hit feedback at a position with an outward direction.
    pub(crate) fn push_effect(&mut self, pos: Vec2, dir: Vec2, color: ColorTag) {
        self.events.push(GameEvent::Effect { pos, dir, color });
    }

    /// Fire the plunger: the accumulated charge plus the base speed,
    /// along a random angle in the up-and-left launch cone. Opens the
    /// ball-save window.
    pub(crate) fn launch_ball(&mut self) {
        if self.ball.in_play {
            return;
        }
        let angle = self.rng.random_range(LAUNCH_ANGLE_MIN..LAUNCH_ANGLE_MAX);
        let speed = self.plunger_charge + LAUNCH_BASE_SPEED;
        self.ball.vel = Vec2::new(angle.cos() * speed, -angle.sin() * speed);
        self.ball.in_play = true;
        self.ball.clear_trail();
        self.phase = GamePhase::InPlay;
        self.plunger_charge = 0.0;
        self.ball_save_active = true;
        self.ball_save_timer = BALL_SAVE_TIME;
        log::debug!("launch at {speed:.0} px/s, save window open");
    }

    /// Park a fresh ball in the launch lane.
    pub(crate) fn reset_ball(&mut self) {
        self.ball = Ball::new(self.table.launch_pos);
        self.plunger_charge = 0.0;
        self.ball_save_active = false;
        self.ball_save_timer = 0.0;
        self.phase = GamePhase::Idle;
    }

    /// Shove the table: a random sideways impulse on the ball and one more
    /// notch on the tilt meter. Crossing the threshold tilts the table,
    /// which kills both flipper intents for the lockout.
    pub(crate) fn nudge(&mut self) {
        let sign = if self.rng.random::<bool>() { 1.0 } else { -1.0 };
        self.ball.vel.x += sign * NUDGE_IMPULSE;
        self.tilt_meter += 1.0;
        if self.tilt_meter >= TILT_MAX && !self.tilt_active {
            self.tilt_active = true;
            self.tilt_timer = TILT_LOCKOUT;
            self.left_flipper.engaged = false;
            self.right_flipper.engaged = false;
            self.events.push(GameEvent::TiltActivated);
            log::info!("tilt: flippers locked for {TILT_LOCKOUT}s");
        }
    }

    /// Resolve a drained ball: consume the save window if open, otherwise
    /// spend a life, ending the session when none remain.
    pub(crate) fn drain_ball(&mut self) {
        self.ball.in_play = false;
        if self.ball_save_active {
            self.reset_ball();
            self.events.push(GameEvent::BallSaved);
            log::debug!("ball saved");
            return;
        }
        self.balls_left = self.balls_left.saturating_sub(1);
        self.events.push(GameEvent::BallLost {
            balls_remaining: self.balls_left,
        });
        if self.balls_left == 0 {
            self.phase = GamePhase::GameOver;
            self.high_score = self.high_score.max(self.score);
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
            log::info!("game over, final score {}", self.score);
        } else {
            self.reset_ball();
        }
    }

    /// Start a new session from game over. The high score survives.
    pub(crate) fn restart(&mut self) {
        self.score = 0;
        self.balls_left = START_BALLS;
        self.paused = false;
        self.bumper_mult = 1;
        self.bumper_mult_timer = 0.0;
        for r in &mut self.rollovers {
            r.lit = false;
        }
        self.tilt_meter = 0.0;
        self.tilt_active = false;
        self.tilt_timer = 0.0;
        self.left_flipper = Flipper::new(self.table.left_pivot, FlipperSide::Left);
        self.right_flipper = Flipper::new(self.table.right_pivot, FlipperSide::Right);
        self.reset_ball();
    }
}
