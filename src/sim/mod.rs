//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, input polling, or platform dependencies
//!
//! Side effects leave the core as [`GameEvent`] records drained after each
//! tick.

pub mod collision;
pub mod geom;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::resolve;
pub use geom::{CircleHit, SegmentHit, circle_circle, circle_segment, reflect};
pub use state::{Ball, Flipper, FlipperSide, GameEvent, GamePhase, GameState};
pub use table::{Bumper, ColorTag, Rollover, Table, Wall};
pub use tick::{TickInput, tick};
