//! Static table layout
//!
//! Pure data: wall segments, bumper circles, rollover sensors, flipper
//! pivots, launch-lane rest position, and the hard playfield bounds. The
//! layout is fixed at construction; only rollover `lit` flags (minted
//! separately via [`Table::rollovers`]) mutate during play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Color role attached to hit-effect events, so the presentation layer can
/// pick a palette without knowing table internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    /// Plain rails
    Steel,
    /// Extra-bouncy slingshot walls (warm color)
    Slingshot,
    Bumper,
    Rollover,
    Flipper,
}

/// An immutable wall segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
    pub restitution: f32,
    pub score: u64,
    pub color: ColorTag,
}

impl Wall {
    /// A plain rail with the standard wall restitution.
    pub fn rail(a: Vec2, b: Vec2) -> Self {
        Self {
            a,
            b,
            restitution: RESTI_BALL_WALL,
            score: 5,
            color: ColorTag::Steel,
        }
    }

    /// A slingshot: over-unity restitution so it actively fires the ball.
    pub fn slingshot(a: Vec2, b: Vec2) -> Self {
        Self {
            a,
            b,
            restitution: 1.2,
            score: 25,
            color: ColorTag::Slingshot,
        }
    }
}

/// A powered bumper circle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bumper {
    pub pos: Vec2,
    pub radius: f32,
    pub score: u64,
}

/// A rollover lane sensor
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rollover {
    pub pos: Vec2,
    pub radius: f32,
    pub lit: bool,
    pub score: u64,
}

impl Rollover {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 14.0,
            lit: false,
            score: 250,
        }
    }

    /// Light the sensor on overlap. Returns true only on the lighting
    /// transition; an already-lit sensor never re-fires.
    ///
    /// The effective radius uses 0.6x the ball radius so the ball has to
    /// pass well over the lane rather than graze it.
    pub fn check(&mut self, ball_pos: Vec2, ball_radius: f32) -> bool {
        if self.lit {
            return false;
        }
        if (ball_pos - self.pos).length() < self.radius + ball_radius * 0.6 {
            self.lit = true;
            return true;
        }
        false
    }
}

/// The full static layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub walls: Vec<Wall>,
    pub bumpers: Vec<Bumper>,
    /// Rollover sensor centers; live sensors are minted via [`Table::rollovers`]
    pub rollover_sites: Vec<Vec2>,
    pub left_pivot: Vec2,
    pub right_pivot: Vec2,
    /// Where the idle ball rests in the launch lane
    pub launch_pos: Vec2,
    /// Hard safety bounds, slightly outside the wall list
    pub left_bound: f32,
    pub right_bound: f32,
    pub top_bound: f32,
    /// Below this line the ball counts as drained
    pub drain_y: f32,
}

impl Table {
    /// The classic single-table layout: a walled main field with a plunger
    /// lane on the right, two slingshots above the flippers, a bumper
    /// triad plus scatter, and three top-lane rollovers.
    pub fn classic() -> Self {
        let w = FIELD_WIDTH;
        let h = FIELD_HEIGHT;
        let margin = 80.0;
        let bottom_y = h - 80.0;

        let walls = vec![
            // Side and top walls for the main field
            Wall::rail(Vec2::new(margin, 140.0), Vec2::new(margin, bottom_y)),
            Wall::rail(Vec2::new(margin, 140.0), Vec2::new(w - margin - 100.0, 140.0)),
            Wall::rail(
                Vec2::new(w - margin - 100.0, 140.0),
                Vec2::new(w - margin - 100.0, bottom_y - 180.0),
            ),
            // Bottom inlanes funneling toward the drain
            Wall::rail(Vec2::new(margin, bottom_y), Vec2::new(w / 2.0 - 80.0, h - 20.0)),
            Wall::rail(
                Vec2::new(w - margin - 100.0, bottom_y - 180.0),
                Vec2::new(w - margin - 60.0, bottom_y - 60.0),
            ),
            Wall::rail(
                Vec2::new(w - margin - 60.0, bottom_y - 60.0),
                Vec2::new(w / 2.0 + 80.0, h - 20.0),
            ),
            // Slingshots above the flippers
            Wall::slingshot(
                Vec2::new(w * 0.28, bottom_y - 40.0),
                Vec2::new(w * 0.42, bottom_y - 110.0),
            ),
            Wall::slingshot(
                Vec2::new(w * 0.72, bottom_y - 40.0),
                Vec2::new(w * 0.58, bottom_y - 110.0),
            ),
        ];

        // Bumper triad plus scatter
        let bumpers = vec![
            Bumper { pos: Vec2::new(w * 0.35, 300.0), radius: 38.0, score: 150 },
            Bumper { pos: Vec2::new(w * 0.55, 300.0), radius: 38.0, score: 150 },
            Bumper { pos: Vec2::new(w * 0.45, 220.0), radius: 38.0, score: 200 },
            Bumper { pos: Vec2::new(w * 0.32, 480.0), radius: 28.0, score: 100 },
            Bumper { pos: Vec2::new(w * 0.58, 520.0), radius: 28.0, score: 100 },
            Bumper { pos: Vec2::new(w * 0.46, 620.0), radius: 24.0, score: 75 },
        ];

        // Top lanes: light all three for the bonus
        let rollover_sites = vec![
            Vec2::new(w * 0.35, 160.0),
            Vec2::new(w * 0.45, 160.0),
            Vec2::new(w * 0.55, 160.0),
        ];

        let pivot_y = h - 120.0;

        Self {
            width: w,
            height: h,
            walls,
            bumpers,
            rollover_sites,
            left_pivot: Vec2::new(w * 0.35, pivot_y),
            right_pivot: Vec2::new(w * 0.65, pivot_y),
            launch_pos: Vec2::new(w - 140.0, h - 140.0),
            left_bound: 74.0,
            right_bound: w - 160.0,
            top_bound: 136.0,
            drain_y: h + 40.0,
        }
    }

    /// Mint a fresh, unlit rollover set for the rules layer to own.
    pub fn rollovers(&self) -> Vec<Rollover> {
        self.rollover_sites.iter().map(|&pos| Rollover::new(pos)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_layout_shape() {
        let table = Table::classic();
        assert_eq!(table.walls.len(), 8);
        assert_eq!(table.bumpers.len(), 6);
        assert_eq!(table.rollover_sites.len(), 3);

        let slingshots: Vec<_> = table
            .walls
            .iter()
            .filter(|w| w.color == ColorTag::Slingshot)
            .collect();
        assert_eq!(slingshots.len(), 2);
        for s in slingshots {
            assert!(s.restitution > 1.0);
            assert_eq!(s.score, 25);
        }

        // Pivots and launch lane sit inside the playfield
        assert!(table.left_pivot.x < table.right_pivot.x);
        assert!(table.launch_pos.y < table.drain_y);
        assert!(table.left_bound < table.right_bound);
    }

    #[test]
    fn rollovers_start_unlit() {
        let table = Table::classic();
        let set = table.rollovers();
        assert_eq!(set.len(), 3);
        assert!(set.iter().all(|r| !r.lit));
    }

    #[test]
    fn rollover_lights_once() {
        let mut r = Rollover::new(Vec2::new(100.0, 100.0));
        // Outside the tightened trigger radius: 14 + 12*0.6 = 21.2
        assert!(!r.check(Vec2::new(100.0, 122.0), 12.0));
        assert!(!r.lit);
        assert!(r.check(Vec2::new(100.0, 120.0), 12.0));
        assert!(r.lit);
        // Idempotent while lit
        assert!(!r.check(Vec2::new(100.0, 100.0), 12.0));
    }
}
