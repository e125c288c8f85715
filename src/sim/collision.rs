//! Per-frame collision resolution
//!
//! Tests the ball against every table element in a fixed order: walls,
//! hard boundary clamps, bumpers, rollovers, then each flipper. Each hit
//! applies positional correction and velocity response, and (only while
//! the ball is in play) awards score and queues a hit-effect event.

use glam::Vec2;

use super::geom;
use super::state::{FlipperSide, GameState};
use super::table::ColorTag;
use crate::consts::*;

/// Resolve all collisions for the current frame.
///
/// Walls run before the boundary clamps: the wall list owns the normal
/// response and the clamps only catch what tunnels past it.
pub fn resolve(state: &mut GameState) {
    resolve_walls(state);
    clamp_bounds(state);
    resolve_bumpers(state);
    resolve_rollovers(state);
    resolve_flipper(state, FlipperSide::Left);
    resolve_flipper(state, FlipperSide::Right);
}

fn resolve_walls(state: &mut GameState) {
    // Walls are small Copy structs; take them by value so the ball borrow
    // stays simple.
    for i in 0..state.table.walls.len() {
        let wall = state.table.walls[i];
        let Some(hit) = geom::circle_segment(state.ball.pos, state.ball.radius, wall.a, wall.b)
        else {
            continue;
        };
        state.ball.pos += hit.push;

        // Damp the tangential component, then reflect the normal one with
        // the wall's own restitution.
        let tangent = Vec2::new(-hit.normal.y, hit.normal.x);
        let vt = state.ball.vel.dot(tangent) * (1.0 - TANGENTIAL_FRICTION);
        let vn = state.ball.vel.dot(hit.normal);
        state.ball.vel = tangent * vt + hit.normal * vn;
        state.ball.vel = geom::reflect(state.ball.vel, hit.normal, wall.restitution);

        if state.ball.in_play {
            state.award(wall.score);
            let pos = state.ball.pos;
            state.push_effect(pos, hit.normal, wall.color);
        }
    }
}

/// Hard playfield margins, independent of the wall list. Always active,
/// even for the idle ball: this is the fail-safe against tunneling.
fn clamp_bounds(state: &mut GameState) {
    let left = state.table.left_bound;
    let right = state.table.right_bound;
    let top = state.table.top_bound;
    let ball = &mut state.ball;

    if ball.pos.x - ball.radius < left {
        ball.pos.x = left + ball.radius;
        ball.vel.x = ball.vel.x.abs() * RESTI_BALL_WALL;
    }
    if ball.pos.x + ball.radius > right {
        ball.pos.x = right - ball.radius;
        ball.vel.x = -ball.vel.x.abs() * RESTI_BALL_WALL;
    }
    if ball.pos.y - ball.radius < top {
        ball.pos.y = top + ball.radius;
        ball.vel.y = ball.vel.y.abs() * RESTI_BALL_WALL;
    }
}

fn resolve_bumpers(state: &mut GameState) {
    for i in 0..state.table.bumpers.len() {
        let bumper = state.table.bumpers[i];
        let Some(hit) =
            geom::circle_circle(state.ball.pos, state.ball.radius, bumper.pos, bumper.radius)
        else {
            continue;
        };
        state.ball.pos += hit.push;
        state.ball.vel = geom::reflect(state.ball.vel, hit.normal, RESTI_BALL_BUMPER);
        // Bumpers are powered: they kick outward beyond the pure bounce
        state.ball.vel += hit.normal * BUMPER_KICK;

        if state.ball.in_play {
            let amount = bumper.score * u64::from(state.bumper_mult);
            state.award(amount);
            let pos = state.ball.pos;
            state.push_effect(pos, hit.normal, ColorTag::Bumper);
        }
    }
}

fn resolve_rollovers(state: &mut GameState) {
    let ball_pos = state.ball.pos;
    let ball_radius = state.ball.radius;
    let in_play = state.ball.in_play;

    for i in 0..state.rollovers.len() {
        if state.rollovers[i].check(ball_pos, ball_radius) && in_play {
            let pos = state.rollovers[i].pos;
            let score = state.rollovers[i].score;
            state.award(score);
            state.push_effect(pos, Vec2::new(0.0, -1.0), ColorTag::Rollover);
        }
    }

    // Full set lit: one bonus, bumper multiplier window opens, lights reset
    if in_play && state.rollovers.iter().all(|r| r.lit) {
        state.award(ROLLOVER_BONUS);
        state.bumper_mult = BUMPER_MULT;
        state.bumper_mult_timer = BUMPER_MULT_TIME;
        for r in &mut state.rollovers {
            r.lit = false;
        }
        log::debug!("rollover set complete, bumpers x{BUMPER_MULT}");
    }
}

fn resolve_flipper(state: &mut GameState, side: FlipperSide) {
    let flipper = match side {
        FlipperSide::Left => &state.left_flipper,
        FlipperSide::Right => &state.right_flipper,
    };
    let (a, b) = flipper.endpoints();
    let pivot = flipper.pivot;
    let ang_vel = flipper.ang_vel;

    let Some(hit) = geom::circle_segment(state.ball.pos, state.ball.radius, a, b) else {
        return;
    };
    state.ball.pos += hit.push;
    state.ball.vel = geom::reflect(state.ball.vel, hit.normal, RESTI_BALL_FLIPPER);

    // Velocity of the contact point under the flipper's rotation: the
    // perpendicular of the contact-to-pivot arm scaled by angular velocity
    // (screen coordinates flip the usual handedness). A flipper swinging
    // into the ball transfers most of that speed along the normal.
    let r = pivot - hit.contact;
    let point_vel = Vec2::new(-r.y, r.x) * ang_vel;
    let boost = point_vel.dot(hit.normal);
    if boost > 0.0 {
        state.ball.vel += hit.normal * boost * FLIPPER_BOOST;
    }

    if state.ball.in_play {
        state.award(FLIPPER_SCORE);
        state.push_effect(hit.contact, hit.normal, ColorTag::Flipper);
    }
}
