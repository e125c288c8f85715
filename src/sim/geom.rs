//! Collision primitives for the table geometry
//!
//! Pure functions only: circle-vs-segment, circle-vs-circle, and velocity
//! reflection with restitution. Everything downstream (walls, bumpers,
//! flippers) is built from these three tests.

use glam::Vec2;

/// Guards the unit-normal division when a circle center lands exactly on
/// a segment point or another circle center.
pub const EPSILON: f32 = 1e-9;

/// Result of a circle-vs-segment overlap test
#[derive(Debug, Clone, Copy)]
pub struct SegmentHit {
    /// Minimum translation that clears the circle off the segment
    pub push: Vec2,
    /// Outward unit normal (from the closest point toward the circle center)
    pub normal: Vec2,
    /// Closest point on the segment
    pub contact: Vec2,
    /// Parametric position of the closest point along `a -> b`, in [0, 1]
    pub t: f32,
}

/// Result of a circle-vs-circle overlap test
#[derive(Debug, Clone, Copy)]
pub struct CircleHit {
    /// Minimum translation that separates circle 1 from circle 2
    pub push: Vec2,
    /// Unit normal pointing from circle 2 toward circle 1
    pub normal: Vec2,
}

/// Test a circle against the segment `a -> b`.
///
/// A zero-length segment degrades to a point test with `t = 0`.
pub fn circle_segment(center: Vec2, radius: f32, a: Vec2, b: Vec2) -> Option<SegmentHit> {
    let ab = b - a;
    let ab2 = ab.length_squared();
    if ab2 == 0.0 {
        let diff = center - a;
        let dist = diff.length() + EPSILON;
        if dist < radius {
            let normal = diff / dist;
            return Some(SegmentHit {
                push: normal * (radius - dist),
                normal,
                contact: a,
                t: 0.0,
            });
        }
        return None;
    }

    let t = ((center - a).dot(ab) / ab2).clamp(0.0, 1.0);
    let contact = a + ab * t;
    let diff = center - contact;
    let dist = diff.length() + EPSILON;
    if dist < radius {
        let normal = diff / dist;
        return Some(SegmentHit {
            push: normal * (radius - dist),
            normal,
            contact,
            t,
        });
    }
    None
}

/// Test circle 1 against circle 2.
pub fn circle_circle(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> Option<CircleHit> {
    let diff = c1 - c2;
    let dist = diff.length() + EPSILON;
    if dist < r1 + r2 {
        let normal = diff / dist;
        return Some(CircleHit {
            push: normal * (r1 + r2 - dist),
            normal,
        });
    }
    None
}

/// Reflect a velocity off a surface with the given restitution.
///
/// Only acts when the velocity points into the surface (`v·n < 0`);
/// an already-separating velocity is returned unchanged, so the
/// post-collision normal component never points inward for `e >= 0`.
#[inline]
pub fn reflect(v: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let vn = v.dot(normal);
    if vn < 0.0 {
        v - (1.0 + restitution) * vn * normal
    } else {
        v
    }
}
