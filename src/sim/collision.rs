//! Collision detection and response
//!
//! Rails, ball-ball contacts and pocket capture. Everything is evaluated on
//! end-of-tick positions; there is no swept test, so a very fast ball can
//! tunnel through a thin feature. That approximation is accepted.

use glam::Vec2;

use super::state::{Ball, BallId, CUE_BALL};
use super::table::Table;
use crate::consts::RAIL_RESTITUTION;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Unit normal from the first shape toward the second
    pub normal: Vec2,
    /// Overlap depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check contact between two equal balls centered at `a` and `b`
pub fn ball_ball_collision(a: Vec2, b: Vec2, radius: f32) -> CollisionResult {
    let delta = b - a;
    let min_dist = radius * 2.0;
    let dist_sq = delta.length_squared();

    if dist_sq >= min_dist * min_dist {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    // Coincident centers have no defined normal; pick +X
    let normal = if dist > 0.0001 { delta / dist } else { Vec2::X };

    CollisionResult {
        hit: true,
        normal,
        penetration: min_dist - dist,
    }
}

/// Resolve a ball-ball contact in place.
///
/// Overlap is split evenly between the two balls along the normal, then the
/// normal velocity components are swapped (equal masses, perfectly elastic,
/// no spin). Tangential components are untouched. Returns true if the balls
/// were in contact.
pub fn resolve_ball_collision(a: &mut Ball, b: &mut Ball, radius: f32) -> bool {
    let result = ball_ball_collision(a.pos, b.pos, radius);
    if !result.hit {
        return false;
    }

    let normal = result.normal;
    separate_balls(a, b, radius);

    let a_n = a.vel.dot(normal);
    let b_n = b.vel.dot(normal);

    // Only exchange while the pair is closing
    if a_n - b_n > 0.0 {
        a.vel += normal * (b_n - a_n);
        b.vel += normal * (a_n - b_n);
    }

    true
}

/// Push two overlapping balls apart along their normal, leaving velocities
/// alone. Returns true if they overlapped.
pub fn separate_balls(a: &mut Ball, b: &mut Ball, radius: f32) -> bool {
    let result = ball_ball_collision(a.pos, b.pos, radius);
    if !result.hit {
        return false;
    }
    let separation = result.normal * (result.penetration * 0.5);
    a.pos -= separation;
    b.pos += separation;
    true
}

/// Keep a ball on the felt. A ball whose edge crossed a rail is clamped back
/// one radius inside and its velocity component is turned back into the
/// table, losing energy. Returns true if any rail was hit.
pub fn resolve_wall_collision(ball: &mut Ball, table: &Table) -> bool {
    let lo = table.felt_min() + Vec2::splat(table.ball_radius);
    let hi = table.felt_max() - Vec2::splat(table.ball_radius);
    let mut hit = false;

    if ball.pos.x < lo.x {
        ball.pos.x = lo.x;
        ball.vel.x = ball.vel.x.abs() * RAIL_RESTITUTION;
        hit = true;
    } else if ball.pos.x > hi.x {
        ball.pos.x = hi.x;
        ball.vel.x = -ball.vel.x.abs() * RAIL_RESTITUTION;
        hit = true;
    }

    if ball.pos.y < lo.y {
        ball.pos.y = lo.y;
        ball.vel.y = ball.vel.y.abs() * RAIL_RESTITUTION;
        hit = true;
    } else if ball.pos.y > hi.y {
        ball.pos.y = hi.y;
        ball.vel.y = -ball.vel.y.abs() * RAIL_RESTITUTION;
        hit = true;
    }

    hit
}

/// Index of the first pocket whose capture radius contains `pos`
pub fn pocket_capture(pos: Vec2, table: &Table) -> Option<usize> {
    let radius_sq = table.pocket_radius * table.pocket_radius;
    table
        .pockets
        .iter()
        .position(|pocket| pos.distance_squared(*pocket) < radius_sq)
}

/// Record the first object ball the cue ball touches. Later contacts in the
/// same shot never overwrite it.
pub fn record_first_contact(first_hit: &mut Option<BallId>, a: BallId, b: BallId) {
    if first_hit.is_some() {
        return;
    }
    if a == CUE_BALL && b != CUE_BALL {
        *first_hit = Some(b);
    } else if b == CUE_BALL && a != CUE_BALL {
        *first_hit = Some(a);
    }
}
