//! Fixed per-frame physics tick
//!
//! Advances every ball one discrete step: move, decay, rails, pockets, then
//! pairwise ball contacts on the end-of-tick positions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    pocket_capture, record_first_contact, resolve_ball_collision, resolve_wall_collision,
    separate_balls,
};
use super::state::{Ball, BallId, ShotEvents};
use super::table::Table;
use crate::consts::{FRICTION, STOP_VELOCITY};

/// Upper bound on position-only passes after the contact pass
const MAX_SEPARATION_PASSES: usize = 32;

/// What one tick produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Object balls captured this tick, in capture order
    pub potted: Vec<BallId>,
    /// Cue ball captured this tick
    pub scratch: bool,
    /// First object ball the cue ball touched this tick
    pub first_hit: Option<BallId>,
    /// Any ball still has non-zero velocity after the tick
    pub still_moving: bool,
}

impl StepReport {
    /// Fold this tick into the running shot. `first_hit` only lands if the
    /// shot has none yet.
    pub fn merge_into(&self, shot: &mut ShotEvents) {
        shot.potted.extend_from_slice(&self.potted);
        shot.scratch |= self.scratch;
        if shot.first_hit.is_none() {
            shot.first_hit = self.first_hit;
        }
    }
}

/// Advance the ball set by one tick
pub fn step(table: &Table, balls: &mut Vec<Ball>) -> StepReport {
    let mut report = StepReport::default();
    let mut captured: Vec<BallId> = Vec::new();

    // Movement, friction, rails, pockets
    for ball in balls.iter_mut() {
        ball.pos += ball.vel;
        ball.vel *= FRICTION;
        if ball.vel.length() < STOP_VELOCITY {
            ball.vel = Vec2::ZERO;
        }

        resolve_wall_collision(ball, table);

        // First matching pocket wins; the ball is gone before the next check
        if pocket_capture(ball.pos, table).is_some() {
            captured.push(ball.id);
            if ball.is_cue() {
                report.scratch = true;
            } else {
                report.potted.push(ball.id);
            }
        }
    }

    if !captured.is_empty() {
        log::debug!("Captured balls {:?}", captured);
        balls.retain(|b| !captured.contains(&b.id));
    }

    // Ball-ball contacts, stable pair order
    let count = balls.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = balls.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if resolve_ball_collision(a, b, table.ball_radius) {
                record_first_contact(&mut report.first_hit, a.id, b.id);
            }
        }
    }

    // Pushing one pair apart can squeeze a third ball; relax until clear
    for _ in 0..MAX_SEPARATION_PASSES {
        if !separation_pass(table, balls) {
            break;
        }
    }

    report.still_moving = balls.iter().any(Ball::is_moving);
    report
}

/// One position-only sweep over every pair, keeping balls on the felt.
/// Returns true if any pair overlapped.
fn separation_pass(table: &Table, balls: &mut [Ball]) -> bool {
    let lo = table.felt_min() + Vec2::splat(table.ball_radius);
    let hi = table.felt_max() - Vec2::splat(table.ball_radius);
    let mut any = false;

    let count = balls.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = balls.split_at_mut(j);
            any |= separate_balls(&mut head[i], &mut tail[0], table.ball_radius);
        }
    }
    if any {
        for ball in balls.iter_mut() {
            ball.pos = ball.pos.clamp(lo, hi);
        }
    }
    any
}

/// Step until every ball is at rest (or `max_ticks` elapse) and return the
/// accumulated shot events along with the number of ticks run.
pub fn run_until_rest(table: &Table, balls: &mut Vec<Ball>, max_ticks: u32) -> (ShotEvents, u32) {
    let mut shot = ShotEvents::default();
    let mut ticks = 0;
    while ticks < max_ticks {
        let report = step(table, balls);
        report.merge_into(&mut shot);
        ticks += 1;
        if !report.still_moving {
            break;
        }
    }
    (shot, ticks)
}
