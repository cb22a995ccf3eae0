//! Shot planner for the computer opponent
//!
//! Ghost-ball aiming: for every (target, pocket) pair, find where the cue
//! ball has to be at contact, throw out cuts that are too thin or paths that
//! are blocked, and keep the shortest and straightest of what survives.

use glam::Vec2;

use super::state::{Ball, BallId, CUE_BALL, EIGHT_BALL, Group};
use super::table::Table;
use crate::consts::FRICTION;
use crate::point_segment_distance;

/// Cuts with cos(angle) below this (~78 degrees) are unmakeable
const MIN_CUT_ALIGNMENT: f32 = 0.2;

/// Shot power limits (velocity units per tick)
const MIN_SHOT_POWER: f32 = 3.0;
const MAX_SHOT_POWER: f32 = 15.0;
/// Power needed per unit of total path length, before cut loss
const POWER_PER_DISTANCE: f32 = 0.02;
/// Fallback shots carry this much more travel than the distance to cover
const FALLBACK_TRAVEL_MARGIN: f32 = 1.5;

/// Score weights
const ALIGNMENT_WEIGHT: f32 = 1.0;
const DISTANCE_WEIGHT: f32 = 100.0;

/// A makeable shot
#[derive(Debug, Clone, PartialEq)]
pub struct ShotCandidate {
    pub target: BallId,
    /// Index into `Table::pockets`
    pub pocket: usize,
    /// Cue-ball center at contact
    pub ghost: Vec2,
    /// Velocity to give the cue ball
    pub velocity: Vec2,
    pub score: f32,
}

/// Balls the shooter may legally aim at.
///
/// With a group: that group, or the 8 once the group is cleared. With an
/// open table: anything but the cue and the 8.
pub fn legal_targets(balls: &[Ball], group: Option<Group>) -> Vec<&Ball> {
    match group {
        Some(group) => {
            let own: Vec<&Ball> = balls.iter().filter(|b| group.contains(b.id)).collect();
            if own.is_empty() {
                balls.iter().filter(|b| b.id == EIGHT_BALL).collect()
            } else {
                own
            }
        }
        None => balls
            .iter()
            .filter(|b| b.id != CUE_BALL && b.id != EIGHT_BALL)
            .collect(),
    }
}

/// Every unobstructed, makeable shot, best first
pub fn shot_candidates(table: &Table, balls: &[Ball], group: Option<Group>) -> Vec<ShotCandidate> {
    let Some(cue) = balls.iter().find(|b| b.is_cue()) else {
        return Vec::new();
    };
    let diameter = table.contact_distance();

    let mut candidates = Vec::new();
    for target in legal_targets(balls, group) {
        for (pocket_idx, pocket) in table.pockets.iter().enumerate() {
            let to_pocket = *pocket - target.pos;
            let Some(pocket_dir) = to_pocket.try_normalize() else {
                continue;
            };
            // One diameter behind the target, away from the pocket
            let ghost = target.pos - pocket_dir * diameter;
            if !table.holds_ball_at(ghost) {
                continue;
            }

            let to_ghost = ghost - cue.pos;
            let Some(aim_dir) = to_ghost.try_normalize() else {
                continue;
            };

            let alignment = aim_dir.dot(pocket_dir);
            if alignment < MIN_CUT_ALIGNMENT {
                continue;
            }

            let ignore = [CUE_BALL, target.id];
            if !path_clear(cue.pos, ghost, balls, &ignore, diameter)
                || !path_clear(target.pos, *pocket, balls, &ignore, diameter)
            {
                continue;
            }

            let total = to_ghost.length() + to_pocket.length();
            let score = alignment * ALIGNMENT_WEIGHT + DISTANCE_WEIGHT / total.max(1.0);
            let power = (total * POWER_PER_DISTANCE / alignment).clamp(MIN_SHOT_POWER, MAX_SHOT_POWER);

            candidates.push(ShotCandidate {
                target: target.id,
                pocket: pocket_idx,
                ghost,
                velocity: aim_dir * power,
                score,
            });
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// Pick the AI's shot.
///
/// Returns the best candidate's velocity; if nothing is makeable, a modest
/// shot straight at the nearest legal ball so the turn at least makes
/// contact. `None` only when there is no cue ball or no legal target.
pub fn plan_shot(table: &Table, balls: &[Ball], group: Option<Group>) -> Option<Vec2> {
    let cue = balls.iter().find(|b| b.is_cue())?;

    if let Some(best) = shot_candidates(table, balls, group).first() {
        log::debug!(
            "Planned shot at {} into pocket {} (score {:.3})",
            best.target,
            best.pocket,
            best.score
        );
        return Some(best.velocity);
    }

    let nearest = legal_targets(balls, group)
        .into_iter()
        .filter_map(|b| {
            let to_target = b.pos - cue.pos;
            let dir = to_target.try_normalize()?;
            Some((b, dir, to_target.length()))
        })
        .min_by(|(a, _, _), (b, _, _)| {
            a.pos
                .distance_squared(cue.pos)
                .total_cmp(&b.pos.distance_squared(cue.pos))
        });

    nearest.map(|(target, dir, distance)| {
        log::debug!("No makeable shot, playing safe at {}", target.id);
        dir * fallback_power(distance)
    })
}

/// Power that carries the cue ball past `distance` before friction stops it.
/// A ball launched at `v` rolls about `v / (1 - FRICTION)`.
fn fallback_power(distance: f32) -> f32 {
    (distance * (1.0 - FRICTION) * FALLBACK_TRAVEL_MARGIN).clamp(MIN_SHOT_POWER, MAX_SHOT_POWER)
}

/// No other ball within `clearance` of the segment
fn path_clear(from: Vec2, to: Vec2, balls: &[Ball], ignore: &[BallId], clearance: f32) -> bool {
    balls
        .iter()
        .filter(|b| !ignore.contains(&b.id))
        .all(|b| point_segment_distance(b.pos, from, to) >= clearance)
}
