//! Ball-in-hand placement
//!
//! Validates cue-ball positions and finds a legal spot for the AI.

use glam::Vec2;
use thiserror::Error;

use super::state::{Ball, BallId, CUE_BALL};
use super::table::Table;
use crate::cue_start;

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlacementError {
    /// Ball would not lie fully on the felt
    #[error("cue ball at ({x}, {y}) is off the playing surface")]
    OutOfBounds { x: f32, y: f32 },

    /// Ball would overlap an object ball
    #[error("cue ball would overlap ball {ball}")]
    Overlap { ball: BallId },
}

/// Spots the AI tries first, relative to the head spot
const AI_PLACEMENT_OFFSETS: [Vec2; 6] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(50.0, 0.0),
    Vec2::new(-50.0, 0.0),
    Vec2::new(0.0, -50.0),
    Vec2::new(0.0, 50.0),
    Vec2::new(100.0, 0.0),
];

/// Grid step for the fallback scan
const PLACEMENT_SCAN_STEP: f32 = 25.0;

/// Check a cue-ball position against the felt and every object ball
pub fn validate_placement(table: &Table, balls: &[Ball], pos: Vec2) -> Result<(), PlacementError> {
    if !table.holds_ball_at(pos) {
        return Err(PlacementError::OutOfBounds { x: pos.x, y: pos.y });
    }
    let min_dist_sq = table.contact_distance() * table.contact_distance();
    match balls
        .iter()
        .find(|b| !b.is_cue() && b.pos.distance_squared(pos) < min_dist_sq)
    {
        Some(blocking) => Err(PlacementError::Overlap { ball: blocking.id }),
        None => Ok(()),
    }
}

/// Put the cue ball at `pos` (re-adding it after a scratch). Leaves `balls`
/// untouched on rejection.
pub fn place_cue_ball(table: &Table, balls: &mut Vec<Ball>, pos: Vec2) -> Result<(), PlacementError> {
    validate_placement(table, balls, pos)?;

    match balls.iter_mut().find(|b| b.is_cue()) {
        Some(cue) => *cue = Ball::new(CUE_BALL, pos),
        None => {
            // Cue ball sorts first
            balls.insert(0, Ball::new(CUE_BALL, pos));
        }
    }
    Ok(())
}

/// Legal spot for an AI ball-in-hand: the preferred spots around the head
/// spot in order, then a scan of the felt. `None` only if the felt is full.
pub fn choose_ai_placement(table: &Table, balls: &[Ball]) -> Option<Vec2> {
    let head = cue_start();
    let preferred = AI_PLACEMENT_OFFSETS.iter().map(|offset| head + *offset);

    let lo = table.felt_min() + Vec2::splat(table.ball_radius);
    let hi = table.felt_max() - Vec2::splat(table.ball_radius);
    let cols = ((hi.x - lo.x) / PLACEMENT_SCAN_STEP) as u32;
    let rows = ((hi.y - lo.y) / PLACEMENT_SCAN_STEP) as u32;
    let scan = (0..=rows).flat_map(move |r| {
        (0..=cols).map(move |c| {
            lo + Vec2::new(c as f32 * PLACEMENT_SCAN_STEP, r as f32 * PLACEMENT_SCAN_STEP)
        })
    });

    preferred
        .chain(scan)
        .find(|pos| validate_placement(table, balls, *pos).is_ok())
}
