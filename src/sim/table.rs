//! Table geometry and the opening rack
//!
//! All positions are table coordinates: the felt spans
//! `[rail, rail + width] x [rail, rail + height]`, pockets sit on the
//! rail corners and just outside the middle of the long rails.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, BallId, CUE_BALL};
use crate::consts::*;
use crate::cue_start;

/// Canonical rack order, apex first then rows of 2, 3, 4, 5
pub const RACK_PATTERN: [BallId; 15] = [1, 9, 2, 3, 8, 4, 5, 6, 7, 10, 11, 12, 13, 14, 15];

/// Rows in the triangle
const RACK_ROWS: usize = 5;

/// Extra spacing between racked balls so neighbours never start overlapping
const RACK_GAP: f32 = 0.05;

/// Static table geometry. Never changes once a game starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Felt width
    pub width: f32,
    /// Felt height
    pub height: f32,
    /// Rail thickness
    pub rail: f32,
    /// Capture radius around each pocket center
    pub pocket_radius: f32,
    /// Radius shared by every ball
    pub ball_radius: f32,
    /// Pocket centers: top-left, top-middle, top-right, bottom-left, bottom-middle, bottom-right
    pub pockets: [Vec2; 6],
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TABLE_WIDTH, TABLE_HEIGHT, RAIL_WIDTH, POCKET_RADIUS, BALL_RADIUS)
    }
}

impl Table {
    pub fn new(width: f32, height: f32, rail: f32, pocket_radius: f32, ball_radius: f32) -> Self {
        let left = rail;
        let right = rail + width;
        let top = rail;
        let bottom = rail + height;
        let mid_x = rail + width / 2.0;
        Self {
            width,
            height,
            rail,
            pocket_radius,
            ball_radius,
            pockets: [
                Vec2::new(left, top),
                Vec2::new(mid_x, top - SIDE_POCKET_OFFSET),
                Vec2::new(right, top),
                Vec2::new(left, bottom),
                Vec2::new(mid_x, bottom + SIDE_POCKET_OFFSET),
                Vec2::new(right, bottom),
            ],
        }
    }

    /// Top-left corner of the felt
    #[inline]
    pub fn felt_min(&self) -> Vec2 {
        Vec2::splat(self.rail)
    }

    /// Bottom-right corner of the felt
    #[inline]
    pub fn felt_max(&self) -> Vec2 {
        Vec2::new(self.rail + self.width, self.rail + self.height)
    }

    /// Whether a ball centered at `pos` lies fully on the felt
    pub fn holds_ball_at(&self, pos: Vec2) -> bool {
        let lo = self.felt_min() + Vec2::splat(self.ball_radius);
        let hi = self.felt_max() - Vec2::splat(self.ball_radius);
        pos.x >= lo.x && pos.x <= hi.x && pos.y >= lo.y && pos.y <= hi.y
    }

    /// Center-to-center distance at contact
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.ball_radius * 2.0
    }
}

/// Opening layout: cue ball on the head spot plus the 15-ball triangle.
///
/// The apex points toward the cue ball and rows step away from it (X
/// increases per row). Within a row balls are listed top to bottom:
/// ```text
///  1              <- apex (row 0)
///  9  2           <- row 1
///  3  8  4        <- row 2
///  5  6  7 10     <- row 3
/// 11 12 13 14 15  <- row 4
/// ```
pub fn rack(table: &Table, apex: Vec2) -> Vec<Ball> {
    let spacing = table.contact_distance() + RACK_GAP;
    // sqrt(3)/2 for an equilateral triangle
    let row_depth = spacing * 0.866_025_4;

    let mut balls = Vec::with_capacity(RACK_PATTERN.len() + 1);
    balls.push(Ball::new(CUE_BALL, cue_start()));

    let mut pattern = RACK_PATTERN.iter();
    for row in 0..RACK_ROWS {
        let x = apex.x + row as f32 * row_depth;
        let row_top = apex.y - row as f32 * spacing / 2.0;
        for col in 0..=row {
            if let Some(&id) = pattern.next() {
                balls.push(Ball::new(id, Vec2::new(x, row_top + col as f32 * spacing)));
            }
        }
    }

    balls
}
