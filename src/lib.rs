//! Eight Ball - two-player 8-ball billiards
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, rules, shot planning)
//! - `controller`: Phase orchestration, AI delays, render snapshots
//! - `settings`: Data-driven timing and input tuning
//! - `error`: Crate-wide error type

pub mod controller;
pub mod error;
pub mod settings;
pub mod sim;

pub use controller::{GameController, Snapshot};
pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playable felt dimensions (inside the rails)
    pub const TABLE_WIDTH: f32 = 800.0;
    pub const TABLE_HEIGHT: f32 = 400.0;
    /// Rail thickness; the felt starts at (RAIL_WIDTH, RAIL_WIDTH)
    pub const RAIL_WIDTH: f32 = 40.0;
    /// Capture radius around each pocket center
    pub const POCKET_RADIUS: f32 = 20.0;
    /// Side pockets sit this far outside the long rails
    pub const SIDE_POCKET_OFFSET: f32 = 5.0;

    /// Shared by every ball
    pub const BALL_RADIUS: f32 = 10.0;

    /// Velocity retained per tick (felt + air resistance)
    pub const FRICTION: f32 = 0.985;
    /// Speeds below this snap to zero
    pub const STOP_VELOCITY: f32 = 0.05;
    /// Fraction of the normal velocity kept after a rail bounce
    pub const RAIL_RESTITUTION: f32 = 0.8;

    /// Pointer drag distance to cue velocity
    pub const POWER_MULTIPLIER: f32 = 0.15;
    /// Aim preview length per unit of drag
    pub const TRAJECTORY_POWER_MULTIPLIER: f32 = 4.0;

    /// Head spot (cue ball start / default placement), table coordinates
    pub const CUE_START_X: f32 = RAIL_WIDTH + 200.0;
    pub const CUE_START_Y: f32 = RAIL_WIDTH + TABLE_HEIGHT / 2.0;
    /// Foot spot (rack apex), table coordinates
    pub const RACK_APEX_X: f32 = RAIL_WIDTH + 600.0;
    pub const RACK_APEX_Y: f32 = RAIL_WIDTH + TABLE_HEIGHT / 2.0;

    /// Render/simulation frame rate the tick constants are tuned for
    pub const FRAME_RATE: u32 = 60;
}

/// Head spot as a vector
#[inline]
pub fn cue_start() -> Vec2 {
    Vec2::new(consts::CUE_START_X, consts::CUE_START_Y)
}

/// Foot spot as a vector
#[inline]
pub fn rack_apex() -> Vec2 {
    Vec2::new(consts::RACK_APEX_X, consts::RACK_APEX_Y)
}

/// Shortest distance from `p` to the segment `a`-`b`
#[inline]
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq < 0.0001 {
        // Degenerate segment
        return (p - a).length();
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    (p - (a + seg * t)).length()
}
