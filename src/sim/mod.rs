//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame tick only
//! - Stable iteration order (balls sorted by number)
//! - No rendering, clocks or platform dependencies

pub mod aim;
pub mod collision;
pub mod placement;
pub mod planner;
pub mod rules;
pub mod state;
pub mod table;
pub mod tick;

pub use aim::{AimPreview, aim_preview};
pub use collision::{
    CollisionResult, ball_ball_collision, pocket_capture, record_first_contact,
    resolve_ball_collision, resolve_wall_collision,
};
pub use placement::{PlacementError, choose_ai_placement, place_cue_ball, validate_placement};
pub use planner::{legal_targets, plan_shot};
pub use rules::{Foul, TurnOutcome, evaluate_turn_end};
pub use state::{
    Ball, BallId, CUE_BALL, EIGHT_BALL, GamePhase, GameState, Group, Groups, Shooter, ShotEvents,
    TurnState, group_remaining,
};
pub use table::{RACK_PATTERN, Table, rack};
pub use tick::{StepReport, run_until_rest, step};
