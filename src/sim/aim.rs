//! Aim line preview for the player's drag
//!
//! Casts the cue ball along the aim direction and reports the first object
//! ball it would touch, where the cue ball would be at that moment, and
//! which way the object ball would leave.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, BallId};
use super::table::Table;
use crate::consts::TRAJECTORY_POWER_MULTIPLIER;

/// What the renderer needs to draw the aim line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AimPreview {
    /// Cue-ball center
    pub origin: Vec2,
    /// Unit aim direction
    pub direction: Vec2,
    /// Cue-ball center at contact, or the end of the line if nothing is hit
    pub end: Vec2,
    /// First ball in the path (within preview range)
    pub target: Option<BallId>,
    /// Departure direction of `target`
    pub target_direction: Option<Vec2>,
}

/// Preview for a drag vector (pointer to cue ball). `None` with no cue ball
/// on the table or a zero-length drag.
pub fn aim_preview(table: &Table, balls: &[Ball], drag: Vec2) -> Option<AimPreview> {
    let cue = balls.iter().find(|b| b.is_cue())?;
    let direction = drag.try_normalize()?;
    let max_distance = drag.length() * TRAJECTORY_POWER_MULTIPLIER;
    let reach = table.contact_distance();
    let reach_sq = reach * reach;

    let mut nearest: Option<(f32, &Ball)> = None;
    for ball in balls.iter().filter(|b| !b.is_cue()) {
        let offset = ball.pos - cue.pos;
        let proj = offset.dot(direction);
        if proj <= 0.0 {
            continue;
        }
        let miss_sq = offset.length_squared() - proj * proj;
        if miss_sq >= reach_sq {
            continue;
        }
        let t = proj - (reach_sq - miss_sq).sqrt();
        if t > 0.0 && nearest.is_none_or(|(best, _)| t < best) {
            nearest = Some((t, ball));
        }
    }

    let hit = nearest.filter(|(t, _)| *t <= max_distance);
    let preview = match hit {
        Some((t, ball)) => {
            let contact = cue.pos + direction * t;
            AimPreview {
                origin: cue.pos,
                direction,
                end: contact,
                target: Some(ball.id),
                target_direction: (ball.pos - contact).try_normalize(),
            }
        }
        None => AimPreview {
            origin: cue.pos,
            direction,
            end: cue.pos + direction * max_distance,
            target: None,
            target_direction: None,
        },
    };
    Some(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CUE_BALL;

    #[test]
    fn test_preview_needs_cue_and_drag() {
        let table = Table::default();
        let balls = vec![Ball::new(1, Vec2::new(400.0, 240.0))];
        assert_eq!(aim_preview(&table, &balls, Vec2::new(10.0, 0.0)), None);

        let balls = vec![Ball::new(CUE_BALL, Vec2::new(200.0, 240.0))];
        assert_eq!(aim_preview(&table, &balls, Vec2::ZERO), None);
    }

    #[test]
    fn test_preview_straight_hit() {
        let table = Table::default();
        let balls = vec![
            Ball::new(CUE_BALL, Vec2::new(200.0, 240.0)),
            Ball::new(5, Vec2::new(300.0, 240.0)),
            Ball::new(9, Vec2::new(400.0, 240.0)),
        ];

        let preview = aim_preview(&table, &balls, Vec2::new(50.0, 0.0));

        assert!(matches!(&preview, Some(p) if p.target == Some(5)));
        if let Some(p) = preview {
            assert!((p.end - Vec2::new(280.0, 240.0)).length() < 0.001);
            assert!(matches!(p.target_direction, Some(d) if (d - Vec2::X).length() < 0.001));
        }
    }

    #[test]
    fn test_preview_cut_direction() {
        let table = Table::default();
        let balls = vec![
            Ball::new(CUE_BALL, Vec2::new(200.0, 240.0)),
            Ball::new(5, Vec2::new(300.0, 250.0)),
        ];

        let preview = aim_preview(&table, &balls, Vec2::new(50.0, 0.0));
        // Object ball is struck on its upper half and leaves downward
        assert!(matches!(preview.and_then(|p| p.target_direction), Some(d) if d.y > 0.0 && d.x > 0.0));
    }

    #[test]
    fn test_preview_out_of_range() {
        let table = Table::default();
        let balls = vec![
            Ball::new(CUE_BALL, Vec2::new(200.0, 240.0)),
            Ball::new(5, Vec2::new(600.0, 240.0)),
        ];

        // Short drag: line length 10 * 4 = 40
        let preview = aim_preview(&table, &balls, Vec2::new(10.0, 0.0));

        assert!(matches!(&preview, Some(p) if p.target.is_none()));
        if let Some(p) = preview {
            assert!((p.end - Vec2::new(240.0, 240.0)).length() < 0.001);
        }
    }

    #[test]
    fn test_preview_ignores_balls_behind() {
        let table = Table::default();
        let balls = vec![
            Ball::new(CUE_BALL, Vec2::new(200.0, 240.0)),
            Ball::new(5, Vec2::new(150.0, 240.0)),
        ];
        let preview = aim_preview(&table, &balls, Vec2::new(50.0, 0.0));
        assert!(matches!(preview, Some(p) if p.target.is_none()));
    }
}
