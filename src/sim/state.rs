//! Game state and core simulation types
//!
//! Everything the controller owns between frames lives here.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::table::{Table, rack};
use crate::rack_apex;

/// Ball number: 0 = cue, 1-7 solids, 8 = eight ball, 9-15 stripes
pub type BallId = u8;

pub const CUE_BALL: BallId = 0;
pub const EIGHT_BALL: BallId = 8;

/// Current phase of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Shooter lining up a shot
    Aiming,
    /// Balls in motion, physics stepping every frame
    Moving,
    /// Everything stopped, rule engine about to judge the shot
    TurnEnd,
    /// Ball in hand: incoming shooter must place the cue ball
    Placing,
    /// Someone won; no further transitions
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Aiming => "aiming",
            GamePhase::Moving => "moving",
            GamePhase::TurnEnd => "turn-end",
            GamePhase::Placing => "placing",
            GamePhase::GameOver => "game-over",
        };
        f.write_str(name)
    }
}

/// Who is at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shooter {
    Player,
    Opponent,
}

impl Shooter {
    pub fn other(self) -> Self {
        match self {
            Shooter::Player => Shooter::Opponent,
            Shooter::Opponent => Shooter::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shooter::Player => "Player",
            Shooter::Opponent => "Opponent",
        }
    }
}

/// Ball group a shooter is assigned once the table closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    /// Balls 1-7
    Solids,
    /// Balls 9-15
    Stripes,
}

impl Group {
    /// Group a ball belongs to (None for the cue ball and the 8)
    pub fn of(id: BallId) -> Option<Self> {
        match id {
            1..=7 => Some(Group::Solids),
            9..=15 => Some(Group::Stripes),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Group::Solids => Group::Stripes,
            Group::Stripes => Group::Solids,
        }
    }

    #[inline]
    pub fn contains(self, id: BallId) -> bool {
        Group::of(id) == Some(self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Group::Solids => "SOLIDS",
            Group::Stripes => "STRIPES",
        }
    }
}

/// A ball on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    /// Ball at rest
    pub fn new(id: BallId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
        }
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        self.id == CUE_BALL
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    #[inline]
    pub fn group(&self) -> Option<Group> {
        Group::of(self.id)
    }
}

/// Group assignment. Stored from the player's side; the opponent always
/// holds the complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Groups {
    player: Option<Group>,
}

impl Groups {
    /// Open table
    pub fn open() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.player.is_none()
    }

    pub fn for_shooter(&self, shooter: Shooter) -> Option<Group> {
        match shooter {
            Shooter::Player => self.player,
            Shooter::Opponent => self.player.map(Group::opposite),
        }
    }

    /// Close the table. Has no effect once groups are set.
    pub fn assign(&mut self, shooter: Shooter, group: Group) {
        if self.player.is_some() {
            return;
        }
        self.player = Some(match shooter {
            Shooter::Player => group,
            Shooter::Opponent => group.opposite(),
        });
    }
}

/// What happened during one shot, accumulated tick by tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotEvents {
    /// Object balls pocketed, in capture order
    pub potted: Vec<BallId>,
    /// Cue ball went down
    pub scratch: bool,
    /// First object ball the cue ball touched
    pub first_hit: Option<BallId>,
}

impl ShotEvents {
    /// Clear for a new shot
    pub fn reset(&mut self) {
        self.potted.clear();
        self.scratch = false;
        self.first_hit = None;
    }

    pub fn potted_eight(&self) -> bool {
        self.potted.contains(&EIGHT_BALL)
    }
}

/// Turn-level state, mutated only at phase boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnState {
    pub shooter: Shooter,
    pub phase: GamePhase,
    pub groups: Groups,
    /// Accumulator for the shot in progress
    pub shot: ShotEvents,
    /// HUD message
    pub message: String,
    /// Set when the game is over
    pub winner: Option<Shooter>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            shooter: Shooter::Player,
            phase: GamePhase::Aiming,
            groups: Groups::open(),
            shot: ShotEvents::default(),
            message: "Player's Turn".to_string(),
            winner: None,
        }
    }
}

/// Complete simulation state owned by the game controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub table: Table,
    /// Active balls, sorted by number
    pub balls: Vec<Ball>,
    pub turn: TurnState,
    /// Physics ticks run so far
    pub time_ticks: u64,
}

impl GameState {
    /// Freshly racked game on the standard table
    pub fn new() -> Self {
        Self::with_table(Table::default())
    }

    pub fn with_table(table: Table) -> Self {
        let balls = rack(&table, rack_apex());
        let mut state = Self {
            table,
            balls,
            turn: TurnState::default(),
            time_ticks: 0,
        };
        state.normalize_order();
        state
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.balls.iter().find(|b| b.is_cue())
    }

    pub fn cue_ball_mut(&mut self) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.is_cue())
    }

    /// Ensure balls are sorted by number for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Balls of `group` still on the table
pub fn group_remaining(balls: &[Ball], group: Group) -> usize {
    balls.iter().filter(|b| group.contains(b.id)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_of() {
        assert_eq!(Group::of(CUE_BALL), None);
        assert_eq!(Group::of(EIGHT_BALL), None);
        assert_eq!(Group::of(1), Some(Group::Solids));
        assert_eq!(Group::of(7), Some(Group::Solids));
        assert_eq!(Group::of(9), Some(Group::Stripes));
        assert_eq!(Group::of(15), Some(Group::Stripes));
        assert_eq!(Group::of(16), None);
    }

    #[test]
    fn test_groups_are_complementary() {
        let mut groups = Groups::open();
        assert!(groups.is_open());
        assert_eq!(groups.for_shooter(Shooter::Player), None);

        groups.assign(Shooter::Opponent, Group::Solids);
        assert_eq!(groups.for_shooter(Shooter::Opponent), Some(Group::Solids));
        assert_eq!(groups.for_shooter(Shooter::Player), Some(Group::Stripes));
    }

    #[test]
    fn test_groups_assign_once() {
        let mut groups = Groups::open();
        groups.assign(Shooter::Player, Group::Stripes);
        groups.assign(Shooter::Player, Group::Solids);
        groups.assign(Shooter::Opponent, Group::Stripes);
        assert_eq!(groups.for_shooter(Shooter::Player), Some(Group::Stripes));
        assert_eq!(groups.for_shooter(Shooter::Opponent), Some(Group::Solids));
    }

    #[test]
    fn test_new_game_is_racked() {
        let state = GameState::new();
        assert_eq!(state.balls.len(), 16);
        assert!(state.cue_ball().is_some());
        assert!(state.balls.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(state.turn.phase, GamePhase::Aiming);
        assert_eq!(state.turn.shooter, Shooter::Player);
        assert_eq!(group_remaining(&state.balls, Group::Solids), 7);
        assert_eq!(group_remaining(&state.balls, Group::Stripes), 7);
    }

    #[test]
    fn test_shot_events_reset() {
        let mut shot = ShotEvents {
            potted: vec![3, 8],
            scratch: true,
            first_hit: Some(3),
        };
        assert!(shot.potted_eight());
        shot.reset();
        assert_eq!(shot, ShotEvents::default());
    }
}
