//! 8-ball rule engine
//!
//! One explicit state machine, judged in one place once every ball has
//! stopped:
//!
//! ```text
//! Aiming -> Moving -> TurnEnd -> Aiming   (legal shot, same or next shooter)
//!                             -> Placing  (foul: incoming shooter has ball in hand)
//!                             -> GameOver (8-ball pocketed)
//! Placing -> Aiming
//! ```

use serde::{Deserialize, Serialize};

use super::state::{
    Ball, BallId, EIGHT_BALL, GamePhase, Group, Groups, Shooter, ShotEvents, TurnState,
    group_remaining,
};

/// Rule violations that hand the opponent ball-in-hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foul {
    /// Cue ball pocketed
    Scratch,
    /// Cue ball never touched an object ball
    NoContact,
    /// First contact was an opposing-group ball
    WrongGroupFirst { ball: BallId },
}

impl Foul {
    fn message(self, incoming: Shooter) -> String {
        match self {
            Foul::Scratch => format!("Scratch! Ball in hand for {}.", incoming.as_str()),
            Foul::NoContact => format!(
                "Foul! No ball hit. Ball in hand for {}.",
                incoming.as_str()
            ),
            Foul::WrongGroupFirst { ball } => format!(
                "Foul! Hit wrong group first ({}). Ball in hand for {}.",
                ball,
                incoming.as_str()
            ),
        }
    }
}

/// Decision taken at TurnEnd
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub next_shooter: Shooter,
    pub next_phase: GamePhase,
    pub next_groups: Groups,
    pub message: String,
    pub foul: Option<Foul>,
    /// Set when the shot ended the game
    pub winner: Option<Shooter>,
}

impl TurnOutcome {
    pub fn is_foul(&self) -> bool {
        self.foul.is_some()
    }
}

impl TurnState {
    /// Commit a TurnEnd decision
    pub fn apply(&mut self, outcome: &TurnOutcome) {
        self.shooter = outcome.next_shooter;
        self.phase = outcome.next_phase;
        self.groups = outcome.next_groups;
        self.message = outcome.message.clone();
        self.winner = outcome.winner;
    }
}

/// Judge a finished shot.
///
/// `balls` is the table after the shot (pocketed balls already removed); it
/// is only read to decide whether the shooter's group is cleared.
pub fn evaluate_turn_end(turn: &TurnState, shot: &ShotEvents, balls: &[Ball]) -> TurnOutcome {
    let shooter = turn.shooter;
    let incoming = shooter.other();
    // Wrong-group contact is judged against the assignment before this shot
    let group = turn.groups.for_shooter(shooter);
    let foul = detect_foul(group, shot);

    if shot.potted_eight() {
        return eight_ball_outcome(turn, group, foul, balls);
    }

    if let Some(foul) = foul {
        log::info!("{} fouled: {:?}", shooter.as_str(), foul);
        return TurnOutcome {
            next_shooter: incoming,
            next_phase: GamePhase::Placing,
            next_groups: turn.groups,
            message: foul.message(incoming),
            foul: Some(foul),
            winner: None,
        };
    }

    // Legal shot: close the table on the first pocketed ball
    let mut groups = turn.groups;
    let mut message = String::new();
    if groups.is_open() {
        if let Some(first) = shot.potted.first().copied().and_then(Group::of) {
            groups.assign(shooter, first);
            log::info!("{} assigned {}", shooter.as_str(), first.as_str());
            message = format!("{} is {}. ", shooter.as_str(), first.as_str());
        }
    }

    let continues = groups.for_shooter(shooter).is_some_and(|own| {
        let potted_own = shot.potted.iter().any(|&id| own.contains(id));
        let potted_other = shot.potted.iter().any(|&id| own.opposite().contains(id));
        potted_own && !potted_other
    });

    let next_shooter = if continues { shooter } else { incoming };
    if continues {
        message.push_str(&format!("{}'s turn (Nice shot!)", shooter.as_str()));
    } else if groups.is_open() {
        message.push_str(&format!("{}'s turn (Table open)", incoming.as_str()));
    } else {
        message.push_str(&format!("Turn over. {}'s turn.", incoming.as_str()));
    }

    TurnOutcome {
        next_shooter,
        next_phase: GamePhase::Aiming,
        next_groups: groups,
        message,
        foul: None,
        winner: None,
    }
}

fn detect_foul(group: Option<Group>, shot: &ShotEvents) -> Option<Foul> {
    if shot.scratch {
        return Some(Foul::Scratch);
    }
    let Some(first_hit) = shot.first_hit else {
        return Some(Foul::NoContact);
    };
    match group {
        Some(own) if first_hit != EIGHT_BALL && !own.contains(first_hit) => {
            Some(Foul::WrongGroupFirst { ball: first_hit })
        }
        _ => None,
    }
}

/// 8-ball went down: the game ends either way
fn eight_ball_outcome(
    turn: &TurnState,
    group: Option<Group>,
    foul: Option<Foul>,
    balls: &[Ball],
) -> TurnOutcome {
    let shooter = turn.shooter;
    let loss_reason = if foul == Some(Foul::Scratch) {
        Some("scratch on the 8")
    } else if group.is_none_or(|own| group_remaining(balls, own) > 0) {
        Some("early 8-ball")
    } else if foul.is_some() {
        Some("foul on the 8")
    } else {
        None
    };

    let (winner, message) = match loss_reason {
        Some(reason) => (
            shooter.other(),
            format!("GAME OVER - {} loses ({})", shooter.as_str(), reason),
        ),
        None => (shooter, format!("GAME OVER - {} wins!", shooter.as_str())),
    };
    log::info!("{}", message);

    TurnOutcome {
        next_shooter: shooter,
        next_phase: GamePhase::GameOver,
        next_groups: turn.groups,
        message,
        foul,
        winner: Some(winner),
    }
}
