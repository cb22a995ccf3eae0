use thiserror::Error;

use crate::sim::{GamePhase, PlacementError};

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the game controller and settings loader.
///
/// The simulation core itself never fails; these cover input arriving at the
/// wrong time, rejected placements, and configuration I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Input arrived outside the phase that accepts it
    #[error("expected phase {expected}, game is in {actual}")]
    WrongPhase { expected: GamePhase, actual: GamePhase },

    /// The shooter on turn is AI-controlled
    #[error("it is not a human shooter's turn")]
    NotHumanTurn,

    /// The cue ball is not on the table
    #[error("cue ball is not on the table")]
    NoCueBall,

    /// Zero-length drag
    #[error("shot has no direction")]
    ZeroShot,

    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Malformed settings JSON
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
