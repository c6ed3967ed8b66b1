//! Error types for the Kamisado engine
//!
//! Configuration problems (a coloring whose goals cannot be resolved, a bad
//! table size) and boundary-layer rejections (unparseable squares, illegal
//! move requests) are reported through [`KamisadoError`].

use thiserror::Error;

use crate::board::{Color, Move, Player};

/// Errors that can occur in the Kamisado engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KamisadoError {
    /// A home-row color has no matching square on the far home row
    #[error("malformed coloring: no goal square for the {player} {color} tower")]
    GoalNotFound { player: Player, color: Color },

    /// Square text is not a file letter followed by a rank digit
    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),

    /// Move request that is not among the legal moves of the position
    #[error("illegal move {mv} in the current position")]
    IllegalMove { mv: Move },

    /// The game has already been decided
    #[error("game is over, {winner} has won")]
    GameOver { winner: Player },

    /// Rejected engine configuration
    #[error("invalid engine configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, KamisadoError>;
