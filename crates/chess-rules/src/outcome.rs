//! Results of applying a move and terminal game states.

use crate::MoveError;
use chess_core::{Color, Move, Piece};
use std::fmt;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The side to move is in check and has no legal move.
    Checkmate { winner: Color },
    /// The side to move is not in check and has no legal move.
    Stalemate,
    /// A player gave up.
    Resignation { winner: Color },
    /// Both players agreed to a draw.
    DrawByAgreement,
}

impl GameOutcome {
    /// Returns the winning color, or `None` for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::Resignation { winner } => {
                Some(winner)
            }
            GameOutcome::Stalemate | GameOutcome::DrawByAgreement => None,
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameOutcome::Stalemate => write!(f, "stalemate, draw"),
            GameOutcome::Resignation { winner } => {
                write!(f, "{} resigned, {} wins", winner.opposite(), winner)
            }
            GameOutcome::DrawByAgreement => write!(f, "draw by agreement"),
        }
    }
}

/// What an accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    /// The move as recorded in the history.
    pub mov: Move,
    /// The moving piece as it stood before the move.
    pub piece: Piece,
    /// The piece removed from the board, if any.
    pub captured: Option<Piece>,
    /// Whether the side now to move is in check.
    pub check: bool,
    /// Set when this move ended the game.
    pub game_over: Option<GameOutcome>,
}

/// Result of [`Board::apply_move`](crate::Board::apply_move).
pub type MoveResult = Result<Applied, MoveError>;
