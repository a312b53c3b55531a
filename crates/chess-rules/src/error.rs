//! Error types for move application and position setup.

use chess_core::{Color, FenError, PieceKind, Square};
use thiserror::Error;

/// Why a move was refused. The board is left untouched whenever one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("coordinate ({file}, {rank}) is off the board")]
    OutOfBounds { file: i8, rank: i8 },

    #[error("no piece of the side to move on {0}")]
    NoPieceOrWrongTurn(Square),

    #[error("the piece on {from} cannot move to {to}")]
    IllegalShape { from: Square, to: Square },

    #[error("move would leave the {0} king in check")]
    LeavesKingInCheck(Color),

    #[error("the king cannot castle out of or through check")]
    CastlesThroughCheck,

    #[error("pawn reaching {0} needs a promotion choice")]
    PromotionRequired(Square),

    #[error("a pawn cannot promote to a {0}")]
    InvalidPromotion(PieceKind),

    #[error("the game is already over")]
    GameOver,
}

/// Errors raised while setting up a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("en passant target {0} does not follow a pawn double step")]
    InvalidEnPassant(Square),

    #[error("{0} is in check although it is not their move")]
    OpponentInCheck(Color),
}
