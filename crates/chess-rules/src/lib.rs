//! Rules engine for two-player chess.
//!
//! This crate provides:
//! - [`Board`] - game state, move application and game-end detection
//! - [`Grid`] - the 8×8 occupancy grid and its render [`Snapshot`]
//! - [`catalog`] - per-piece movement geometry
//! - [`MoveError`] / [`SetupError`] - why a move or a position was refused
//!
//! The engine answers whether a move is legal and what it did; it never
//! chooses moves, parses notation or talks to a terminal.
//!
//! # Architecture
//!
//! A move is first checked against the moving piece's geometry, then
//! planned (castling, en passant and promotion add board edits), then
//! replayed on a scratch copy of the grid to make sure the mover's king is
//! not left attacked. Only then is it committed to the live board.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, PieceKind, Square};
//! use chess_rules::{new_game, GameOutcome};
//!
//! let mut board = new_game();
//! let sq = |s: &str| Square::from_algebraic(s).unwrap();
//!
//! board.apply_move(sq("f2"), sq("f3"), None).unwrap();
//! board.apply_move(sq("e7"), sq("e5"), None).unwrap();
//! board.apply_move(sq("g2"), sq("g4"), None).unwrap();
//! let applied = board.apply_move(sq("d8"), sq("h4"), None).unwrap();
//!
//! assert!(applied.check);
//! assert_eq!(
//!     board.is_game_over(),
//!     Some(GameOutcome::Checkmate { winner: Color::Black })
//! );
//! assert_eq!(board.piece_at(sq("h4")).map(|p| p.kind), Some(PieceKind::Queen));
//! ```

mod board;
pub mod catalog;
mod detector;
mod error;
mod grid;
mod legality;
mod outcome;
mod special;

pub use board::{new_game, Board};
pub use detector::square_attacked;
pub use error::{MoveError, SetupError};
pub use grid::{Grid, Snapshot};
pub use outcome::{Applied, GameOutcome, MoveResult};
