//! Core types for the rules engine.
//!
//! This crate provides the value types shared across the workspace:
//! - [`PieceKind`], [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for the move log
//! - FEN parsing for position setup

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{CastlingAvailability, FenError, FenPosition};
pub use mov::{Move, MoveFlag};
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
