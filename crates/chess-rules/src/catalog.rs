//! Per-piece movement geometry.
//!
//! Everything here is a pure function of a [`Grid`] snapshot. Whether a move
//! exposes the mover's king, and whose turn it is, are decided by the board.
//! Both squares are assumed to be on the board, which [`Square`] guarantees.

use crate::Grid;
use chess_core::{Piece, PieceKind, Square};

/// Which rook a castling king is heading for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File step of the king (+1 towards h, -1 towards a).
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }

    /// File of the rook this side castles with.
    #[inline]
    pub const fn rook_file(self) -> i8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }
}

/// Returns true if `piece` standing on `from` may move to `to` by its own
/// geometry, including the castling shape for an unmoved king.
///
/// Pawn captures need an enemy on `to`; en passant is not a shape and is
/// recognised by the board, which knows the move history.
pub fn shape_valid(piece: Piece, from: Square, to: Square, grid: &Grid) -> bool {
    if from == to || grid.color_at(to) == Some(piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_shape(piece, from, to, grid),
        PieceKind::King => king_step(from, to) || castle_side(piece, from, to, grid).is_some(),
        _ => attacks(piece, from, to, grid),
    }
}

/// Returns true if `piece` on `from` attacks `to`, whatever stands there.
///
/// This is the capture reach of the piece: pawns attack diagonally forward
/// even onto empty squares, and castling never attacks anything.
pub fn attacks(piece: Piece, from: Square, to: Square, grid: &Grid) -> bool {
    if from == to {
        return false;
    }

    let (df, dr) = delta(from, to);
    match piece.kind {
        PieceKind::Pawn => df.abs() == 1 && dr == piece.color.pawn_direction(),
        PieceKind::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => is_diagonal(df, dr) && path_clear(from, to, grid),
        PieceKind::Rook => is_straight(df, dr) && path_clear(from, to, grid),
        PieceKind::Queen => {
            (is_diagonal(df, dr) || is_straight(df, dr)) && path_clear(from, to, grid)
        }
        PieceKind::King => king_step(from, to),
    }
}

/// Recognises the castling shape: an unmoved king on its home square moving
/// two files along its back rank towards an unmoved rook of its own color in
/// the corner, with every square between king and rook empty.
pub fn castle_side(piece: Piece, from: Square, to: Square, grid: &Grid) -> Option<CastleSide> {
    if piece.kind != PieceKind::King || piece.has_moved {
        return None;
    }
    if from.rank_index() != piece.color.back_rank() as i8 || from.file_index() != 4 {
        return None;
    }

    let side = match delta(from, to) {
        (2, 0) => CastleSide::Kingside,
        (-2, 0) => CastleSide::Queenside,
        _ => return None,
    };

    let rook_sq = Square::from_coords(side.rook_file(), from.rank_index())?;
    match grid.get(rook_sq) {
        Some(rook) if rook.is(PieceKind::Rook, piece.color) && !rook.has_moved => {}
        _ => return None,
    }

    if path_clear(from, rook_sq, grid) {
        Some(side)
    } else {
        None
    }
}

fn pawn_shape(piece: Piece, from: Square, to: Square, grid: &Grid) -> bool {
    let dir = piece.color.pawn_direction();
    let (df, dr) = delta(from, to);

    match (df.abs(), dr) {
        (0, r) if r == dir => grid.is_empty(to),
        (0, r) if r == 2 * dir => {
            // The skipped square must be empty as well; a pawn cannot jump.
            !piece.has_moved
                && from.rank_index() == piece.color.pawn_rank() as i8
                && grid.is_empty(to)
                && from.offset(0, dir).is_some_and(|mid| grid.is_empty(mid))
        }
        (1, r) if r == dir => grid
            .color_at(to)
            .is_some_and(|color| color != piece.color),
        _ => false,
    }
}

#[inline]
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.file_index() - from.file_index(),
        to.rank_index() - from.rank_index(),
    )
}

#[inline]
fn king_step(from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    df.abs().max(dr.abs()) == 1
}

#[inline]
fn is_straight(df: i8, dr: i8) -> bool {
    (df == 0) != (dr == 0)
}

#[inline]
fn is_diagonal(df: i8, dr: i8) -> bool {
    df != 0 && df.abs() == dr.abs()
}

/// Every square strictly between `from` and `to` is empty. The two squares
/// must share a rank, file or diagonal.
fn path_clear(from: Square, to: Square, grid: &Grid) -> bool {
    let (df, dr) = delta(from, to);
    let step = (df.signum(), dr.signum());

    let mut current = from.offset(step.0, step.1);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !grid.is_empty(sq) {
            return false;
        }
        current = sq.offset(step.0, step.1);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn grid_with(pieces: &[(&str, PieceKind, Color)]) -> Grid {
        let mut grid = Grid::empty();
        for &(name, kind, color) in pieces {
            grid.set(sq(name), Some(Piece::new(kind, color)));
        }
        grid
    }

    fn valid(grid: &Grid, from: &str, to: &str) -> bool {
        let piece = grid.get(sq(from)).unwrap();
        shape_valid(piece, sq(from), sq(to), grid)
    }

    #[test]
    fn pawn_single_and_double_step() {
        let grid = Grid::standard();
        assert!(valid(&grid, "e2", "e3"));
        assert!(valid(&grid, "e2", "e4"));
        assert!(!valid(&grid, "e2", "e5"));
        assert!(!valid(&grid, "e2", "d3"));
        assert!(valid(&grid, "d7", "d5"));
        assert!(!valid(&grid, "d7", "d8"));
    }

    #[test]
    fn pawn_double_step_needs_clear_path_and_unmoved_pawn() {
        let mut grid = grid_with(&[
            ("e2", PieceKind::Pawn, Color::White),
            ("e3", PieceKind::Knight, Color::Black),
        ]);
        assert!(!valid(&grid, "e2", "e4"));

        grid.take(sq("e3"));
        assert!(valid(&grid, "e2", "e4"));

        let moved = grid.get(sq("e2")).unwrap().moved();
        grid.set(sq("e2"), Some(moved));
        assert!(!valid(&grid, "e2", "e4"));
    }

    #[test]
    fn pawn_double_step_only_from_starting_rank() {
        let grid = grid_with(&[("e3", PieceKind::Pawn, Color::White)]);
        assert!(!valid(&grid, "e3", "e5"));
    }

    #[test]
    fn pawn_captures_only_enemies_diagonally() {
        let grid = grid_with(&[
            ("e4", PieceKind::Pawn, Color::White),
            ("d5", PieceKind::Pawn, Color::Black),
            ("f5", PieceKind::Knight, Color::White),
            ("e5", PieceKind::Pawn, Color::Black),
        ]);
        assert!(valid(&grid, "e4", "d5"));
        assert!(!valid(&grid, "e4", "f5"));
        assert!(!valid(&grid, "e4", "e5"));
        assert!(!valid(&grid, "d5", "e6"));
        assert!(valid(&grid, "d5", "e4"));
    }

    #[test]
    fn rook_lines_and_blocking() {
        let grid = grid_with(&[
            ("a1", PieceKind::Rook, Color::White),
            ("a5", PieceKind::Pawn, Color::White),
            ("e1", PieceKind::Knight, Color::Black),
        ]);
        assert!(valid(&grid, "a1", "a4"));
        assert!(!valid(&grid, "a1", "a5"));
        assert!(!valid(&grid, "a1", "a6"));
        assert!(valid(&grid, "a1", "e1"));
        assert!(!valid(&grid, "a1", "f1"));
        assert!(!valid(&grid, "a1", "b2"));
    }

    #[test]
    fn knight_jumps() {
        let grid = Grid::standard();
        assert!(valid(&grid, "g1", "f3"));
        assert!(valid(&grid, "g1", "h3"));
        assert!(!valid(&grid, "g1", "e2"));
        assert!(!valid(&grid, "g1", "g3"));
    }

    #[test]
    fn bishop_diagonals() {
        let grid = grid_with(&[
            ("c1", PieceKind::Bishop, Color::White),
            ("e3", PieceKind::Pawn, Color::Black),
        ]);
        assert!(valid(&grid, "c1", "d2"));
        assert!(valid(&grid, "c1", "e3"));
        assert!(!valid(&grid, "c1", "f4"));
        assert!(valid(&grid, "c1", "a3"));
        assert!(!valid(&grid, "c1", "c3"));
    }

    #[test]
    fn queen_is_rook_or_bishop() {
        let grid = grid_with(&[("d4", PieceKind::Queen, Color::White)]);
        assert!(valid(&grid, "d4", "d8"));
        assert!(valid(&grid, "d4", "h4"));
        assert!(valid(&grid, "d4", "a7"));
        assert!(valid(&grid, "d4", "g1"));
        assert!(!valid(&grid, "d4", "e6"));
    }

    #[test]
    fn king_steps_and_own_pieces() {
        let grid = grid_with(&[
            ("e4", PieceKind::King, Color::White),
            ("e5", PieceKind::Pawn, Color::White),
            ("d5", PieceKind::Pawn, Color::Black),
        ]);
        assert!(valid(&grid, "e4", "f5"));
        assert!(valid(&grid, "e4", "d5"));
        assert!(!valid(&grid, "e4", "e5"));
        assert!(!valid(&grid, "e4", "e6"));
        assert!(!valid(&grid, "e4", "e4"));
    }

    #[test]
    fn castling_shape() {
        let grid = grid_with(&[
            ("e1", PieceKind::King, Color::White),
            ("h1", PieceKind::Rook, Color::White),
            ("a1", PieceKind::Rook, Color::White),
            ("b1", PieceKind::Knight, Color::White),
        ]);
        let king = grid.get(Square::E1).unwrap();
        assert_eq!(
            castle_side(king, Square::E1, Square::G1, &grid),
            Some(CastleSide::Kingside)
        );
        assert_eq!(castle_side(king, Square::E1, Square::C1, &grid), None);
        assert!(valid(&grid, "e1", "g1"));
        assert!(!valid(&grid, "e1", "c1"));
    }

    #[test]
    fn castling_needs_unmoved_pieces() {
        let mut grid = grid_with(&[
            ("e8", PieceKind::King, Color::Black),
            ("a8", PieceKind::Rook, Color::Black),
        ]);
        assert!(valid(&grid, "e8", "c8"));

        let rook = grid.get(Square::A8).unwrap().moved();
        grid.set(Square::A8, Some(rook));
        assert!(!valid(&grid, "e8", "c8"));

        let mut grid = grid_with(&[
            ("e8", PieceKind::King, Color::Black),
            ("a8", PieceKind::Rook, Color::White),
        ]);
        assert!(!valid(&grid, "e8", "c8"));
        let king = grid.get(Square::E8).unwrap().moved();
        grid.set(Square::E8, Some(king));
        assert!(!valid(&grid, "e8", "c8"));
    }

    #[test]
    fn castling_only_from_home_square() {
        let grid = grid_with(&[
            ("e4", PieceKind::King, Color::White),
            ("h4", PieceKind::Rook, Color::White),
        ]);
        assert!(!valid(&grid, "e4", "g4"));

        let grid = grid_with(&[
            ("d1", PieceKind::King, Color::White),
            ("h1", PieceKind::Rook, Color::White),
        ]);
        assert!(!valid(&grid, "d1", "f1"));

        let grid = grid_with(&[
            ("e1", PieceKind::King, Color::Black),
            ("h1", PieceKind::Rook, Color::Black),
        ]);
        assert!(!valid(&grid, "e1", "g1"));
    }

    #[test]
    fn pawn_attacks_empty_squares() {
        let grid = grid_with(&[("e4", PieceKind::Pawn, Color::Black)]);
        let pawn = grid.get(sq("e4")).unwrap();
        assert!(attacks(pawn, sq("e4"), sq("d3"), &grid));
        assert!(attacks(pawn, sq("e4"), sq("f3"), &grid));
        assert!(!attacks(pawn, sq("e4"), sq("e3"), &grid));
        assert!(!attacks(pawn, sq("e4"), sq("d5"), &grid));
    }
}
