//! Check, checkmate and stalemate detection.

use crate::{catalog, Board, Grid};
use chess_core::{Color, Square};

/// Returns true if any piece of color `by` attacks `target` on `grid`.
pub fn square_attacked(grid: &Grid, target: Square, by: Color) -> bool {
    grid.pieces_of(by)
        .any(|(from, piece)| catalog::attacks(piece, from, target, grid))
}

impl Board {
    /// Returns true if the king of `color` is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        square_attacked(&self.grid, self.king_position(color), color.opposite())
    }

    /// Returns true if `color` is in check and no move gets it out.
    pub fn in_checkmate(&self, color: Color) -> bool {
        self.in_check(color) && !self.has_legal_move(color)
    }

    /// Returns true if `color` is not in check but has no legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.in_check(color) && !self.has_legal_move(color)
    }

    /// Tries every piece of `color` against every square and stops at the
    /// first move that leaves its king safe.
    ///
    /// Each candidate is simulated on a copy of the grid, so the board
    /// itself is never modified by the search.
    pub(crate) fn has_legal_move(&self, color: Color) -> bool {
        self.grid.pieces_of(color).any(|(from, _)| {
            Square::all().any(|to| self.legal_plan(color, from, to).is_ok())
        })
    }
}
