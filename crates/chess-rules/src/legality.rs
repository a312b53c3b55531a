//! The legality filter: a shape-valid move must not leave the mover's own
//! king attacked.

use crate::detector::square_attacked;
use crate::special::{self, MovePlan};
use crate::{Board, MoveError};
use chess_core::{Color, PieceKind, Square};

impl Board {
    /// Plans `from` → `to` for `color` and runs every legality check except
    /// the promotion choice.
    pub(crate) fn legal_plan(
        &self,
        color: Color,
        from: Square,
        to: Square,
    ) -> Result<MovePlan, MoveError> {
        let piece = match self.grid.get(from) {
            Some(piece) if piece.color == color => piece,
            _ => return Err(MoveError::NoPieceOrWrongTurn(from)),
        };

        let plan = special::plan_move(&self.grid, self.last_move, piece, from, to)?;

        if special::castles_through_check(&self.grid, &plan) {
            return Err(MoveError::CastlesThroughCheck);
        }
        if !self.safe_after(&plan) {
            return Err(MoveError::LeavesKingInCheck(color));
        }
        Ok(plan)
    }

    /// Replays `plan` on a scratch copy of the grid and reports whether the
    /// mover's king is safe afterwards.
    fn safe_after(&self, plan: &MovePlan) -> bool {
        let mut scratch = self.grid;
        plan.apply(&mut scratch);

        let color = plan.piece.color;
        let king = if plan.piece.kind == PieceKind::King {
            plan.to
        } else {
            self.king_position(color)
        };
        !square_attacked(&scratch, king, color.opposite())
    }
}
