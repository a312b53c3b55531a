//! Move planning: ordinary moves plus castling, en passant and promotion.
//!
//! A [`MovePlan`] lists every square a move touches, so the same plan can be
//! replayed on a scratch grid for the legality check and then on the live
//! grid when the move is committed.

use crate::catalog::{self, CastleSide};
use crate::detector::square_attacked;
use crate::{Grid, MoveError};
use chess_core::{Move, MoveFlag, Piece, PieceKind, Square};

/// All board edits one move performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MovePlan {
    pub from: Square,
    pub to: Square,
    /// The moving piece before the move.
    pub piece: Piece,
    pub flag: MoveFlag,
    /// Captured piece and the square it is removed from. For en passant this
    /// is not `to`.
    pub captured: Option<(Square, Piece)>,
    /// Rook relocation for castling.
    pub rook: Option<(Square, Square)>,
}

impl MovePlan {
    /// Returns true if the moving pawn reaches its last rank.
    pub fn promotes(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.to.rank_index() == self.piece.color.promotion_rank() as i8
    }

    /// Attaches a promotion choice. Kings and pawns are refused so promotion
    /// can never add a second king.
    pub fn promote_to(self, kind: PieceKind) -> Result<Self, MoveError> {
        let flag = MoveFlag::promote_to(kind).ok_or(MoveError::InvalidPromotion(kind))?;
        Ok(MovePlan { flag, ..self })
    }

    /// The history record for this move.
    pub fn to_move(self) -> Move {
        Move::new(self.from, self.to, self.flag)
    }

    /// Performs the move on `grid`, marking every moved piece as moved.
    pub fn apply(&self, grid: &mut Grid) {
        if let Some((sq, _)) = self.captured {
            grid.take(sq);
        }

        let mut placed = self.piece.moved();
        if let Some(kind) = self.flag.promotion_piece() {
            placed.kind = kind;
        }
        grid.take(self.from);
        grid.set(self.to, Some(placed));

        if let Some((rook_from, rook_to)) = self.rook {
            if let Some(rook) = grid.take(rook_from) {
                grid.set(rook_to, Some(rook.moved()));
            }
        }
    }
}

/// Builds the plan for `piece` moving `from` → `to`, checking geometry and
/// the special-move preconditions but not king safety.
pub(crate) fn plan_move(
    grid: &Grid,
    last_move: Option<Move>,
    piece: Piece,
    from: Square,
    to: Square,
) -> Result<MovePlan, MoveError> {
    if let Some(victim) = en_passant_victim(grid, last_move, piece, from, to) {
        return Ok(MovePlan {
            from,
            to,
            piece,
            flag: MoveFlag::EnPassant,
            captured: Some(victim),
            rook: None,
        });
    }

    if !catalog::shape_valid(piece, from, to, grid) {
        return Err(MoveError::IllegalShape { from, to });
    }

    let mut plan = MovePlan {
        from,
        to,
        piece,
        flag: MoveFlag::Normal,
        captured: grid.get(to).map(|victim| (to, victim)),
        rook: None,
    };

    match piece.kind {
        PieceKind::King => {
            if let Some(side) = catalog::castle_side(piece, from, to, grid) {
                plan.flag = match side {
                    CastleSide::Kingside => MoveFlag::CastleKingside,
                    CastleSide::Queenside => MoveFlag::CastleQueenside,
                };
                plan.rook = castle_rook_move(from, side);
            }
        }
        PieceKind::Pawn if (to.rank_index() - from.rank_index()).abs() == 2 => {
            plan.flag = MoveFlag::DoublePush;
        }
        _ => {}
    }

    Ok(plan)
}

/// Rook squares for a castle: from its corner to the square the king passes.
fn castle_rook_move(king_from: Square, side: CastleSide) -> Option<(Square, Square)> {
    let rook_from = Square::from_coords(side.rook_file(), king_from.rank_index())?;
    let rook_to = king_from.offset(side.direction(), 0)?;
    Some((rook_from, rook_to))
}

/// Returns true if a castling king starts in check or crosses an attacked
/// square. The landing square is left to the ordinary king-safety check.
pub(crate) fn castles_through_check(grid: &Grid, plan: &MovePlan) -> bool {
    let Some((_, passed)) = plan.rook else {
        return false;
    };
    let enemy = plan.piece.color.opposite();
    square_attacked(grid, plan.from, enemy) || square_attacked(grid, passed, enemy)
}

/// Recognises an en passant capture and returns the pawn it removes.
///
/// The mover must be a pawn stepping diagonally forward onto an empty
/// square, and the previous move must have been an enemy pawn's double step
/// landing beside it, on the mover's rank and the destination file.
fn en_passant_victim(
    grid: &Grid,
    last_move: Option<Move>,
    piece: Piece,
    from: Square,
    to: Square,
) -> Option<(Square, Piece)> {
    if piece.kind != PieceKind::Pawn || !grid.is_empty(to) {
        return None;
    }

    let df = to.file_index() - from.file_index();
    let dr = to.rank_index() - from.rank_index();
    if df.abs() != 1 || dr != piece.color.pawn_direction() {
        return None;
    }

    let last = last_move?;
    let passed = Square::from_coords(to.file_index(), from.rank_index())?;
    if last.flag() != MoveFlag::DoublePush || last.to() != passed {
        return None;
    }

    match grid.get(passed) {
        Some(victim) if victim.is(PieceKind::Pawn, piece.color.opposite()) => {
            Some((passed, victim))
        }
        _ => None,
    }
}
