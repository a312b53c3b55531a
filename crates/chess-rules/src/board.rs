//! Game state and move application.
//!
//! [`Board`] owns the grid, the side to move, the cached king squares and
//! the move log. Every accepted move goes through the same pipeline:
//!
//! 1. the piece on the start square must belong to the side to move
//! 2. the move must fit the piece's geometry, or be en passant
//! 3. castling may not start in or pass through check
//! 4. the move is replayed on a scratch grid and refused if it leaves the
//!    mover's king attacked
//! 5. a pawn reaching its last rank needs a promotion choice
//! 6. the move is committed, the turn flips and the game-end detectors run
//!
//! A refused move never changes the board.

use crate::special::MovePlan;
use crate::{Applied, GameOutcome, Grid, MoveError, MoveResult, SetupError, Snapshot};
use chess_core::{Color, FenPosition, Move, MoveFlag, Piece, PieceKind, Square};
use tracing::{debug, info};

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: Grid,
    pub(crate) turn: Color,
    /// King squares indexed by [`Color::index`]; updated on every king move.
    pub(crate) kings: [Square; 2],
    pub(crate) history: Vec<Move>,
    pub(crate) last_move: Option<Move>,
    pub(crate) outcome: Option<GameOutcome>,
}

/// Starts a new game from the standard position.
pub fn new_game() -> Board {
    Board::new()
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates the standard starting position with White to move.
    pub fn new() -> Self {
        Board {
            grid: Grid::standard(),
            turn: Color::White,
            kings: [Square::E1, Square::E8],
            history: Vec::new(),
            last_move: None,
            outcome: None,
        }
    }

    /// Sets up a game from an arbitrary grid.
    ///
    /// Each color needs exactly one king, and the side not to move may not
    /// be in check. Pawns, kings and rooks standing off their home squares
    /// count as moved. If the side to move is already mated or stalemated
    /// the board starts out finished.
    pub fn from_grid(grid: Grid, turn: Color) -> Result<Self, SetupError> {
        Self::setup(grid, turn, None)
    }

    /// Sets up a game from a FEN string.
    ///
    /// Castling availability is mapped onto the `has_moved` flags of kings
    /// and rooks. An en passant target becomes the double step that
    /// produced it, so the capture is available on the first move.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let fen = FenPosition::parse(fen)?;
        let turn = fen.side_to_move;

        let mut grid = Grid::empty();
        for &(sq, kind, color) in &fen.placement {
            let may_castle = match kind {
                PieceKind::King => fen.castling.kingside(color) || fen.castling.queenside(color),
                PieceKind::Rook if sq.file_index() == 7 => fen.castling.kingside(color),
                PieceKind::Rook if sq.file_index() == 0 => fen.castling.queenside(color),
                PieceKind::Rook => false,
                _ => true,
            };
            let piece = Piece::new(kind, color);
            grid.set(sq, Some(if may_castle { piece } else { piece.moved() }));
        }

        let last_move = match fen.en_passant {
            Some(target) => Some(Self::double_step_through(&grid, target, turn.opposite())?),
            None => None,
        };

        Self::setup(grid, turn, last_move)
    }

    /// Reconstructs the double step by `pawn_color` that skipped `target`.
    fn double_step_through(
        grid: &Grid,
        target: Square,
        pawn_color: Color,
    ) -> Result<Move, SetupError> {
        let dir = pawn_color.pawn_direction();
        let invalid = SetupError::InvalidEnPassant(target);

        let skipped_rank = pawn_color.pawn_rank() as i8 + dir;
        if target.rank_index() != skipped_rank {
            return Err(invalid);
        }

        let from = target.offset(0, -dir).ok_or_else(|| invalid.clone())?;
        let to = target.offset(0, dir).ok_or_else(|| invalid.clone())?;
        let pawn_landed = grid
            .get(to)
            .is_some_and(|p| p.is(PieceKind::Pawn, pawn_color));

        if pawn_landed && grid.is_empty(target) && grid.is_empty(from) {
            Ok(Move::new(from, to, MoveFlag::DoublePush))
        } else {
            Err(invalid)
        }
    }

    /// Flags pawns, kings and rooks away from their starting squares as
    /// moved.
    fn settle(grid: &mut Grid) {
        for sq in Square::all() {
            match grid.get(sq) {
                Some(piece) if piece.kind.tracks_moved() && !on_home_square(piece, sq) => {
                    grid.set(sq, Some(piece.moved()));
                }
                _ => {}
            }
        }
    }

    fn setup(mut grid: Grid, turn: Color, last_move: Option<Move>) -> Result<Self, SetupError> {
        Self::settle(&mut grid);
        let mut kings = [Square::E1, Square::E8];
        for color in Color::BOTH {
            match grid.find_kings(color).as_slice() {
                [king] => kings[color.index()] = *king,
                found => {
                    return Err(SetupError::KingCount {
                        color,
                        count: found.len(),
                    })
                }
            }
        }

        let mut board = Board {
            grid,
            turn,
            kings,
            history: Vec::new(),
            last_move,
            outcome: None,
        };

        if board.in_check(turn.opposite()) {
            return Err(SetupError::OpponentInCheck(turn.opposite()));
        }

        board.outcome = board.detect_outcome(board.in_check(turn));
        Ok(board)
    }

    /// Returns the side to move.
    #[inline]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid.get(sq)
    }

    /// Returns the current grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the read-only view used for rendering.
    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    /// Returns the square of the king of `color`.
    #[inline]
    pub fn king_position(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Returns every accepted move, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns how the game ended, or `None` while it is still running.
    pub fn is_game_over(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Returns true if the side to move may play `from` → `to`.
    ///
    /// Promotion moves count as legal; the choice is only needed to apply
    /// them.
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.outcome.is_none() && self.legal_plan(self.turn, from, to).is_ok()
    }

    /// Lists every legal move of the side to move. Promotions appear once
    /// per promotion kind.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.outcome.is_some() {
            return moves;
        }

        for (from, _) in self.grid.pieces_of(self.turn) {
            for to in Square::all() {
                let Ok(plan) = self.legal_plan(self.turn, from, to) else {
                    continue;
                };
                if plan.promotes() {
                    moves.extend(
                        PieceKind::PROMOTIONS
                            .into_iter()
                            .filter_map(|kind| plan.promote_to(kind).ok())
                            .map(MovePlan::to_move),
                    );
                } else {
                    moves.push(plan.to_move());
                }
            }
        }
        moves
    }

    /// Applies a move for the side to move.
    ///
    /// `promotion` is only read when a pawn reaches its last rank; if it is
    /// missing the move is refused with [`MoveError::PromotionRequired`] and
    /// can be resubmitted with a choice.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveResult {
        let result = self.try_apply(from, to, promotion);
        if let Err(err) = &result {
            debug!(%from, %to, turn = %self.turn, %err, "move rejected");
        }
        result
    }

    /// Applies a move given as raw `(file, rank)` pairs, refusing
    /// coordinates off the board with [`MoveError::OutOfBounds`].
    pub fn apply_coords(
        &mut self,
        from: (i8, i8),
        to: (i8, i8),
        promotion: Option<PieceKind>,
    ) -> MoveResult {
        let square = |(file, rank): (i8, i8)| {
            Square::from_coords(file, rank).ok_or(MoveError::OutOfBounds { file, rank })
        };
        let from = square(from)?;
        let to = square(to)?;
        self.apply_move(from, to, promotion)
    }

    fn try_apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveResult {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }

        let mut plan = self.legal_plan(self.turn, from, to)?;
        if plan.promotes() {
            let kind = promotion.ok_or(MoveError::PromotionRequired(to))?;
            plan = plan.promote_to(kind)?;
        }
        Ok(self.commit(plan))
    }

    fn commit(&mut self, plan: MovePlan) -> Applied {
        let mover = plan.piece.color;
        plan.apply(&mut self.grid);
        if plan.piece.kind == PieceKind::King {
            self.kings[mover.index()] = plan.to;
        }

        let mov = plan.to_move();
        self.history.push(mov);
        self.last_move = Some(mov);
        self.turn = mover.opposite();

        let check = self.in_check(self.turn);
        let game_over = self.detect_outcome(check);
        self.outcome = game_over;

        debug!(%mov, %mover, check, "move applied");
        if let Some(outcome) = game_over {
            info!(%outcome, plies = self.history.len(), "game over");
        }

        Applied {
            mov,
            piece: plan.piece,
            captured: plan.captured.map(|(_, piece)| piece),
            check,
            game_over,
        }
    }

    fn detect_outcome(&self, check: bool) -> Option<GameOutcome> {
        if self.has_legal_move(self.turn) {
            None
        } else if check {
            Some(GameOutcome::Checkmate {
                winner: self.turn.opposite(),
            })
        } else {
            Some(GameOutcome::Stalemate)
        }
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> Result<GameOutcome, MoveError> {
        self.finish(GameOutcome::Resignation {
            winner: self.turn.opposite(),
        })
    }

    /// Ends the game as a draw both players agreed to.
    pub fn agree_draw(&mut self) -> Result<GameOutcome, MoveError> {
        self.finish(GameOutcome::DrawByAgreement)
    }

    fn finish(&mut self, outcome: GameOutcome) -> Result<GameOutcome, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        info!(%outcome, plies = self.history.len(), "game over");
        self.outcome = Some(outcome);
        Ok(outcome)
    }
}

/// Returns true if `piece` stands where it starts a standard game.
fn on_home_square(piece: Piece, sq: Square) -> bool {
    let back_rank = sq.rank_index() == piece.color.back_rank() as i8;
    match piece.kind {
        PieceKind::Pawn => sq.rank_index() == piece.color.pawn_rank() as i8,
        PieceKind::King => back_rank && sq.file_index() == 4,
        PieceKind::Rook => back_rank && matches!(sq.file_index(), 0 | 7),
        _ => true,
    }
}
