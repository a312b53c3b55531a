//! The 8×8 grid of optional pieces.

use chess_core::{Color, Piece, PieceKind, Square};

/// Read-only view of the board handed to renderers: `[rank][file]`, rank 0
/// being White's back rank.
pub type Snapshot = [[Option<(PieceKind, Color)>; 8]; 8];

/// Piece occupancy of all 64 squares.
///
/// `Grid` is `Copy`, so legality checks simulate a move on a scratch copy
/// and the live board is only touched when a move is committed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    squares: [Option<Piece>; 64],
}

impl Grid {
    /// An empty grid.
    pub const fn empty() -> Self {
        Grid {
            squares: [None; 64],
        }
    }

    /// The standard starting layout.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut grid = Grid::empty();
        for color in Color::BOTH {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                let file = file as i8;
                if let Some(sq) = Square::from_coords(file, color.back_rank() as i8) {
                    grid.set(sq, Some(Piece::new(kind, color)));
                }
                if let Some(sq) = Square::from_coords(file, color.pawn_rank() as i8) {
                    grid.set(sq, Some(Piece::new(PieceKind::Pawn, color)));
                }
            }
        }
        grid
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Replaces the contents of `sq`.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index() as usize] = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Returns the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    /// Iterates over every occupied square.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Scans for the kings of `color`.
    ///
    /// Only used when a board is set up; during play king squares are cached.
    pub fn find_kings(&self, color: Color) -> Vec<Square> {
        self.pieces_of(color)
            .filter(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Builds the renderer view of this grid.
    pub fn snapshot(&self) -> Snapshot {
        let mut view: Snapshot = [[None; 8]; 8];
        for (sq, piece) in self.occupied() {
            view[sq.rank_index() as usize][sq.file_index() as usize] =
                Some((piece.kind, piece.color));
        }
        view
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = Square::from_coords(file, rank)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', |p| p.to_fen_char());
                write!(f, "{}", c)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}
