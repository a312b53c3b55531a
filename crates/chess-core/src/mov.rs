//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move (no special action).
    Normal = 0,
    /// Pawn double step from its starting rank.
    DoublePush = 1,
    /// King moves two squares towards the h-file rook.
    CastleKingside = 2,
    /// King moves two squares towards the a-file rook.
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn promotion to knight.
    PromoteKnight = 5,
    /// Pawn promotion to bishop.
    PromoteBishop = 6,
    /// Pawn promotion to rook.
    PromoteRook = 7,
    /// Pawn promotion to queen.
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion kind if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteBishop => Some(PieceKind::Bishop),
            MoveFlag::PromoteRook => Some(PieceKind::Rook),
            MoveFlag::PromoteQueen => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Returns the promotion flag for `kind`, or `None` for kinds a pawn
    /// cannot become.
    #[inline]
    pub const fn promote_to(kind: PieceKind) -> Option<MoveFlag> {
        match kind {
            PieceKind::Knight => Some(MoveFlag::PromoteKnight),
            PieceKind::Bishop => Some(MoveFlag::PromoteBishop),
            PieceKind::Rook => Some(MoveFlag::PromoteRook),
            PieceKind::Queen => Some(MoveFlag::PromoteQueen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A move as recorded in the game log.
///
/// Encoded compactly: 6 bits from, 6 bits to, 4 bits flags = 16 bits total.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        let encoded = (from.index() as u16) | ((to.index() as u16) << 6) | ((flag as u16) << 12);
        Move(encoded)
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        match Square::from_index((self.0 & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_index(((self.0 >> 6) & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        match (self.0 >> 12) as u8 {
            1 => MoveFlag::DoublePush,
            2 => MoveFlag::CastleKingside,
            3 => MoveFlag::CastleQueenside,
            4 => MoveFlag::EnPassant,
            5 => MoveFlag::PromoteKnight,
            6 => MoveFlag::PromoteBishop,
            7 => MoveFlag::PromoteRook,
            8 => MoveFlag::PromoteQueen,
            _ => MoveFlag::Normal,
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:?})", self, self.flag())
    }
}

/// Formats as `"e2 e4"`, with a trailing promotion letter (`"e7 e8 q"`).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from(), self.to())?;
        if let Some(kind) = self.flag().promotion_piece() {
            write!(f, " {}", kind.to_fen_char(crate::Color::Black))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_encoding() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::new(e2, e4, MoveFlag::DoublePush);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
        assert_eq!(m.flag(), MoveFlag::DoublePush);
    }

    #[test]
    fn move_encoding_corners() {
        let m = Move::new(Square::H8, Square::A1, MoveFlag::PromoteQueen);
        assert_eq!(m.from(), Square::H8);
        assert_eq!(m.to(), Square::A1);
        assert_eq!(m.flag(), MoveFlag::PromoteQueen);
    }

    #[test]
    fn move_flag_promotion_piece() {
        assert_eq!(MoveFlag::Normal.promotion_piece(), None);
        assert_eq!(MoveFlag::EnPassant.promotion_piece(), None);
        assert_eq!(
            MoveFlag::PromoteKnight.promotion_piece(),
            Some(PieceKind::Knight)
        );
        assert_eq!(
            MoveFlag::PromoteQueen.promotion_piece(),
            Some(PieceKind::Queen)
        );
    }

    #[test]
    fn move_flag_promote_to() {
        for kind in PieceKind::PROMOTIONS {
            let flag = MoveFlag::promote_to(kind).unwrap();
            assert_eq!(flag.promotion_piece(), Some(kind));
        }
        assert_eq!(MoveFlag::promote_to(PieceKind::King), None);
        assert_eq!(MoveFlag::promote_to(PieceKind::Pawn), None);
    }

    #[test]
    fn move_flag_is_castling() {
        assert!(!MoveFlag::Normal.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
        assert!(MoveFlag::CastleKingside.is_castling());
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::PromoteQueen.is_castling());
    }

    #[test]
    fn move_display() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Move::normal(e2, e4).to_string(), "e2 e4");

        let e7 = Square::new(File::E, Rank::R7);
        let promo = Move::new(e7, Square::E8, MoveFlag::PromoteKnight);
        assert_eq!(promo.to_string(), "e7 e8 n");
        assert_eq!(format!("{:?}", promo), "Move(e7 e8 n, PromoteKnight)");
    }
}
