//! FEN (Forsyth-Edwards Notation) position setup.
//!
//! Only the fields that describe the board are kept: piece placement, side to
//! move, castling availability and the en passant target. The two move
//! counters may be present and are validated, but the engine does not track
//! them.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidMoveCounter(String),
}

/// Which castles the FEN still allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingAvailability {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingAvailability {
    pub const ALL: CastlingAvailability = CastlingAvailability {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    /// Returns true if `color` may still castle on the kingside.
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    /// Returns true if `color` may still castle on the queenside.
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }
}

/// A parsed FEN position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenPosition {
    /// Occupied squares, a1 first.
    pub placement: Vec<(Square, PieceKind, Color)>,
    pub side_to_move: Color,
    pub castling: CastlingAvailability,
    /// Square a pawn skipped over on the last move, if any.
    pub en_passant: Option<Square>,
}

impl FenPosition {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 4 && parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let placement = Self::parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;
        let en_passant = Self::parse_en_passant(parts[3])?;

        for counter in parts.iter().skip(4) {
            counter
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter(counter.to_string()))?;
        }

        Ok(FenPosition {
            placement,
            side_to_move,
            castling,
            en_passant,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<(Square, PieceKind, Color)>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::new();
        // FEN lists rank 8 first.
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file = 0i8;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as i8;
                    if file > 8 {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "rank {} is too long",
                            rank + 1
                        )));
                    }
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let sq = Square::from_coords(file, rank).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!("rank {} is too long", rank + 1))
                    })?;
                    pieces.push((sq, kind, color));
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        pieces.sort_by_key(|(sq, _, _)| *sq);
        Ok(pieces)
    }

    fn parse_castling(castling: &str) -> Result<CastlingAvailability, FenError> {
        let mut rights = CastlingAvailability::default();
        if castling == "-" {
            return Ok(rights);
        }

        for c in castling.chars() {
            match c {
                'K' => rights.white_kingside = true,
                'Q' => rights.white_queenside = true,
                'k' => rights.black_kingside = true,
                'q' => rights.black_queenside = true,
                other => {
                    return Err(FenError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        other
                    )))
                }
            }
        }

        Ok(rights)
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            Some(sq) if sq.rank_index() == 2 || sq.rank_index() == 5 => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }

    /// Returns the piece at `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self.placement
            .iter()
            .find(|(s, _, _)| *s == sq)
            .map(|&(_, kind, color)| (kind, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenPosition::parse(FenPosition::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingAvailability::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.placement.len(), 32);
        assert_eq!(
            fen.piece_at(Square::E1),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(
            fen.piece_at(Square::D8),
            Some((PieceKind::Queen, Color::Black))
        );
    }

    #[test]
    fn counters_are_optional() {
        let fen = FenPosition::parse("7k/5Q2/6K1/8/8/8/8/8 b -").unwrap_err();
        assert_eq!(fen, FenError::InvalidPartCount(3));

        let fen = FenPosition::parse("7k/5Q2/6K1/8/8/8/8/8 b - -").unwrap();
        assert_eq!(fen.side_to_move, Color::Black);
        assert_eq!(fen.placement.len(), 3);
    }

    #[test]
    fn en_passant_target() {
        let fen = FenPosition::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(fen.en_passant, Square::from_algebraic("e3"));

        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w - x3 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn partial_castling() {
        let fen = FenPosition::parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert!(fen.castling.kingside(Color::White));
        assert!(!fen.castling.queenside(Color::White));
        assert!(!fen.castling.kingside(Color::Black));
        assert!(fen.castling.queenside(Color::Black));
    }

    #[test]
    fn invalid_placement() {
        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenPosition::parse("7/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_fields() {
        assert!(matches!(
            FenPosition::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            FenPosition::parse("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidMoveCounter(_))
        ));
    }

    #[test]
    fn error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(err.to_string().contains('3'));

        let err = FenError::InvalidActiveColor("x".to_string());
        assert!(err.to_string().contains("'x'"));
    }
}
