//! Text rendering of a board snapshot.

use chess_core::{Color, PieceKind};
use chess_rules::Snapshot;

/// How the board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub unicode: bool,
    pub coordinates: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            unicode: false,
            coordinates: true,
        }
    }
}

fn glyph(kind: PieceKind, color: Color, unicode: bool) -> char {
    if !unicode {
        return kind.to_fen_char(color);
    }
    match (color, kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

/// Draws the board with rank 8 at the top. Empty squares are `.`.
pub fn render(snapshot: &Snapshot, options: RenderOptions) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        if options.coordinates {
            out.push_str(&format!("{} ", rank + 1));
        }
        let row: Vec<String> = snapshot[rank]
            .iter()
            .map(|square| match square {
                Some((kind, color)) => glyph(*kind, *color, options.unicode).to_string(),
                None => ".".to_string(),
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    if options.coordinates {
        out.push_str("  a b c d e f g h\n");
    }
    out
}
