//! Parsing of player input lines.
//!
//! Squares are read as a file letter followed by a rank number. Coordinates
//! are passed to the board unchecked, so `i9` reaches the rules engine and is
//! refused there as off the board.

use chess_core::PieceKind;
use thiserror::Error;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move from one `(file, rank)` pair to another, with an optional
    /// promotion choice.
    Move {
        from: (i8, i8),
        to: (i8, i8),
        promotion: Option<PieceKind>,
    },
    /// List the legal moves of the side to move.
    Moves,
    /// Offer a draw to the opponent.
    Draw,
    Resign,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,
    #[error("cannot read square '{0}', expected a file letter and a rank number like e2")]
    BadSquare(String),
    #[error("unknown promotion piece '{0}', expected q, r, b or n")]
    BadPromotion(String),
    #[error("unrecognised input '{0}', type help for the list of commands")]
    Unrecognised(String),
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  e2 e4      move a piece (e2e4 also works)
  e7 e8 q    move and promote (q, r, b or n)
  moves      list legal moves
  draw       offer a draw
  resign     give up the game
  help       show this text
  quit       leave without finishing";

/// Parses one input line.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let lowered = line.trim().to_ascii_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    match tokens.as_slice() {
        [] => Err(InputError::Empty),
        ["moves"] => Ok(Command::Moves),
        ["draw"] => Ok(Command::Draw),
        ["resign"] => Ok(Command::Resign),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        [joined] if joined.len() >= 4 && joined.is_ascii() => {
            let split = split_joined(joined)
                .ok_or_else(|| InputError::Unrecognised(line.trim().to_string()))?;
            move_command(split.0, split.1, split.2)
        }
        [from, to] => move_command(from, to, None),
        [from, to, promo] => move_command(from, to, Some(*promo)),
        _ => Err(InputError::Unrecognised(line.trim().to_string())),
    }
}

/// Splits `e2e4` or `e7e8q` at the second file letter.
fn split_joined(joined: &str) -> Option<(&str, &str, Option<&str>)> {
    let second = joined
        .char_indices()
        .skip(1)
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map(|(i, _)| i)?;
    let (from, rest) = joined.split_at(second);
    if from.len() < 2 || !from[1..].chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = rest[1..].chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let (to, promo) = rest.split_at(1 + digits);
    Some((from, to, (!promo.is_empty()).then_some(promo)))
}

fn move_command(from: &str, to: &str, promo: Option<&str>) -> Result<Command, InputError> {
    Ok(Command::Move {
        from: parse_square(from)?,
        to: parse_square(to)?,
        promotion: promo.map(parse_promotion).transpose()?,
    })
}

/// Reads `e4` as `(4, 3)`. Letters past `h` and ranks past 8 are kept so the
/// board can report them.
pub fn parse_square(text: &str) -> Result<(i8, i8), InputError> {
    let bad = || InputError::BadSquare(text.to_string());
    let mut chars = text.chars();
    let file = chars.next().filter(|c| c.is_ascii_lowercase()).ok_or_else(bad)?;
    let rank: i8 = chars.as_str().parse().map_err(|_| bad())?;
    let rank = rank.checked_sub(1).ok_or_else(bad)?;
    Ok(((file as u8 - b'a') as i8, rank))
}

/// Reads a promotion choice: `q`, `r`, `b`, `n` or the full piece name.
pub fn parse_promotion(text: &str) -> Result<PieceKind, InputError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "q" | "queen" => Ok(PieceKind::Queen),
        "r" | "rook" => Ok(PieceKind::Rook),
        "b" | "bishop" => Ok(PieceKind::Bishop),
        "n" | "knight" => Ok(PieceKind::Knight),
        other => Err(InputError::BadPromotion(other.to_string())),
    }
}
