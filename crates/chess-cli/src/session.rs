//! The interactive game loop.
//!
//! A [`Session`] reads commands line by line and reports on a writer, so the
//! same loop runs against stdin/stdout or in-memory buffers.

use crate::input::{self, Command, InputError, HELP};
use crate::render::{render, RenderOptions};
use chess_core::{Color, PieceKind};
use chess_rules::{Applied, Board, GameOutcome, MoveError};
use std::io::{self, BufRead, Write};

enum Step {
    Continue { redraw: bool },
    Quit,
}

/// Two players sharing one terminal.
pub struct Session<R: BufRead, W: Write> {
    board: Board,
    reader: R,
    writer: W,
    options: RenderOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(board: Board, reader: R, writer: W, options: RenderOptions) -> Self {
        Self {
            board,
            reader,
            writer,
            options,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays until the game ends, the players quit or input runs out.
    ///
    /// Returns the outcome if the game was finished.
    pub fn run(&mut self) -> io::Result<Option<GameOutcome>> {
        writeln!(self.writer, "type help for the list of commands")?;
        let mut redraw = true;

        loop {
            if let Some(outcome) = self.board.is_game_over() {
                self.show_board()?;
                writeln!(self.writer, "game over: {}", outcome)?;
                let score = match outcome.winner() {
                    Some(Color::White) => "1-0",
                    Some(Color::Black) => "0-1",
                    None => "1/2-1/2",
                };
                writeln!(self.writer, "result: {}", score)?;
                return Ok(Some(outcome));
            }
            if redraw {
                self.show_board()?;
            }

            let turn = self.board.current_turn();
            let Some(line) = self.prompt(&format!("{} to move> ", turn))? else {
                return Ok(None);
            };

            redraw = false;
            match input::parse_command(&line) {
                Err(InputError::Empty) => {}
                Err(err) => writeln!(self.writer, "{}", err)?,
                Ok(command) => match self.execute(command)? {
                    Step::Continue { redraw: again } => redraw = again,
                    Step::Quit => return Ok(None),
                },
            }
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<Step> {
        match command {
            Command::Move {
                from,
                to,
                promotion,
            } => self.play(from, to, promotion),
            Command::Moves => {
                let moves: Vec<String> = self
                    .board
                    .legal_moves()
                    .iter()
                    .map(|mov| mov.to_string())
                    .collect();
                writeln!(self.writer, "{}", moves.join(", "))?;
                Ok(Step::Continue { redraw: false })
            }
            Command::Draw => self.offer_draw(),
            Command::Resign => {
                let result = self.board.resign();
                self.end(result)?;
                Ok(Step::Continue { redraw: false })
            }
            Command::Help => {
                writeln!(self.writer, "{}", HELP)?;
                Ok(Step::Continue { redraw: false })
            }
            Command::Quit => Ok(Step::Quit),
        }
    }

    fn play(
        &mut self,
        from: (i8, i8),
        to: (i8, i8),
        promotion: Option<PieceKind>,
    ) -> io::Result<Step> {
        let result = match self.board.apply_coords(from, to, promotion) {
            Err(MoveError::PromotionRequired(_)) => match self.ask_promotion()? {
                Some(kind) => self.board.apply_coords(from, to, Some(kind)),
                None => return Ok(Step::Quit),
            },
            other => other,
        };

        match result {
            Ok(applied) => {
                self.report(&applied)?;
                Ok(Step::Continue { redraw: true })
            }
            Err(err) => {
                writeln!(self.writer, "illegal move: {}", err)?;
                Ok(Step::Continue { redraw: false })
            }
        }
    }

    fn ask_promotion(&mut self) -> io::Result<Option<PieceKind>> {
        loop {
            let Some(line) = self.prompt("promote to (q/r/b/n)> ")? else {
                return Ok(None);
            };
            match input::parse_promotion(&line) {
                Ok(kind) => return Ok(Some(kind)),
                Err(err) => writeln!(self.writer, "{}", err)?,
            }
        }
    }

    fn offer_draw(&mut self) -> io::Result<Step> {
        let opponent = self.board.current_turn().opposite();
        let Some(answer) = self.prompt(&format!("{}, accept a draw? (y/n)> ", opponent))? else {
            return Ok(Step::Quit);
        };

        if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            let result = self.board.agree_draw();
            self.end(result)?;
        } else {
            writeln!(self.writer, "draw declined")?;
        }
        Ok(Step::Continue { redraw: false })
    }

    fn end(&mut self, result: Result<GameOutcome, MoveError>) -> io::Result<()> {
        if let Err(err) = result {
            writeln!(self.writer, "{}", err)?;
        }
        Ok(())
    }

    fn report(&mut self, applied: &Applied) -> io::Result<()> {
        let flag = applied.mov.flag();
        if flag.is_castling() {
            write!(self.writer, "{} castles", applied.piece.color)?;
        } else {
            write!(self.writer, "{} plays {}", applied.piece, applied.mov)?;
        }
        if let Some(captured) = applied.captured {
            write!(self.writer, ", capturing {}", captured)?;
        }
        if let Some(kind) = flag.promotion_piece() {
            write!(self.writer, ", promoting to {}", kind)?;
        }
        if applied.check && applied.game_over.is_none() {
            write!(self.writer, ", check")?;
        }
        writeln!(self.writer)
    }

    fn show_board(&mut self) -> io::Result<()> {
        let text = render(&self.board.snapshot(), self.options);
        write!(self.writer, "{}", text)
    }

    /// Writes `prompt` and reads one line. `None` means end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;
    use std::io::Cursor;

    fn play(board: Board, script: &str) -> (Option<GameOutcome>, Board, String) {
        let mut output = Vec::new();
        let (outcome, board) = {
            let mut session = Session::new(
                board,
                Cursor::new(script.as_bytes()),
                &mut output,
                RenderOptions::default(),
            );
            let outcome = session.run().unwrap();
            (outcome, session.board().clone())
        };
        (outcome, board, String::from_utf8(output).unwrap())
    }

    #[test]
    fn fools_mate() {
        let (outcome, _, output) = play(chess_rules::new_game(), "f2 f3\ne7e5\ng2 g4\nd8 h4\n");
        assert_eq!(
            outcome,
            Some(GameOutcome::Checkmate {
                winner: Color::Black
            })
        );
        assert!(output.contains("Black Queen plays d8 h4"));
        assert!(output.contains("game over: checkmate, Black wins"));
        assert!(output.contains("result: 0-1"));
    }

    #[test]
    fn illegal_and_off_board_moves_are_reported() {
        let (outcome, board, output) = play(chess_rules::new_game(), "e2 e5\ne9 e4\nbogus\n");
        assert_eq!(outcome, None);
        assert_eq!(board, chess_rules::new_game());
        assert!(output.contains("illegal move: the piece on e2 cannot move to e5"));
        assert!(output.contains("illegal move: coordinate (4, 8) is off the board"));
        assert!(output.contains("unrecognised input 'bogus'"));
    }

    #[test]
    fn promotion_prompt() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (outcome, board, output) = play(board, "a7 a8\nking\nn\nquit\n");
        assert_eq!(outcome, None);
        assert!(output.contains("unknown promotion piece 'king'"));
        let knight = board.piece_at(Square::A8).unwrap();
        assert!(knight.is(PieceKind::Knight, Color::White));
        assert_eq!(board.current_turn(), Color::Black);
    }

    #[test]
    fn promotion_given_inline() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (_, board, output) = play(board, "a7a8q\n");
        assert!(!output.contains("promote to"));
        assert!(output.contains("White Pawn plays a7 a8 q, promoting to Queen, check"));
        let queen = board.piece_at(Square::A8).unwrap();
        assert!(queen.is(PieceKind::Queen, Color::White));
    }

    #[test]
    fn draw_offer() {
        let (outcome, _, output) = play(chess_rules::new_game(), "draw\nn\ndraw\ny\n");
        assert!(output.contains("Black, accept a draw?"));
        assert!(output.contains("draw declined"));
        assert_eq!(outcome, Some(GameOutcome::DrawByAgreement));
        assert!(output.contains("result: 1/2-1/2"));
    }

    #[test]
    fn resignation() {
        let (outcome, _, output) = play(chess_rules::new_game(), "e2 e4\nresign\n");
        assert_eq!(
            outcome,
            Some(GameOutcome::Resignation {
                winner: Color::White
            })
        );
        assert!(output.contains("Black resigned, White wins"));
        assert!(output.contains("result: 1-0"));
    }

    #[test]
    fn castling_is_announced() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let (_, board, output) = play(board, "e1 g1\n");
        assert!(output.contains("White castles\n"));
        assert_eq!(board.king_position(Color::White), Square::G1);
    }

    #[test]
    fn moves_lists_legal_moves() {
        let (_, _, output) = play(chess_rules::new_game(), "moves\n");
        assert!(output.contains("g1 f3"));
        assert!(output.contains("e2 e4"));
        assert!(!output.contains("e1 e2"));
    }
}
