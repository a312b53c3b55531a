//! Chess CLI - two players at one terminal.
//!
//! Reads moves such as `e2 e4` from stdin, draws the board after each one
//! and announces check, checkmate and stalemate.

mod config;
mod input;
mod render;
mod session;

use anyhow::Context;
use chess_rules::Board;
use clap::Parser;
use config::Config;
use render::RenderOptions;
use session::Session;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::Level;

/// Chess CLI - play a game of chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Two-player chess in the terminal")]
struct Args {
    /// Path to a config file (defaults to chess.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Start from this FEN position instead of the standard layout
    #[arg(long)]
    fen: Option<String>,

    /// Draw pieces as Unicode chess symbols
    #[arg(long)]
    unicode: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let level_name = args.log_level.as_deref().unwrap_or(&config.log_level);
    let level: Level = level_name
        .parse()
        .with_context(|| format!("invalid log level '{}'", level_name))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    tracing::debug!(?config, "loaded config");

    let board = match args.fen.as_deref().or(config.start_fen.as_deref()) {
        Some(fen) => {
            tracing::info!(%fen, "starting from position");
            Board::from_fen(fen).with_context(|| format!("cannot set up position '{}'", fen))?
        }
        None => chess_rules::new_game(),
    };

    let options = RenderOptions {
        unicode: args.unicode || config.unicode_pieces,
        coordinates: config.show_coordinates,
    };

    let mut session = Session::new(board, BufReader::new(io::stdin()), io::stdout(), options);
    let outcome = session.run()?;
    let plies = session.board().move_history().len();
    match outcome {
        Some(outcome) => tracing::info!(%outcome, plies, "session finished"),
        None => tracing::info!(plies, "session abandoned"),
    }
    Ok(())
}
