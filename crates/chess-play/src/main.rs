//! Chess Play - a terminal game against the minimax engine.
//!
//! The human enters moves as coordinate text (`e2e4`, `e7e8q`); the engine
//! answers with an alpha-beta search of the configured depth.

mod config;
mod session;

use std::io;
use std::path::PathBuf;

use chess_engine::Game;
use clap::Parser;
use config::{PlayConfig, Side};
use session::Session;
use tracing_subscriber::EnvFilter;

/// Chess Play - play chess against the engine.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess against a minimax engine in the terminal")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value_os_t = PlayConfig::config_path())]
    config: PathBuf,

    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    depth: Option<u32>,

    /// Side you play (overrides the config file)
    #[arg(long, value_enum)]
    human: Option<Side>,

    /// Draw the board with ASCII letters instead of Unicode glyphs
    #[arg(long)]
    ascii: bool,

    /// Start from this FEN instead of the standard position
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut config = PlayConfig::load(&args.config)?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(human) = args.human {
        config.human = human;
    }
    if args.ascii {
        config.unicode = false;
    }
    if args.fen.is_some() {
        config.start_fen = args.fen;
    }
    config.validate()?;

    tracing::info!(
        depth = config.depth,
        human = ?config.human,
        config = ?args.config,
        "starting game"
    );

    let game = match &config.start_fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };

    let mut session = Session::new(game, &config);
    let stdin = io::stdin();
    let result = session.run(stdin.lock(), io::stdout())?;

    match result {
        Some(result) => tracing::info!(?result, plies = session.game().ply_count(), "game finished"),
        None => tracing::info!("input closed, game abandoned"),
    }
    Ok(())
}
