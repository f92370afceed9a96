use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gambit_core::{Board, STARTING_FEN};
use gambit_engine::{Engine, EngineConfig, GameClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pick one move for a position and print it in coordinate notation.
#[derive(Debug, Parser)]
#[command(name = "gambit", version)]
struct Args {
    /// Position to search, as FEN.
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Moves to play from the FEN first, e.g. "e2e4 e7e5".
    #[arg(long, default_value = "")]
    moves: String,

    /// Time left on the side to move's clock.
    #[arg(long, default_value_t = 60_000)]
    remaining_ms: u64,

    #[arg(long)]
    max_depth: Option<u8>,

    /// Transposition table slots.
    #[arg(long)]
    tt_entries: Option<usize>,

    #[arg(long)]
    persistent_tt: bool,

    /// Disable late move reductions.
    #[arg(long)]
    no_lmr: bool,
}

impl Args {
    fn config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            tt_entries: self.tt_entries.unwrap_or(defaults.tt_entries),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            late_move_reductions: !self.no_lmr,
            persistent_tt: self.persistent_tt,
            ..defaults
        }
    }

    fn position(&self) -> Result<Board> {
        let mut board: Board = self.fen.parse().context("invalid --fen")?;
        for text in self.moves.split_whitespace() {
            let mv = board
                .parse_move(text)
                .with_context(|| format!("cannot play {text} in {board}"))?;
            board.make_move(mv);
        }
        Ok(board)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut board = args.position()?;
    let mut engine = Engine::new(args.config()).context("invalid engine configuration")?;

    info!(fen = %board, remaining_ms = args.remaining_ms, "gambit searching");
    let clock = GameClock::start(Duration::from_millis(args.remaining_ms));
    let result = engine.search(&mut board, &clock, |_| {});

    if result.best_move.is_null() {
        anyhow::bail!("no legal moves in {board}");
    }
    println!("{}", result.best_move);
    Ok(())
}
