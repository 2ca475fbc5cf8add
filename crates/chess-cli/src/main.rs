//! chess-rules - inspect positions with the chess rules engine.
//!
//! Prints a position, lists the legal moves after a sequence of moves, or
//! runs perft. Positions come from the standard start, a FEN string, or a
//! TOML setup file.

mod report;

use anyhow::Context;
use chess_engine::{perft, perft_divide, GameState, Setup};
use clap::{Args, Parser, Subcommand};
use report::PositionReport;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-rules")]
#[command(about = "Inspect chess positions: board, legal moves, perft")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the starting position comes from.
#[derive(Args)]
struct PositionArgs {
    /// Placement and side-to-move fields of a FEN string
    #[arg(long, conflicts_with = "setup")]
    fen: Option<String>,

    /// TOML setup file
    #[arg(long)]
    setup: Option<PathBuf>,

    /// Moves to play first, e.g. e2-e4 e7e5 O-O
    #[arg(long = "play", num_args = 1.., value_name = "MOVE")]
    moves: Vec<String>,
}

impl PositionArgs {
    fn load(&self) -> anyhow::Result<GameState> {
        let setup = match (&self.fen, &self.setup) {
            (Some(fen), _) => Setup::from_fen(fen).context("invalid FEN")?,
            (None, Some(path)) => Setup::load(path)
                .with_context(|| format!("cannot load setup from {}", path.display()))?,
            (None, None) => Setup::standard(),
        };
        let mut game = GameState::from_setup(setup)?;
        for text in &self.moves {
            game.apply_notation(text)
                .with_context(|| format!("cannot play {}", text))?;
        }
        Ok(game)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board, side to move and game status
    Show {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// List the legal moves of the side to move
    Moves {
        #[command(flatten)]
        position: PositionArgs,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[command(flatten)]
        position: PositionArgs,
        /// Search depth
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Print the node count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { position } => {
            let mut game = position.load()?;
            print!("{}", game);
            println!("FEN: {}", game.to_fen());
            if game.is_check() {
                println!("Check");
            }
            if let Some(winner) = game.winner() {
                println!("Checkmate, {} wins", winner);
            }
        }
        Commands::Moves { position, json } => {
            let mut game = position.load()?;
            let report = PositionReport::new(&mut game);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} to move, {} legal moves", report.side_to_move, report.moves.len());
                for m in &report.moves {
                    println!("  {}", m.notation);
                }
            }
        }
        Commands::Perft {
            position,
            depth,
            divide,
        } => {
            let mut game = position.load()?;
            tracing::info!(depth, fen = %game.to_fen(), "starting perft");
            let started = Instant::now();
            let nodes = if divide {
                let results = perft_divide(&mut game, depth);
                for (mv, count) in &results {
                    println!("{}: {}", mv, count);
                }
                results.iter().map(|(_, n)| n).sum::<u64>()
            } else {
                perft(&mut game, depth)
            };
            println!("Nodes: {}", nodes);
            tracing::info!(nodes, elapsed_ms = started.elapsed().as_millis() as u64, "perft done");
        }
    }

    Ok(())
}
