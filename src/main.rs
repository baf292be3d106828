//! Infinite-C6: an unbounded Connect6 board.
//!
//! ## Usage
//!
//! - `infinite-c6` - Start the text protocol on stdin/stdout
//! - `infinite-c6 shell --size 19 --record game.c6` - Same, with options
//! - `infinite-c6 demo` - Play a random game and step through its record
//! - `infinite-c6 inspect game.c6` - Print a record file's summary and board
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see them.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use infinite_c6::board::Board;
use infinite_c6::constants::{DEFAULT_VIEW_RADIUS, MAX_VIEW_RADIUS};
use infinite_c6::point::{Point, zigzag_decode};
use infinite_c6::protocol::Engine;

/// Infinite-C6: an unbounded Connect6 board with undo, redo and jump
#[derive(Parser)]
#[command(name = "infinite-c6")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the text protocol on stdin/stdout
    Shell {
        /// Side length of a square board (infinite if omitted)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        size: Option<u32>,
        /// Record file to start from
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Play a random game on a square board and step through its record
    Demo {
        /// Side length of the board
        #[arg(long, default_value_t = 19, value_parser = clap::value_parser!(u32).range(1..=255))]
        size: u32,
        /// Number of stones to place
        #[arg(long, default_value_t = 40)]
        moves: usize,
        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the summary and board of a record file
    Inspect {
        /// Record file to read
        path: PathBuf,
        /// Half-width of the printed window
        #[arg(
            long,
            default_value_t = DEFAULT_VIEW_RADIUS,
            value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_VIEW_RADIUS)),
        )]
        radius: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Shell { size, record }) => run_shell(size, record.as_deref()),
        Some(Commands::Demo { size, moves, seed }) => {
            run_demo(size, moves, seed);
            Ok(())
        }
        Some(Commands::Inspect { path, radius }) => run_inspect(&path, radius),
        None => run_shell(None, None),
    }
}

fn load_board(path: &Path) -> Result<Board> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Board::load_record(BufReader::new(file))
        .with_context(|| format!("cannot load record {}", path.display()))
}

fn run_shell(size: Option<u32>, record: Option<&Path>) -> Result<()> {
    let board = match (record, size) {
        (Some(path), _) => load_board(path)?,
        (None, Some(size)) => Board::new_square(size),
        (None, None) => Board::new_infinite(),
    };
    info!(bounds = %board.bounds(), moves = board.total_count(), "starting shell");

    let mut engine = Engine::with_board(board);
    engine
        .run(io::stdin().lock(), io::stdout().lock())
        .context("protocol i/o failed")
}

fn run_demo(size: u32, moves: usize, seed: Option<u64>) {
    println!("Infinite-C6: random game on a {size}x{size} board\n");

    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let mut board = random_game(&mut rng, size, moves);
    let moves = board.total_count();

    let radius = size / 2;
    println!("=== After {} stones ===", board.index());
    println!("{}", board.view(Point::ORIGIN, radius));

    let back = moves / 2;
    for _ in 0..back {
        board.undo();
    }
    println!("=== Undid {back} stones ({} / {}) ===", board.index(), board.total_count());
    println!("{}", board.view(Point::ORIGIN, radius));

    board.jump(board.total_count());
    let (stone, last_of_turn) = board.infer_turn();
    let left = if last_of_turn { 1 } else { 2 };
    println!("=== Back to the end: {stone} to play {left} ===");
    println!(
        "{} stones in {} chunks",
        board.grid().stone_count(),
        board.grid().chunk_count()
    );
}

/// Plays up to `moves` random stones on a `size x size` board, following the
/// inferred turn order.
fn random_game(rng: &mut fastrand::Rng, size: u32, moves: usize) -> Board {
    let mut board = Board::new_square(size);
    let moves = moves.min((size as usize).pow(2));

    // Zigzag codes below `size` are exactly the coordinates inside the bounds.
    while board.total_count() < moves {
        let p = Point::new(
            zigzag_decode(rng.u32(..size)),
            zigzag_decode(rng.u32(..size)),
        );
        let (stone, _) = board.infer_turn();
        // Occupied: draw another point.
        if board.commit(p, stone).is_err() {
            continue;
        }
    }
    board
}

fn run_inspect(path: &Path, radius: u32) -> Result<()> {
    let board = load_board(path)?;
    let (stone, last_of_turn) = board.infer_turn();
    let left = if last_of_turn { 1 } else { 2 };
    let center = board
        .past_record()
        .last()
        .map_or(Point::ORIGIN, |&(p, _)| p);

    println!("Board: {}", board.bounds());
    println!("Moves: {}", board.total_count());
    println!("Next:  {stone} to play {left}");
    println!();
    print!("{}", board.view(center, radius));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_radius_is_capped() {
        let cli = Cli::try_parse_from(["infinite-c6", "inspect", "g.c6", "--radius", "64"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Some(Commands::Inspect { radius: 64, .. }))
        ));

        let cli = Cli::try_parse_from(["infinite-c6", "inspect", "g.c6", "--radius", "65"]);
        assert!(cli.is_err());
        let cli = Cli::try_parse_from(["infinite-c6", "inspect", "g.c6", "--radius", "4000000000"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_random_game_fills_requested_moves() {
        let mut rng = fastrand::Rng::with_seed(5);
        let board = random_game(&mut rng, 5, 20);
        assert_eq!(board.total_count(), 20);
        assert_eq!(board.grid().stone_count(), 20);
        assert!(board.past_record().iter().all(|&(p, _)| board.bounds().contains(p)));

        // More moves than points: the board is filled and the loop stops.
        let board = random_game(&mut rng, 3, 100);
        assert_eq!(board.total_count(), 9);
    }
}
