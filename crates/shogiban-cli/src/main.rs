//! `shogiban`: manage and replay finished shogi games

mod config;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shogiban_record::{RecordStore, StorageConfig, format_clock};
use shogiban_session::AnaliseSession;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "shogiban.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(flatten)]
    storage: StorageArgs,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the `[storage]` section
#[derive(clap::Args, Debug)]
struct StorageArgs {
    /// Directory with new and ranked records
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Directory receiving records that drop out of the ranking
    #[arg(long, global = true)]
    history_dir: Option<PathBuf>,

    /// Number of records kept ranked
    #[arg(long, global = true)]
    top_n: Option<usize>,
}

impl StorageArgs {
    fn apply(self, config: &mut StorageConfig) {
        if let Some(dir) = self.dir {
            config.ranked_dir = dir;
        }
        if let Some(dir) = self.history_dir {
            config.history_dir = dir;
        }
        if let Some(n) = self.top_n {
            config.top_n = n;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank saved games and move the overflow to the history directory
    Rank,
    /// List ranked games
    List,
    /// Print a record's summary and move list
    Show { identifier: String },
    /// Replay a record and print the board
    Replay {
        identifier: String,
        /// Stop after this many moves (default: the final position)
        #[arg(long)]
        ply: Option<usize>,
    },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    args.storage.apply(&mut config.storage);
    let store = RecordStore::new(config.storage);

    match args.command {
        Command::Rank => rank(&store),
        Command::List => list(&store),
        Command::Show { identifier } => show(&store, &identifier),
        Command::Replay { identifier, ply } => replay(&store, &identifier, ply),
    }
}

fn rank(store: &RecordStore) -> Result<()> {
    let report = store.rank_and_prune().context("ranking failed")?;
    for path in &report.recovered {
        println!("recovered from an interrupted ranking: {}", path.display());
    }
    for game in &report.ranked {
        println!(
            "{:>3}  {}  {}  {:>4} moves",
            game.rank,
            format_clock(game.elapsed_seconds),
            game.date,
            game.move_count
        );
    }
    for path in &report.relocated {
        println!("moved to history: {}", path.display());
    }
    for path in &report.skipped {
        println!("skipped unreadable: {}", path.display());
    }
    Ok(())
}

fn list(store: &RecordStore) -> Result<()> {
    let entries = store.list().context("listing records failed")?;
    if entries.is_empty() {
        println!("no records in {}", store.config().ranked_dir.display());
    }
    for entry in entries {
        println!(
            "{:<10}  {}  {}  {:>4} moves",
            entry.identifier,
            entry.game.clock_label(),
            entry.game.date,
            entry.game.moves.len()
        );
    }
    Ok(())
}

fn show(store: &RecordStore, identifier: &str) -> Result<()> {
    let game = store.load(identifier).with_context(|| format!("cannot open {identifier}"))?;
    println!("date:  {}", game.date);
    println!("time:  {}", game.clock_label());
    println!("moves: {}", game.moves.len());
    for (i, mv) in game.moves.iter().enumerate() {
        println!("{:>4}. {mv}", i + 1);
    }
    Ok(())
}

fn replay(store: &RecordStore, identifier: &str, ply: Option<usize>) -> Result<()> {
    let game = store.load(identifier).with_context(|| format!("cannot open {identifier}"))?;
    let mut session = AnaliseSession::new(game);
    let target = ply.unwrap_or(session.total_plies());
    session.seek(target).with_context(|| format!("cannot replay {identifier}"))?;

    println!("{}  {}", session.date(), session.clock_label());
    match session.last_move() {
        Some(mv) => println!("ply {}/{}: {mv}", session.ply(), session.total_plies()),
        None => println!("ply 0/{}", session.total_plies()),
    }
    println!("{}", session.board());
    if let Some(outcome) = session.board().outcome() {
        println!("{outcome}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_overrides_apply() {
        let args = Args::try_parse_from([
            "shogiban", "list", "--dir", "games", "--top-n", "3",
        ])
        .unwrap();
        assert!(matches!(args.command, Command::List));
        let mut storage = StorageConfig::default();
        args.storage.apply(&mut storage);
        assert_eq!(storage.ranked_dir, PathBuf::from("games"));
        assert_eq!(storage.history_dir, PathBuf::from("History"));
        assert_eq!(storage.top_n, 3);
    }

    #[test]
    fn test_replay_ply_is_optional() {
        let args = Args::try_parse_from(["shogiban", "replay", "TOP 1"]).unwrap();
        match args.command {
            Command::Replay { identifier, ply } => {
                assert_eq!(identifier, "TOP 1");
                assert_eq!(ply, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
        let args =
            Args::try_parse_from(["shogiban", "replay", "game1.json", "--ply", "4"]).unwrap();
        assert!(matches!(args.command, Command::Replay { ply: Some(4), .. }));
    }
}
