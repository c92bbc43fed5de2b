//! Dame CLI - Command-line interface
//!
//! Commands:
//! - show: Print a saved game (or a new one)
//! - moves: List the legal moves
//! - apply: Play one move and save the result
//! - series: Play a best-of match of random playouts

mod apply_cmd;
mod common;
mod inspect;
mod series;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dame")]
#[command(about = "Ghanaian Dame rules engine")]
struct Cli {
    /// Rule configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board, side to move and status
    Show(inspect::ShowArgs),
    /// List legal moves
    Moves(inspect::MovesArgs),
    /// Apply one move to a saved game record
    Apply(apply_cmd::ApplyArgs),
    /// Play a best-of series of random playouts
    Series(series::SeriesArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rules = common::load_rules(cli.rules.as_deref())?;

    match cli.command {
        Commands::Show(args) => inspect::run_show(args, rules),
        Commands::Moves(args) => inspect::run_moves(args, rules),
        Commands::Apply(args) => apply_cmd::run(args, rules),
        Commands::Series(args) => series::run(args, rules, cli.seed),
    }
}
