//! Apply command - play one move against a saved game record
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_move(), save_record()

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dame_core::{GameRecord, Move, Position, RuleConfig, TurnOutcome};

use crate::common::{load_game, parse_square};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ApplyArgs {
    /// Game record to read
    #[arg(long, value_name = "FILE")]
    pub state: PathBuf,

    /// Square the piece starts on (ROW,COL)
    #[arg(long, value_parser = parse_square)]
    pub from: Position,

    /// Square the piece lands on (ROW,COL)
    #[arg(long, value_parser = parse_square)]
    pub to: Position,

    /// Captured squares in jump order, `;`-separated
    #[arg(long, value_parser = parse_square, value_delimiter = ';')]
    pub captures: Vec<Position>,

    /// Where to write the updated record (defaults to --state)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: ApplyArgs, rules: RuleConfig) -> Result<()> {
    let mut game = load_game(Some(&args.state), rules)?;
    let mv = build_move(&args);

    let outcome = game
        .apply_move(&mv)
        .with_context(|| format!("Move {} rejected", mv))?;

    match outcome {
        TurnOutcome::TurnEnded => tracing::info!(mv = %mv, "move applied"),
        TurnOutcome::ContinueJump(square) => {
            tracing::info!(mv = %mv, %square, "move applied, jump continues")
        }
    }

    let out = args.out.as_ref().unwrap_or(&args.state);
    let record = GameRecord::capture(&game).context("Failed to encode game")?;
    record
        .save(out)
        .with_context(|| format!("Failed to write game record: {}", out.display()))?;

    print!("{}", game.board());
    println!();
    println!("{}", game.status_message());
    Ok(())
}

// ============================================================================
// LEVEL 2 - STEPS
// ============================================================================

fn build_move(args: &ApplyArgs) -> Move {
    if args.captures.is_empty() {
        Move::simple(args.from, args.to)
    } else {
        Move::capture(args.from, args.to, args.captures.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(captures: Vec<Position>) -> ApplyArgs {
        ApplyArgs {
            state: PathBuf::from("game.json"),
            from: Position::new(5, 0),
            to: Position::new(1, 4),
            captures,
            out: None,
        }
    }

    #[test]
    fn test_build_move() {
        let simple = build_move(&args(vec![]));
        assert!(!simple.is_capture());

        let jump = build_move(&args(vec![Position::new(4, 1), Position::new(2, 3)]));
        assert_eq!(jump.capture_count(), 2);
        assert_eq!(jump.captures[0], Position::new(4, 1));
    }
}
