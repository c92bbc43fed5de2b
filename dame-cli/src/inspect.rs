//! Show and moves commands - read-only views of a saved game

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dame_core::{GameLogic, Move, Position, RuleConfig};

use crate::common::{load_game, parse_square};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct ShowArgs {
    /// Saved game record (defaults to a new game)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Saved game record (defaults to a new game)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Only moves starting on this square (ROW,COL)
    #[arg(long, value_parser = parse_square)]
    pub square: Option<Position>,

    /// Output moves as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn run_show(args: ShowArgs, rules: RuleConfig) -> Result<()> {
    let game = load_game(args.state.as_deref(), rules)?;
    print!("{}", game.board());
    println!();
    println!("{}", game.status_message());
    if let Some(pinned) = game.multi_jump_position() {
        println!("Pinned piece: {}", pinned);
    }
    Ok(())
}

pub fn run_moves(args: MovesArgs, rules: RuleConfig) -> Result<()> {
    let game = load_game(args.state.as_deref(), rules)?;
    let moves = list_moves(&game, args.square);

    tracing::info!(count = moves.len(), "listed legal moves");

    if args.json {
        let json = serde_json::to_string_pretty(&moves).context("Failed to encode moves")?;
        println!("{}", json);
    } else if moves.is_empty() {
        println!("No legal moves ({})", game.status_message());
    } else {
        for mv in &moves {
            println!("{}", mv);
        }
    }
    Ok(())
}

fn list_moves(game: &GameLogic, square: Option<Position>) -> Vec<Move> {
    match square {
        Some(pos) => game.valid_moves_for(pos),
        None => game.valid_moves(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_moves_for_square() {
        let game = GameLogic::new();
        assert_eq!(list_moves(&game, None).len(), 7);
        assert_eq!(list_moves(&game, Some(Position::new(5, 0))).len(), 1);
        assert_eq!(list_moves(&game, Some(Position::new(5, 2))).len(), 2);
        // Opponent's piece
        assert!(list_moves(&game, Some(Position::new(2, 1))).is_empty());
    }
}
