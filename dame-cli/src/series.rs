//! Series command - play a best-of match of seeded random playouts
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_series(), report_results()
//! - Level 3: play_single_game()
//! - Level 4: formatting utilities
//!
//! Both sides pick uniformly among their legal moves. This drives the engine
//! through whole games; it is not an opponent.

use anyhow::{Context, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use dame_core::{GameLogic, GameState, MatchScore, MatchSession, Player, RuleConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SeriesArgs {
    /// Plies per game before it is adjudicated a draw
    #[arg(long, default_value = "400")]
    pub max_plies: usize,

    /// Stop after this many games even if nobody has won the match
    #[arg(long, default_value = "25")]
    pub max_games: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameSummary {
    game_number: u32,
    result: GameState,
    plies: usize,
    /// Stopped by the ply cap rather than the rules
    adjudicated: bool,
}

/// Final standing of the series
#[derive(Clone, Debug, Serialize)]
struct SeriesResults {
    games: Vec<GameSummary>,
    score: MatchScore,
    winner: Option<Player>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run series command
///
/// 1. Play games until the match is decided or the game cap is hit
/// 2. Report results
pub fn run(args: SeriesArgs, rules: RuleConfig, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting series: first to {} (max {} games, {} plies per game)",
        rules.wins_needed,
        args.max_games,
        args.max_plies
    );

    let results = play_series(&args, rules, seed);

    if results.winner.is_none() {
        tracing::warn!("series stopped after {} games without a winner", results.games.len());
    }

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_series(args: &SeriesArgs, rules: RuleConfig, seed: Option<u64>) -> SeriesResults {
    let mut rng = create_rng(seed);
    let mut session = MatchSession::new(rules);
    let mut games = Vec::new();

    while !session.is_match_over() && (games.len() as u32) < args.max_games {
        let game_number = session.score().current_game_number();
        let plies = play_single_game(session.game_mut(), args.max_plies, &mut rng);

        let summary = if session.game().is_game_over() {
            let result = session.game().state();
            session.new_game();
            GameSummary { game_number, result, plies, adjudicated: false }
        } else {
            session.adjudicate(GameState::Draw);
            GameSummary { game_number, result: GameState::Draw, plies, adjudicated: true }
        };

        tracing::info!(
            "Game {}: {:?} ({} plies{})",
            summary.game_number,
            summary.result,
            summary.plies,
            if summary.adjudicated { ", adjudicated" } else { "" }
        );
        games.push(summary);
    }

    SeriesResults {
        games,
        score: session.score().clone(),
        winner: session.match_winner(),
    }
}

fn report_results(results: &SeriesResults, args: &SeriesArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(results).context("Failed to encode results")?;
        println!("{}", json);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play random legal moves until the game ends or `max_plies` is reached.
/// Each jump of a continued capture counts as a ply.
fn play_single_game(game: &mut GameLogic, max_plies: usize, rng: &mut ChaCha8Rng) -> usize {
    let mut plies = 0;
    while plies < max_plies && !game.is_game_over() {
        let moves = game.valid_moves();
        let Some(mv) = moves.choose(rng) else {
            break;
        };
        if let Err(err) = game.apply_move(mv) {
            tracing::warn!(%mv, %err, "generated move rejected");
            break;
        }
        plies += 1;
    }
    plies
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_text_results(results: &SeriesResults) {
    let score = &results.score;

    println!("\n=== Series Results ===");
    println!("{}", score.score_display());
    println!("Draws:        {}", score.draws);
    println!("Games played: {}", score.games_played);
    match results.winner {
        Some(_) => println!("{}", score.match_result_message()),
        None => println!("No winner ({})", score.game_count_display()),
    }

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} plies{}",
            game.game_number,
            game.result,
            game.plies,
            if game.adjudicated { " (adjudicated)" } else { "" }
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
