//! Best-of series scoring
//!
//! First side to `wins_needed` wins takes the match. Draws count as games
//! played but credit nobody. The series length is only advertised.

use serde::{Deserialize, Serialize};

use crate::config::RuleConfig;
use crate::game::GameState;
use crate::pieces::Player;

/// Default wins needed to take a match
pub const WINS_NEEDED: u32 = 3;

/// Default advertised series length
pub const TOTAL_GAMES: u32 = 5;

/// Series tally
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    pub games_played: u32,
    wins_needed: u32,
    total_games: u32,
}

impl Default for MatchScore {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchScore {
    pub fn new() -> Self {
        Self::with_target(WINS_NEEDED, TOTAL_GAMES)
    }

    pub fn with_target(wins_needed: u32, total_games: u32) -> Self {
        Self {
            white_wins: 0,
            black_wins: 0,
            draws: 0,
            games_played: 0,
            wins_needed,
            total_games,
        }
    }

    pub fn from_rules(rules: &RuleConfig) -> Self {
        Self::with_target(rules.wins_needed, rules.total_games)
    }

    /// Clear the tally, keeping the target
    pub fn reset(&mut self) {
        *self = Self::with_target(self.wins_needed, self.total_games);
    }

    /// Count a finished game. Unfinished games and games after the match is
    /// decided are ignored.
    pub fn record_game_result(&mut self, result: GameState) {
        if self.is_match_over() {
            return;
        }
        match result {
            GameState::WhiteWins => self.white_wins += 1,
            GameState::BlackWins => self.black_wins += 1,
            GameState::Draw => self.draws += 1,
            GameState::InProgress => return,
        }
        self.games_played += 1;
        tracing::debug!(?result, score = %self.score_display(), "recorded game");
    }

    /// Credit the opponent of the forfeiting player with a win
    pub fn record_forfeit(&mut self, forfeiting: Player) {
        if self.is_match_over() {
            return;
        }
        match forfeiting.opponent() {
            Player::White => self.white_wins += 1,
            Player::Black => self.black_wins += 1,
        }
        self.games_played += 1;
        tracing::debug!(?forfeiting, score = %self.score_display(), "recorded forfeit");
    }

    pub fn is_match_over(&self) -> bool {
        self.match_winner().is_some()
    }

    pub fn match_winner(&self) -> Option<Player> {
        if self.white_wins >= self.wins_needed {
            Some(Player::White)
        } else if self.black_wins >= self.wins_needed {
            Some(Player::Black)
        } else {
            None
        }
    }

    pub fn wins_needed(&self) -> u32 {
        self.wins_needed
    }

    pub fn total_games(&self) -> u32 {
        self.total_games
    }

    pub fn current_game_number(&self) -> u32 {
        self.games_played + 1
    }

    /// "White 2 - 1 Black"
    pub fn score_display(&self) -> String {
        format!("White {} - {} Black", self.white_wins, self.black_wins)
    }

    /// "Game 3 • First to 3", or "Match Complete"
    pub fn game_count_display(&self) -> String {
        if self.is_match_over() {
            return "Match Complete".to_string();
        }
        format!(
            "Game {} • First to {}",
            self.current_game_number(),
            self.wins_needed
        )
    }

    /// "WHITE wins the match!", empty while undecided
    pub fn match_result_message(&self) -> String {
        self.match_winner()
            .map(|winner| format!("{} wins the match!", winner))
            .unwrap_or_default()
    }
}
