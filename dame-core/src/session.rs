//! A match in progress: the current game plus the series score

use crate::config::RuleConfig;
use crate::game::{GameLogic, GameState};
use crate::match_score::MatchScore;
use crate::pieces::Player;

/// Current game and running score for one pair of players
#[derive(Clone, Debug, Default)]
pub struct MatchSession {
    game: GameLogic,
    score: MatchScore,
}

impl MatchSession {
    pub fn new(rules: RuleConfig) -> Self {
        Self {
            score: MatchScore::from_rules(&rules),
            game: GameLogic::new().with_rules(rules),
        }
    }

    pub fn game(&self) -> &GameLogic {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameLogic {
        &mut self.game
    }

    pub fn score(&self) -> &MatchScore {
        &self.score
    }

    pub fn is_match_over(&self) -> bool {
        self.score.is_match_over()
    }

    pub fn match_winner(&self) -> Option<Player> {
        self.score.match_winner()
    }

    /// Start the next game. A finished game is scored; abandoning a game
    /// still in progress forfeits it for the side to move.
    pub fn new_game(&mut self) {
        if !self.score.is_match_over() {
            if self.game.is_game_over() {
                self.score.record_game_result(self.game.state());
            } else {
                self.score.record_forfeit(self.game.current_player());
            }
        }
        self.game.reset();
    }

    /// Score the current game as `result` regardless of the board, then
    /// start the next one. Used when a game is stopped from outside, such as
    /// a move cap declaring a draw.
    pub fn adjudicate(&mut self, result: GameState) {
        self.score.record_game_result(result);
        self.game.reset();
    }

    /// Clear the score and start over
    pub fn reset_match(&mut self) {
        self.score.reset();
        self.game.reset();
    }
}
