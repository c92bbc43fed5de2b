//! Helpers shared by the subcommands: square parsing and state loading

use std::path::Path;

use anyhow::{Context, Result};

use dame_core::{GameLogic, GameRecord, Position, RuleConfig};

/// Parse a square written as `R,C` (e.g. `5,0`)
pub fn parse_square(s: &str) -> std::result::Result<Position, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row: i8 = row
        .trim()
        .parse()
        .map_err(|_| format!("bad row in '{}'", s))?;
    let col: i8 = col
        .trim()
        .parse()
        .map_err(|_| format!("bad column in '{}'", s))?;

    let pos = Position::new(row, col);
    if !pos.is_valid() {
        return Err(format!("{} is off the board", pos));
    }
    Ok(pos)
}

/// Rules from `--rules`, or the defaults
pub fn load_rules(path: Option<&Path>) -> Result<RuleConfig> {
    match path {
        Some(path) => RuleConfig::load(path)
            .with_context(|| format!("Failed to load rules: {}", path.display())),
        None => Ok(RuleConfig::default()),
    }
}

/// Saved record, or a fresh game when no file is given
pub fn load_record(path: Option<&Path>) -> Result<GameRecord> {
    match path {
        Some(path) => GameRecord::load(path)
            .with_context(|| format!("Failed to load game record: {}", path.display())),
        None => Ok(GameRecord::default()),
    }
}

pub fn load_game(path: Option<&Path>, rules: RuleConfig) -> Result<GameLogic> {
    let record = load_record(path)?;
    record
        .restore(rules)
        .context("Game record does not describe a valid position")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("5,0"), Ok(Position::new(5, 0)));
        assert_eq!(parse_square(" 3 , 2 "), Ok(Position::new(3, 2)));
        assert!(parse_square("5").is_err());
        assert!(parse_square("a,1").is_err());
        assert!(parse_square("8,1").is_err());
        assert!(parse_square("-1,0").is_err());
    }

    #[test]
    fn test_missing_state_is_new_game() {
        let game = load_game(None, RuleConfig::default()).unwrap();
        assert_eq!(game.valid_moves().len(), 7);
        assert_eq!(game.history_len(), 0);
    }

    #[test]
    fn test_missing_rules_file_fails() {
        let err = load_rules(Some(Path::new("/nonexistent/dame-rules.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load rules"));
    }
}
