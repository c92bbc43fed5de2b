//! Rule configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DameError, Result};

/// How a requested move is resolved against the legal set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveMatching {
    /// Captures must match when given; start/end alone must be unambiguous
    #[default]
    Strict,
    /// First legal move with the same start and end wins
    FirstMatch,
}

/// Tunable rules for a game and its match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub move_matching: MoveMatching,
    /// A lone king against a lone king is drawn
    pub king_vs_king_draw: bool,
    /// Wins needed to take the match
    pub wins_needed: u32,
    /// Advertised series length (not enforced)
    pub total_games: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            move_matching: MoveMatching::Strict,
            king_vs_king_draw: true,
            wins_needed: 3,
            total_games: 5,
        }
    }
}

impl RuleConfig {
    /// Lenient rules: first start/end match wins, no draw rule
    pub fn legacy() -> Self {
        Self {
            move_matching: MoveMatching::FirstMatch,
            king_vs_king_draw: false,
            ..Default::default()
        }
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules: Self = serde_json::from_str(&content).map_err(|source| DameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        rules.validate().map_err(|reason| DameError::InvalidRules {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(rules)
    }

    /// Reject settings that make the match meaningless
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.wins_needed == 0 {
            return Err("wins_needed must be at least 1");
        }
        Ok(())
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(DameError::Encode)?;
        std::fs::write(path, content).map_err(|source| DameError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RuleConfig::default();
        assert_eq!(rules.move_matching, MoveMatching::Strict);
        assert!(rules.king_vs_king_draw);
        assert_eq!(rules.wins_needed, 3);
        assert_eq!(rules.total_games, 5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let rules: RuleConfig =
            serde_json::from_str(r#"{"move_matching": "FIRST_MATCH", "wins_needed": 2}"#).unwrap();
        assert_eq!(rules.move_matching, MoveMatching::FirstMatch);
        assert_eq!(rules.wins_needed, 2);
        assert!(rules.king_vs_king_draw);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("dame-rules-{}.json", std::process::id()));
        let rules = RuleConfig::legacy();
        rules.save(&path).unwrap();
        let loaded = RuleConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, rules);
    }

    #[test]
    fn test_zero_wins_needed_rejected() {
        let path = std::env::temp_dir().join(format!("dame-rules-zero-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"wins_needed": 0}"#).unwrap();
        let result = RuleConfig::load(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(DameError::InvalidRules { .. })));
        assert!(RuleConfig { wins_needed: 0, ..Default::default() }.validate().is_err());
        assert!(RuleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleConfig::load(Path::new("/nonexistent/dame-rules.json")).unwrap_err();
        assert!(matches!(err, DameError::Io { .. }));
    }
}
