//! Configuration management with validation and defaults
//!
//! Sectioned configuration with TOML load/save. The two observed rule
//! variants (house factor 0.99 vs 1.00, resampling vs shuffle placement)
//! are explicit configuration values rather than hard-coded constants.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level game configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MinefieldConfig {
    pub game: GameConfig,
    pub wallet: WalletConfig,
    pub history: HistoryConfig,
}

/// Round engine rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Mine count used when the player does not specify one
    pub default_mine_count: u8,
    /// Fair-odds multiplier is scaled by this constant (house edge)
    pub house_factor: f64,
    /// How mines are scattered over the board
    pub placement: PlacementPolicy,
    pub min_bet: f64,
    pub max_bet: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_mine_count: 3,
            house_factor: 0.99,
            placement: PlacementPolicy::Resample,
            min_bet: 0.01,
            max_bet: 10_000.0,
        }
    }
}

/// Mine placement strategy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlacementPolicy {
    /// Draw uniform cell indices, redraw on collision until unique
    Resample,
    /// Fisher-Yates shuffle of a fixed mine/safe layout
    Shuffle,
}

/// Balance store configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Flat file holding the persisted balance
    pub balance_file: String,
    /// Balance written when no file exists yet
    pub default_balance: f64,
    /// What to do when the balance file cannot be parsed
    pub on_corrupt: CorruptBalancePolicy,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            balance_file: "./data/balance.txt".to_string(),
            default_balance: 100.0,
            on_corrupt: CorruptBalancePolicy::Reject,
        }
    }
}

/// Policy for a balance file that exists but does not parse.
///
/// Silent fallback to zero is exactly the data-loss path this replaces,
/// so there is no silent option.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CorruptBalancePolicy {
    /// Refuse to start; the operator inspects the file
    Reject,
    /// Fall back to the default balance with a logged warning
    ResetToDefault,
}

/// Round history log configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub file: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: "./data/rounds.jsonl".to_string(),
        }
    }
}

impl MinefieldConfig {
    /// Classic rules: 1% house edge, collision-resampling placement
    pub fn classic() -> Self {
        Self::default()
    }

    /// Promotional rules: no house edge, shuffle placement
    pub fn promotional() -> Self {
        Self {
            game: GameConfig {
                house_factor: 1.0,
                placement: PlacementPolicy::Shuffle,
                ..GameConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.game.house_factor > 0.0 && self.game.house_factor <= 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "house_factor must be in (0, 1], got {}",
                self.game.house_factor
            )));
        }

        if self.game.default_mine_count == 0 || self.game.default_mine_count > 24 {
            return Err(ConfigError::InvalidValue(format!(
                "default_mine_count must be 1..=24, got {}",
                self.game.default_mine_count
            )));
        }

        if self.game.min_bet <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "min_bet must be > 0".to_string(),
            ));
        }

        if self.game.max_bet < self.game.min_bet {
            return Err(ConfigError::InvalidValue(
                "max_bet must be >= min_bet".to_string(),
            ));
        }

        if self.wallet.default_balance < 0.0 {
            return Err(ConfigError::InvalidValue(
                "default_balance must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MinefieldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_promotional_config_is_valid() {
        let config = MinefieldConfig::promotional();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.house_factor, 1.0);
        assert_eq!(config.game.placement, PlacementPolicy::Shuffle);
    }

    #[test]
    fn test_invalid_house_factor() {
        let mut config = MinefieldConfig::default();
        config.game.house_factor = 1.5;
        assert!(config.validate().is_err());

        config.game.house_factor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_mine_count() {
        let mut config = MinefieldConfig::default();
        config.game.default_mine_count = 0;
        assert!(config.validate().is_err());

        config.game.default_mine_count = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_bet_range() {
        let mut config = MinefieldConfig::default();
        config.game.max_bet = 0.001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = MinefieldConfig::promotional();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: MinefieldConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.game.house_factor, 1.0);
        assert_eq!(parsed.game.placement, PlacementPolicy::Shuffle);
        assert_eq!(parsed.wallet.on_corrupt, CorruptBalancePolicy::Reject);
    }
}
