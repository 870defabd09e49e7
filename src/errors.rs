//! Error types for the Minefield game system
//!
//! One error family per subsystem, rolled up into a single root type
//! so binaries and tests can use one `Result` alias throughout.

use std::path::PathBuf;

/// Root error type for all Minefield operations
#[derive(Debug, thiserror::Error)]
pub enum MinefieldError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Round error: {0}")]
    Round(#[from] RoundError),

    #[error("Invalid amount: {0}")]
    Amount(#[from] AmountParseError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Balance store errors
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Failed to read balance file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write balance file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Balance file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Round engine state machine errors
#[derive(Debug, thiserror::Error)]
pub enum RoundError {
    #[error("Mine count {0} out of range (must be 1..=24)")]
    InvalidMineCount(u8),

    #[error("Cell index {0} out of range (board has {1} cells)")]
    CellOutOfRange(usize, usize),

    #[error("Mine position {0} listed more than once")]
    DuplicateMinePosition(usize),

    #[error("A round is already in progress")]
    RoundInProgress,

    #[error("No round is active")]
    NoActiveRound,

    #[error("Cannot cash out before revealing a cell")]
    NothingRevealed,

    #[error("Bet {bet:.2} exceeds balance {balance:.2}")]
    InsufficientFunds { bet: f64, balance: f64 },

    #[error("Bet {bet:.2} outside allowed range [{min:.2}, {max:.2}]")]
    BetOutOfRange { bet: f64, min: f64, max: f64 },
}

/// Monetary input sanitizer errors
#[derive(Debug, thiserror::Error)]
pub enum AmountParseError {
    #[error("Amount is empty")]
    Empty,

    #[error("Amount '{0}' contains more than one decimal separator")]
    MultipleSeparators(String),

    #[error("Amount '{0}' is not a valid number")]
    NotANumber(String),

    #[error("Amount '{0}' is negative")]
    Negative(String),
}

/// Round history log errors
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to append to history file {path}: {source}")]
    AppendFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize round record: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

/// Convenience type alias for Results
pub type MinefieldResult<T> = Result<T, MinefieldError>;
