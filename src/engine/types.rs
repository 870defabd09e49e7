use crate::errors::RoundError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board (5x5)
pub const GRID_CELLS: usize = 25;

/// Validated mine count, always 1..=24 on a 25-cell board.
///
/// Out-of-range counts are unrepresentable past the constructor, so the
/// board and odds code never re-checks the range.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct MineCount(u8);

impl MineCount {
    pub fn new(count: u8) -> Result<Self, RoundError> {
        if count == 0 || count as usize >= GRID_CELLS {
            return Err(RoundError::InvalidMineCount(count));
        }
        Ok(Self(count))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of safe cells implied by this mine count
    pub fn safe_cells(self) -> usize {
        GRID_CELLS - self.0 as usize
    }
}

impl TryFrom<u8> for MineCount {
    type Error = RoundError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<MineCount> for u8 {
    fn from(count: MineCount) -> u8 {
        count.0
    }
}

impl fmt::Display for MineCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated board cell index, always < GRID_CELLS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellIndex(usize);

impl CellIndex {
    pub fn new(index: usize) -> Result<Self, RoundError> {
        if index >= GRID_CELLS {
            return Err(RoundError::CellOutOfRange(index, GRID_CELLS));
        }
        Ok(Self(index))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// A single board cell label
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Safe,
    Mine,
}

/// Round lifecycle phase
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Idle,
    Active,
    Lost,
    Won,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::Idle => write!(f, "idle"),
            RoundPhase::Active => write!(f, "active"),
            RoundPhase::Lost => write!(f, "lost"),
            RoundPhase::Won => write!(f, "won"),
        }
    }
}

/// How a finished round ended
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Won,
    Lost,
}

/// Payout details for a won round
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cashout {
    pub multiplier: f64,
    pub payout: f64,
}

/// Result of revealing a single cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Safe cell; round continues at the new multiplier
    Safe {
        revealed_safe: usize,
        multiplier: f64,
    },
    /// Last safe cell found; round won at the full multiplier
    AllSafeRevealed(Cashout),
    /// Mine hit; bet forfeited
    Mine,
    /// Cell was already open; nothing changed
    AlreadyRevealed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mine_count_bounds() {
        assert!(MineCount::new(0).is_err());
        assert!(MineCount::new(25).is_err());
        assert!(MineCount::new(1).is_ok());
        assert!(MineCount::new(24).is_ok());
    }

    #[test]
    fn test_mine_count_safe_cells() {
        assert_eq!(MineCount::new(3).unwrap().safe_cells(), 22);
        assert_eq!(MineCount::new(24).unwrap().safe_cells(), 1);
    }

    #[test]
    fn test_cell_index_bounds() {
        assert!(CellIndex::new(24).is_ok());
        assert!(CellIndex::new(25).is_err());
    }

    #[test]
    fn test_mine_count_serde() {
        let count: MineCount = serde_json::from_str("5").unwrap();
        assert_eq!(count.get(), 5);
        assert!(serde_json::from_str::<MineCount>("0").is_err());
        assert_eq!(serde_json::to_string(&count).unwrap(), "5");
    }
}
