//! Flat-file balance store.
//!
//! Holds a single non-negative monetary value, rounded to two decimals
//! after every mutation. Persistence is a plain-text decimal string;
//! loads tolerate either `.` or `,` as the decimal separator since older
//! writers used whatever the host locale produced. Writes go through a
//! temp file plus rename so a crash mid-write cannot truncate the balance.
//!
//! Single-threaded, single-process access only; there is no locking.

use crate::amount::{format_amount, parse_amount, round2};
use crate::config::{CorruptBalancePolicy, WalletConfig};
use crate::errors::WalletError;
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persistent single-value balance store.
pub struct BalanceStore {
    path: PathBuf,
    balance: f64,
}

impl BalanceStore {
    /// Open the store, creating the balance file with the configured
    /// default if it does not exist yet.
    ///
    /// A file that exists but does not parse is handled per the configured
    /// policy: reject (startup error) or reset to the default with a
    /// logged warning. There is deliberately no silent-zero path.
    pub fn open(config: &WalletConfig) -> Result<Self, WalletError> {
        let path = PathBuf::from(&config.balance_file);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No balance file at {}; initializing with {}",
                    path.display(),
                    format_amount(config.default_balance)
                );
                let store = Self {
                    path,
                    balance: round2(config.default_balance),
                };
                store.persist()?;
                return Ok(store);
            }
            Err(source) => return Err(WalletError::ReadFailed { path, source }),
        };

        let balance = match parse_amount(&contents) {
            Ok(value) => round2(value),
            Err(parse_error) => match config.on_corrupt {
                CorruptBalancePolicy::Reject => {
                    return Err(WalletError::Corrupt {
                        path,
                        reason: parse_error.to_string(),
                    });
                }
                CorruptBalancePolicy::ResetToDefault => {
                    warn!(
                        "Balance file {} is corrupt ({}); resetting to default {}",
                        path.display(),
                        parse_error,
                        format_amount(config.default_balance)
                    );
                    round2(config.default_balance)
                }
            },
        };

        let store = Self { path, balance };
        store.persist()?;
        Ok(store)
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Subtract a bet from the balance. Sufficiency (`amount <= balance`)
    /// is the caller's contract, checked before any round starts.
    pub fn debit(&mut self, amount: f64) {
        self.balance = round2(self.balance - amount);
    }

    /// Add a payout to the balance.
    pub fn credit(&mut self, amount: f64) {
        self.balance = round2(self.balance + amount);
    }

    /// Write the current balance to stable storage.
    pub fn persist(&self) -> Result<(), WalletError> {
        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            std::fs::create_dir_all(parent).map_err(|source| WalletError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;
        }

        let write_failed = |source: std::io::Error| WalletError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = parent.unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(&write_failed)?;
        temp.write_all(format_amount(self.balance).as_bytes())
            .map_err(&write_failed)?;
        temp.persist(&self.path)
            .map_err(|persist_error| write_failed(persist_error.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(dir: &Path, default_balance: f64) -> WalletConfig {
        WalletConfig {
            balance_file: dir.join("balance.txt").to_string_lossy().into_owned(),
            default_balance,
            on_corrupt: CorruptBalancePolicy::Reject,
        }
    }

    #[test]
    fn test_missing_file_initializes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path(), 100.0);
        let store = BalanceStore::open(&config).unwrap();
        assert_eq!(store.balance(), 100.0);
        // The default is persisted immediately, not just held in memory.
        let on_disk = std::fs::read_to_string(dir.path().join("balance.txt")).unwrap();
        assert_eq!(on_disk, "100.00");
    }

    #[test]
    fn test_debit_credit_round_to_cents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BalanceStore::open(&config_at(dir.path(), 10.0)).unwrap();
        store.debit(3.333);
        assert_eq!(store.balance(), 6.67);
        store.credit(1.111);
        assert_eq!(store.balance(), 7.78);
    }

    #[test]
    fn test_comma_separated_balance_loads() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path(), 0.0);
        std::fs::write(dir.path().join("balance.txt"), "47,25").unwrap();
        let store = BalanceStore::open(&config).unwrap();
        assert_eq!(store.balance(), 47.25);
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path(), 100.0);
        std::fs::write(dir.path().join("balance.txt"), "not a number").unwrap();
        match BalanceStore::open(&config) {
            Err(WalletError::Corrupt { .. }) => {}
            other => panic!("Expected corrupt error, got {:?}", other.map(|s| s.balance())),
        }
    }

    #[test]
    fn test_corrupt_file_reset_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_at(dir.path(), 100.0);
        config.on_corrupt = CorruptBalancePolicy::ResetToDefault;
        std::fs::write(dir.path().join("balance.txt"), "garbage").unwrap();
        let store = BalanceStore::open(&config).unwrap();
        assert_eq!(store.balance(), 100.0);
    }

    #[test]
    fn test_negative_stored_balance_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_at(dir.path(), 100.0);
        std::fs::write(dir.path().join("balance.txt"), "-5.00").unwrap();
        assert!(matches!(
            BalanceStore::open(&config),
            Err(WalletError::Corrupt { .. })
        ));
    }
}
