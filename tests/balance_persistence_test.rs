//! Test that the wallet balance survives stopping and reopening the store,
//! and that settled rounds leave the file in a loadable state.

use minefield::config::{CorruptBalancePolicy, WalletConfig};
use minefield::wallet::BalanceStore;
use minefield::{GameController, MinefieldConfig, RoundPhase};

fn wallet_config(dir: &std::path::Path, default_balance: f64) -> WalletConfig {
    WalletConfig {
        balance_file: dir.join("balance.txt").to_string_lossy().into_owned(),
        default_balance,
        on_corrupt: CorruptBalancePolicy::Reject,
    }
}

#[test]
fn test_balance_round_trips_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let config = wallet_config(dir.path(), 100.0);

    // === PHASE 1: open, mutate, persist, drop ===
    {
        let mut store = BalanceStore::open(&config).unwrap();
        assert_eq!(store.balance(), 100.0);
        store.debit(12.34);
        store.credit(0.5);
        store.persist().unwrap();
        assert_eq!(store.balance(), 88.16);
    }

    // === PHASE 2: reopen and verify the value survived ===
    let store = BalanceStore::open(&config).unwrap();
    assert_eq!(store.balance(), 88.16);
}

#[test]
fn test_fractional_values_survive_two_decimal_rounding() {
    let dir = tempfile::tempdir().unwrap();
    let config = wallet_config(dir.path(), 0.0);

    {
        let mut store = BalanceStore::open(&config).unwrap();
        store.credit(19.0 / 3.0); // 6.333... -> 6.33
        store.persist().unwrap();
    }

    let store = BalanceStore::open(&config).unwrap();
    assert_eq!(store.balance(), 6.33);
}

#[test]
fn test_settled_round_balance_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = wallet_config(dir.path(), 50.0);

    {
        let wallet = BalanceStore::open(&config).unwrap();
        let mut game_config = MinefieldConfig::default();
        game_config.wallet = config.clone();
        game_config.history.file =
            dir.path().join("rounds.jsonl").to_string_lossy().into_owned();

        let mut controller = GameController::new(game_config, wallet);
        controller.place_bet("10", Some(3)).unwrap();

        // Reveal in order until the round ends one way or the other.
        for index in 0..25 {
            if controller.engine().phase() != RoundPhase::Active {
                break;
            }
            controller.reveal(index).unwrap();
        }

        // Settlement already persisted; intentionally no explicit persist here.
        let expected = controller.balance();
        drop(controller);

        let reopened = BalanceStore::open(&config).unwrap();
        assert_eq!(reopened.balance(), expected);
    }
}

#[test]
fn test_corrupt_balance_policies() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = wallet_config(dir.path(), 25.0);
    std::fs::write(dir.path().join("balance.txt"), "12;34").unwrap();

    assert!(BalanceStore::open(&config).is_err());

    config.on_corrupt = CorruptBalancePolicy::ResetToDefault;
    let store = BalanceStore::open(&config).unwrap();
    assert_eq!(store.balance(), 25.0);

    // The reset value is persisted, so a later strict open succeeds.
    config.on_corrupt = CorruptBalancePolicy::Reject;
    let store = BalanceStore::open(&config).unwrap();
    assert_eq!(store.balance(), 25.0);
}
