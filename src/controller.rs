//! Game controller: sequences bet placement, reveals, and settlement
//! against the wallet.
//!
//! This is the command boundary a frontend talks to. All bet validation
//! lives here, before any money moves: the engine below assumes a valid
//! bet and the wallet below assumes sufficiency was checked.

use crate::amount::parse_amount;
use crate::config::MinefieldConfig;
use crate::engine::{
    Cashout, CellIndex, MineCount, RevealOutcome, RoundEngine, RoundOutcome, RoundPhase,
};
use crate::errors::{MinefieldResult, RoundError};
use crate::history::{RoundHistory, RoundRecord, SessionStats};
use crate::wallet::BalanceStore;
use log::{info, warn};

/// Confirmation returned when a round starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundStarted {
    pub bet: f64,
    pub mine_count: MineCount,
    /// Balance after the bet was debited
    pub balance: f64,
}

pub struct GameController {
    config: MinefieldConfig,
    engine: RoundEngine,
    wallet: BalanceStore,
    history: RoundHistory,
    stats: SessionStats,
}

impl GameController {
    pub fn new(config: MinefieldConfig, wallet: BalanceStore) -> Self {
        let engine = RoundEngine::new(config.game.house_factor, config.game.placement);
        let history = RoundHistory::from_config(&config.history);
        Self {
            config,
            engine,
            wallet,
            history,
            stats: SessionStats::default(),
        }
    }

    /// Validate a bet, debit the wallet, and start a round.
    ///
    /// A `None` mine count falls back to the configured default. On any
    /// rejection the balance is untouched and no round starts.
    pub fn place_bet(
        &mut self,
        bet_input: &str,
        mine_count: Option<u8>,
    ) -> MinefieldResult<RoundStarted> {
        if self.engine.phase() == RoundPhase::Active {
            return Err(RoundError::RoundInProgress.into());
        }

        let bet = parse_amount(bet_input)?;
        let mine_count =
            MineCount::new(mine_count.unwrap_or(self.config.game.default_mine_count))?;

        if bet < self.config.game.min_bet || bet > self.config.game.max_bet {
            return Err(RoundError::BetOutOfRange {
                bet,
                min: self.config.game.min_bet,
                max: self.config.game.max_bet,
            }
            .into());
        }

        let balance = self.wallet.balance();
        if bet > balance {
            return Err(RoundError::InsufficientFunds { bet, balance }.into());
        }

        self.wallet.debit(bet);
        self.wallet.persist()?;
        self.engine.start(bet, mine_count)?;

        info!(
            "Round started: bet {:.2}, {} mines, balance {:.2}",
            bet,
            mine_count,
            self.wallet.balance()
        );

        Ok(RoundStarted {
            bet,
            mine_count,
            balance: self.wallet.balance(),
        })
    }

    /// Reveal one cell, settling the round if it ends.
    pub fn reveal(&mut self, index: usize) -> MinefieldResult<RevealOutcome> {
        let index = CellIndex::new(index)?;
        let outcome = self.engine.reveal(index)?;

        match outcome {
            RevealOutcome::Mine => {
                info!("Mine hit; bet {:.2} forfeited", self.engine.bet());
                self.settle(RoundOutcome::Lost, 0.0)?;
            }
            RevealOutcome::AllSafeRevealed(cashout) => {
                info!(
                    "All safe cells revealed; payout {:.2} at x{:.2}",
                    cashout.payout, cashout.multiplier
                );
                self.wallet.credit(cashout.payout);
                self.settle(RoundOutcome::Won, cashout.payout)?;
            }
            RevealOutcome::Safe { .. } | RevealOutcome::AlreadyRevealed => {}
        }

        Ok(outcome)
    }

    /// Cash out the active round at the current multiplier.
    pub fn cash_out(&mut self) -> MinefieldResult<Cashout> {
        let cashout = self.engine.cash_out()?;
        info!(
            "Cashed out: payout {:.2} at x{:.2}",
            cashout.payout, cashout.multiplier
        );
        self.wallet.credit(cashout.payout);
        self.settle(RoundOutcome::Won, cashout.payout)?;
        Ok(cashout)
    }

    /// Persist the wallet and record the finished round.
    fn settle(&mut self, outcome: RoundOutcome, payout: f64) -> MinefieldResult<()> {
        self.wallet.persist()?;

        let mine_count = self
            .engine
            .mine_count()
            .expect("settled round always has a board");
        let record = RoundRecord::new(
            self.engine.bet(),
            mine_count,
            self.engine.revealed_safe(),
            self.engine.multiplier(),
            payout,
            outcome,
        );
        // A history write failure must not lose the settled wallet state.
        if let Err(history_error) = self.history.append(&record) {
            warn!("Failed to record round: {}", history_error);
        }
        self.stats.record(&record);
        Ok(())
    }

    pub fn balance(&self) -> f64 {
        self.wallet.balance()
    }

    /// Multiplier the active round would pay right now.
    pub fn multiplier(&self) -> f64 {
        self.engine.multiplier()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    #[cfg(test)]
    fn start_fixed_round(&mut self, bet_input: &str, mines: &[usize]) -> MinefieldResult<()> {
        use crate::engine::Board;
        let bet = parse_amount(bet_input)?;
        let balance = self.wallet.balance();
        if bet > balance {
            return Err(RoundError::InsufficientFunds { bet, balance }.into());
        }
        self.wallet.debit(bet);
        self.wallet.persist()?;
        self.engine.start_with_board(bet, Board::with_mines(mines)?)?;
        Ok(())
    }
}
