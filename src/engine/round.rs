//! Round state machine.
//!
//! Lifecycle: `Idle -> Active -> {Lost, Won}`, back to `Active` on the next
//! `start`. A round is won either by cashing out with at least one reveal
//! or automatically once every safe cell is open.

use crate::amount::round2;
use crate::config::PlacementPolicy;
use crate::engine::board::Board;
use crate::engine::odds::cashout_multiplier;
use crate::engine::types::{
    Cashout, Cell, CellIndex, MineCount, RevealOutcome, RoundPhase, GRID_CELLS,
};
use crate::errors::RoundError;
use rand::Rng;

/// Manages one round's board, reveal progress, and payout odds.
pub struct RoundEngine {
    house_factor: f64,
    placement: PlacementPolicy,
    phase: RoundPhase,
    board: Option<Board>,
    revealed: [bool; GRID_CELLS],
    revealed_safe: usize,
    bet: f64,
}

impl RoundEngine {
    pub fn new(house_factor: f64, placement: PlacementPolicy) -> Self {
        Self {
            house_factor,
            placement,
            phase: RoundPhase::Idle,
            board: None,
            revealed: [false; GRID_CELLS],
            revealed_safe: 0,
            bet: 0.0,
        }
    }

    /// Start a round: place mines, reset the reveal counter, go Active.
    ///
    /// Bet validity (positive, within limits, covered by the balance) is the
    /// caller's contract; the engine only sequences the round.
    pub fn start(&mut self, bet: f64, mine_count: MineCount) -> Result<(), RoundError> {
        self.start_with_rng(bet, mine_count, &mut rand::thread_rng())
    }

    pub fn start_with_rng(
        &mut self,
        bet: f64,
        mine_count: MineCount,
        rng: &mut impl Rng,
    ) -> Result<(), RoundError> {
        let board = Board::place(mine_count, self.placement, rng);
        self.start_with_board(bet, board)
    }

    /// Start against a pre-built board. Used for replay and tests.
    pub fn start_with_board(&mut self, bet: f64, board: Board) -> Result<(), RoundError> {
        if self.phase == RoundPhase::Active {
            return Err(RoundError::RoundInProgress);
        }
        self.board = Some(board);
        self.revealed = [false; GRID_CELLS];
        self.revealed_safe = 0;
        self.bet = bet;
        self.phase = RoundPhase::Active;
        Ok(())
    }

    /// Reveal one cell.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome, RoundError> {
        if self.phase != RoundPhase::Active {
            return Err(RoundError::NoActiveRound);
        }
        if self.revealed[index.get()] {
            return Ok(RevealOutcome::AlreadyRevealed);
        }
        self.revealed[index.get()] = true;

        let board = self.board.as_ref().expect("active round always has a board");
        match board.cell(index) {
            Cell::Mine => {
                self.phase = RoundPhase::Lost;
                Ok(RevealOutcome::Mine)
            }
            Cell::Safe => {
                self.revealed_safe += 1;
                if self.revealed_safe == board.mine_count().safe_cells() {
                    let cashout = self.settle_won();
                    Ok(RevealOutcome::AllSafeRevealed(cashout))
                } else {
                    Ok(RevealOutcome::Safe {
                        revealed_safe: self.revealed_safe,
                        multiplier: self.multiplier(),
                    })
                }
            }
        }
    }

    /// Cash out at the current multiplier. Requires at least one reveal.
    pub fn cash_out(&mut self) -> Result<Cashout, RoundError> {
        if self.phase != RoundPhase::Active {
            return Err(RoundError::NoActiveRound);
        }
        if self.revealed_safe == 0 {
            return Err(RoundError::NothingRevealed);
        }
        Ok(self.settle_won())
    }

    fn settle_won(&mut self) -> Cashout {
        let multiplier = self.multiplier();
        self.phase = RoundPhase::Won;
        Cashout {
            multiplier,
            payout: round2(self.bet * multiplier),
        }
    }

    /// Current cashout multiplier, recomputed from live state.
    pub fn multiplier(&self) -> f64 {
        match &self.board {
            Some(board) => {
                cashout_multiplier(self.revealed_safe, board.mine_count(), self.house_factor)
            }
            None => self.house_factor,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn revealed_safe(&self) -> usize {
        self.revealed_safe
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.revealed[index.get()]
    }

    pub fn mine_count(&self) -> Option<MineCount> {
        self.board.as_ref().map(|board| board.mine_count())
    }

    /// Mine positions of the finished round, for display after a loss or win.
    /// Hidden while the round is active.
    pub fn finished_mine_positions(&self) -> Option<Vec<usize>> {
        match self.phase {
            RoundPhase::Lost | RoundPhase::Won => {
                self.board.as_ref().map(|board| board.mine_positions())
            }
            _ => None,
        }
    }
}
