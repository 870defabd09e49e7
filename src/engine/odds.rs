//! Cashout odds computation.
//!
//! The fair multiplier is the reciprocal of the hypergeometric probability
//! of surviving `revealed_safe` reveals with `mine_count` mines hidden on
//! the board, scaled by the configured house factor. It is recomputed from
//! live round state on every call, never cached.

use crate::amount::round2;
use crate::engine::types::{MineCount, GRID_CELLS};

/// Multiplier applied to the bet if the player cashes out after
/// `revealed_safe` safe reveals.
///
/// `product over i in 0..mines of (25 - revealed - i) / (25 - i)` is the
/// probability that none of the revealed cells was a mine; the payout is
/// `house_factor` over that, rounded to two decimals.
pub fn cashout_multiplier(revealed_safe: usize, mine_count: MineCount, house_factor: f64) -> f64 {
    // More reveals than safe cells cannot occur in a round; for a caller
    // that asks anyway, answer as if nothing were revealed rather than
    // wrap the subtraction below.
    if revealed_safe > mine_count.safe_cells() {
        return round2(house_factor);
    }

    let mut survival_probability = 1.0;
    for i in 0..mine_count.get() as usize {
        survival_probability *=
            (GRID_CELLS - revealed_safe - i) as f64 / (GRID_CELLS - i) as f64;
    }

    round2(house_factor / survival_probability)
}
