//! Round engine: board state, mine placement, odds, and the round
//! state machine.

pub mod board;
pub mod odds;
pub mod round;
pub mod types;

pub use board::Board;
pub use odds::cashout_multiplier;
pub use round::RoundEngine;
pub use types::{
    Cashout, Cell, CellIndex, MineCount, RevealOutcome, RoundOutcome, RoundPhase, GRID_CELLS,
};
