//! Minefield - Mines-Style Betting Game Engine
//!
//! A 5x5 board hides a configurable number of mines. The player stakes a
//! bet, reveals cells one at a time, and may cash out at a multiplier
//! derived from fair hypergeometric odds scaled by a house factor. The
//! balance lives in a flat file and survives restarts.
//!
//! All state mutation is single-threaded and command-driven; the CLI in
//! `main.rs` is one possible frontend over [`controller::GameController`].

pub mod amount;
pub mod config;
pub mod controller;
pub mod engine;
pub mod errors;
pub mod history;
pub mod wallet;

pub use config::{MinefieldConfig, PlacementPolicy};
pub use controller::GameController;
pub use engine::{Cashout, MineCount, RevealOutcome, RoundEngine, RoundPhase, GRID_CELLS};
pub use errors::{MinefieldError, MinefieldResult};
pub use wallet::BalanceStore;
