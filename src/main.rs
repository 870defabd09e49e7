//! Minefield - interactive CLI frontend
//!
//! Plays the mines betting game over stdin commands against the flat-file
//! wallet. One command per line:
//!
//!   start <bet> [mines]   place a bet and start a round; mine count
//!                         falls back to the configured default
//!   reveal <cell>         reveal a cell (0..24, row-major)
//!   cashout               take the current multiplier
//!   balance               show the wallet balance
//!   stats                 show session statistics
//!   quit

use clap::Parser;
use minefield::{
    engine::{CellIndex, GRID_CELLS},
    GameController, MinefieldConfig, MinefieldError, RevealOutcome, RoundPhase,
};
use minefield::wallet::BalanceStore;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Mines-style betting game")]
struct Args {
    /// TOML config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the balance file location from the config
    #[arg(long)]
    balance_file: Option<PathBuf>,

    /// Use promotional rules (no house edge)
    #[arg(long)]
    promotional: bool,
}

fn main() -> Result<(), MinefieldError> {
    env_logger::init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => MinefieldConfig::load_from_file(path)?,
        None if args.promotional => MinefieldConfig::promotional(),
        None => MinefieldConfig::classic(),
    };
    if let Some(balance_file) = &args.balance_file {
        config.wallet.balance_file = balance_file.to_string_lossy().into_owned();
    }
    config.validate()?;

    let wallet = BalanceStore::open(&config.wallet)?;
    let mut controller = GameController::new(config, wallet);

    println!("Minefield. Balance: {:.2}", controller.balance());
    println!("Commands: start <bet> [mines] | reveal <cell> | cashout | balance | stats | quit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["balance"] => println!("Balance: {:.2}", controller.balance()),
            ["stats"] => print_stats(&controller),
            ["start", bet] => start_round(&mut controller, bet, None),
            ["start", bet, mines] => match mines.parse::<u8>() {
                Ok(mine_count) => start_round(&mut controller, bet, Some(mine_count)),
                Err(_) => println!("Rejected: mine count '{}' is not a number", mines),
            },
            ["reveal", cell] => match cell.parse::<usize>() {
                Ok(index) => match controller.reveal(index) {
                    Ok(outcome) => report_reveal(&controller, outcome),
                    Err(error) => println!("Rejected: {}", error),
                },
                Err(_) => println!("Rejected: cell '{}' is not a number", cell),
            },
            ["cashout"] => match controller.cash_out() {
                Ok(cashout) => {
                    println!(
                        "Cashed out at x{:.2} for {:.2}. Balance: {:.2}",
                        cashout.multiplier,
                        cashout.payout,
                        controller.balance()
                    );
                    print_board(&controller);
                }
                Err(error) => println!("Rejected: {}", error),
            },
            _ => println!("Unknown command"),
        }
    }

    println!("Final balance: {:.2}", controller.balance());
    Ok(())
}

fn start_round(controller: &mut GameController, bet: &str, mine_count: Option<u8>) {
    match controller.place_bet(bet, mine_count) {
        Ok(started) => {
            println!(
                "Round started: bet {:.2}, {} mines, balance {:.2}",
                started.bet, started.mine_count, started.balance
            );
            print_board(controller);
        }
        Err(error) => println!("Rejected: {}", error),
    }
}

fn print_stats(controller: &GameController) {
    let stats = controller.stats();
    println!(
        "Rounds: {} ({} won, {} lost)",
        stats.rounds_played, stats.rounds_won, stats.rounds_lost
    );
    println!(
        "Wagered: {:.2}, paid out: {:.2}, house profit: {:.2}",
        stats.total_wagered,
        stats.total_paid_out,
        stats.house_profit()
    );
}

fn report_reveal(controller: &GameController, outcome: RevealOutcome) {
    match outcome {
        RevealOutcome::Safe {
            revealed_safe,
            multiplier,
        } => {
            println!(
                "Safe. {} revealed, cashout at x{:.2}",
                revealed_safe, multiplier
            );
            print_board(controller);
        }
        RevealOutcome::Mine => {
            println!("Mine! Bet forfeited. Balance: {:.2}", controller.balance());
            print_board(controller);
        }
        RevealOutcome::AllSafeRevealed(cashout) => {
            println!(
                "Board cleared! Paid {:.2} at x{:.2}. Balance: {:.2}",
                cashout.payout,
                cashout.multiplier,
                controller.balance()
            );
            print_board(controller);
        }
        RevealOutcome::AlreadyRevealed => println!("Cell already open"),
    }
}

/// Render the 5x5 board: `?` hidden, `.` revealed safe, `*` mine
/// (mines only shown once the round is over).
fn print_board(controller: &GameController) {
    let engine = controller.engine();
    let finished_mines = engine.finished_mine_positions().unwrap_or_default();

    for row in 0..5 {
        let mut line = String::new();
        for col in 0..5 {
            let index = row * 5 + col;
            let cell = CellIndex::new(index).expect("index within grid");
            let symbol = if finished_mines.contains(&index) {
                '*'
            } else if engine.is_revealed(cell) {
                '.'
            } else {
                '?'
            };
            line.push(symbol);
            line.push(' ');
        }
        println!("  {}", line.trim_end());
    }

    if engine.phase() == RoundPhase::Active {
        let remaining = engine
            .mine_count()
            .map(|count| count.safe_cells() - engine.revealed_safe())
            .unwrap_or(GRID_CELLS);
        println!(
            "  {} safe left, cashout at x{:.2}",
            remaining,
            controller.multiplier()
        );
    }
}
