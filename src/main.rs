//! ATM Terminal demo
//!
//! Runs a scripted customer session against a freshly stocked terminal and
//! prints each outcome.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use atm_terminal::{Account, AtmMachine, Card, Money, Operation, Outcome, Result};
use std::process;
use std::str::FromStr;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut atm = AtmMachine::new();

    atm.add_account(Account::new("123456", Money::from_str("1000.00")?));
    atm.add_account(Account::new("654321", Money::from_str("500.00")?));

    report(atm.insert_card(Card::new("4000-1234", 1234, "654321"))?);
    report(atm.enter_pin(1234)?);

    report(atm.select_operation(Operation::WithdrawCash)?);
    report(atm.execute(Money::from_str("100")?)?);

    report(atm.select_operation(Operation::CheckBalance)?);
    report(atm.execute(Money::ZERO)?);

    report(atm.return_card()?);

    Ok(())
}

fn report(outcome: Outcome) {
    println!("{}", outcome);
}
