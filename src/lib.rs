//! # ATM Terminal
//!
//! A single-terminal ATM simulator: card authentication, operation
//! selection, and execution of withdrawals and balance inquiries against an
//! in-memory account store and a physical cash inventory.
//!
//! ## Design Principles
//!
//! - **Explicit state machine**: session states are a plain enum; every
//!   event handler matches on the current state and illegal events are
//!   reported, never panicked on
//! - **Recomputed transitions**: the next state is a pure function of the
//!   session fields, so advancing is idempotent
//! - **Atomic cash dispensing**: the greedy breakdown either fully commits
//!   or leaves the inventory untouched
//! - **Compensating actions**: a debited account is credited back whenever
//!   the cash leg of a withdrawal fails
//! - **Fixed-point arithmetic**: balances use 2 decimal places via
//!   `rust_decimal`
//!
//! ## Example
//!
//! ```
//! use atm_terminal::{Account, AtmMachine, Card, Money, Operation};
//! use std::str::FromStr;
//!
//! let mut atm = AtmMachine::new();
//! atm.add_account(Account::new("654321", Money::from_str("500").unwrap()));
//!
//! atm.insert_card(Card::new("4000-1234", 1234, "654321")).unwrap();
//! atm.enter_pin(1234).unwrap();
//! atm.select_operation(Operation::WithdrawCash).unwrap();
//! let outcome = atm.execute(Money::from_str("100").unwrap()).unwrap();
//! println!("{}", outcome);
//! ```

pub mod account;
pub mod card;
pub mod error;
pub mod inventory;
pub mod machine;
pub mod money;

pub use account::{Account, AccountStore};
pub use card::Card;
pub use error::{AtmError, Result};
pub use inventory::{CashInventory, Denomination};
pub use machine::{AtmMachine, AtmState, EventKind, Operation, Outcome};
pub use money::Money;
