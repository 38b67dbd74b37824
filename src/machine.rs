//! The ATM session state machine.
//!
//! A session moves through `Idle -> CardPresented -> OperationSelection ->
//! Transacting` as the customer inserts a card, authenticates, and picks an
//! operation. Every event handler matches on the current state; events that
//! are illegal in that state come back as [`Outcome::Rejected`] with no
//! state change. After a handler mutates the session, the next state is
//! recomputed from the session fields by a pure function rather than
//! hard-coded per transition.

use crate::account::{Account, AccountStore};
use crate::card::Card;
use crate::error::{AtmError, Result};
use crate::inventory::{CashInventory, Denomination};
use crate::money::Money;
use log::{debug, warn};
use std::fmt;

/// The four session states of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmState {
    /// No card inserted; waiting for a customer.
    Idle,
    /// Card inserted; waiting for the PIN.
    CardPresented,
    /// Authenticated; waiting for an operation choice.
    OperationSelection,
    /// Operation chosen; waiting for execution.
    Transacting,
}

impl fmt::Display for AtmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AtmState::Idle => "idle",
            AtmState::CardPresented => "awaiting PIN",
            AtmState::OperationSelection => "awaiting operation selection",
            AtmState::Transacting => "transacting",
        };
        write!(f, "{}", name)
    }
}

/// An operation the customer can select for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    WithdrawCash,
    CheckBalance,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::WithdrawCash => "withdraw cash",
            Operation::CheckBalance => "check balance",
        };
        write!(f, "{}", name)
    }
}

/// The kinds of external events a session accepts, used in rejection
/// reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    InsertCard,
    EnterPin,
    SelectOperation,
    Execute,
    ReturnCard,
    Cancel,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::InsertCard => "insert a card",
            EventKind::EnterPin => "enter a PIN",
            EventKind::SelectOperation => "select an operation",
            EventKind::Execute => "execute a transaction",
            EventKind::ReturnCard => "return the card",
            EventKind::Cancel => "cancel",
        };
        write!(f, "{}", name)
    }
}

/// The reported result of delivering one event to the session.
///
/// Rejections and business-rule failures are ordinary outcomes, not
/// errors: the terminal stays usable after every one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Card stored; session now awaits the PIN.
    CardAccepted,
    /// PIN matched; the linked account is bound to the session.
    PinAccepted,
    /// PIN mismatch; session unchanged, the customer may retry.
    InvalidPin,
    /// Operation stored for the session.
    OperationSelected(Operation),
    /// Balance inquiry result.
    Balance(Money),
    /// Withdrawal succeeded; bills handed out, largest denomination first.
    CashDispensed(Vec<(Denomination, u32)>),
    /// Withdrawal refused: the account balance does not cover the amount.
    InsufficientFunds,
    /// Withdrawal refused: the terminal's aggregate cash does not cover
    /// the amount. The account debit was compensated.
    InsufficientTerminalCash,
    /// Withdrawal refused: no exact bill breakdown for the amount (or the
    /// amount is not a non-negative whole number of currency units). The
    /// account debit was compensated.
    ExactAmountUnavailable,
    /// Card returned; session reset to idle.
    CardReturned,
    /// Session cancelled; card returned and session reset to idle.
    Cancelled,
    /// The event is illegal in the current state; nothing changed.
    Rejected { event: EventKind, state: AtmState },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::CardAccepted => write!(f, "card accepted, please enter your PIN"),
            Outcome::PinAccepted => write!(f, "PIN accepted, please select an operation"),
            Outcome::InvalidPin => write!(f, "invalid PIN, please try again"),
            Outcome::OperationSelected(operation) => {
                write!(f, "selected operation: {}", operation)
            }
            Outcome::Balance(balance) => write!(f, "your current balance is ${}", balance),
            Outcome::CashDispensed(bills) => {
                write!(f, "please collect your cash:")?;
                for (denomination, count) in bills {
                    write!(f, " {} x {}", count, denomination)?;
                }
                Ok(())
            }
            Outcome::InsufficientFunds => write!(f, "insufficient funds in account"),
            Outcome::InsufficientTerminalCash => write!(f, "insufficient cash in terminal"),
            Outcome::ExactAmountUnavailable => {
                write!(f, "cannot dispense the exact amount with the bills available")
            }
            Outcome::CardReturned => write!(f, "card returned to customer"),
            Outcome::Cancelled => write!(f, "operation cancelled, card returned to customer"),
            Outcome::Rejected { event, state } => {
                write!(f, "cannot {} while the terminal is {}", event, state)
            }
        }
    }
}

/// Immutable snapshot of the session fields that drive state recomputation.
#[derive(Debug, Clone, Copy)]
struct SessionFields {
    has_card: bool,
    has_account: bool,
    has_operation: bool,
}

/// Pure next-state function, evaluated top-down in priority order: a
/// missing card always wins and forces `Idle`, regardless of the other
/// fields.
fn next_state(fields: SessionFields) -> AtmState {
    if !fields.has_card {
        AtmState::Idle
    } else if !fields.has_account {
        AtmState::CardPresented
    } else if !fields.has_operation {
        AtmState::OperationSelection
    } else {
        AtmState::Transacting
    }
}

/// One ATM terminal: the session context plus its collaborators.
///
/// Sessions are strictly sequential: every event handler takes `&mut self`
/// and runs to completion, so one active transaction per terminal is
/// structural.
#[derive(Debug)]
pub struct AtmMachine {
    state: AtmState,
    card: Option<Card>,
    /// Number of the account bound after a successful PIN check.
    account_number: Option<String>,
    operation: Option<Operation>,
    accounts: AccountStore,
    inventory: CashInventory,
}

impl AtmMachine {
    /// Creates a terminal with the canonical starting cash stock.
    pub fn new() -> Self {
        AtmMachine::with_inventory(CashInventory::new())
    }

    /// Creates a terminal with a custom cash stock.
    pub fn with_inventory(inventory: CashInventory) -> Self {
        AtmMachine {
            state: AtmState::Idle,
            card: None,
            account_number: None,
            operation: None,
            accounts: AccountStore::new(),
            inventory,
        }
    }

    /// Registers an account with the terminal's account store.
    pub fn add_account(&mut self, account: Account) {
        self.accounts.insert(account);
    }

    /// Looks up a registered account.
    pub fn account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Current session state.
    pub fn state(&self) -> AtmState {
        self.state
    }

    /// Read access to the cash inventory.
    pub fn inventory(&self) -> &CashInventory {
        &self.inventory
    }

    /// Adds bills to the terminal's stock.
    pub fn restock(&mut self, denomination: Denomination, count: u32) {
        self.inventory.add(denomination, count);
    }

    /// Recomputes the session state from the current fields.
    ///
    /// Idempotent: with no intervening event, a second call observes the
    /// same fields and lands in the same state.
    pub fn advance_state(&mut self) {
        let fields = SessionFields {
            has_card: self.card.is_some(),
            has_account: self.account_number.is_some(),
            has_operation: self.operation.is_some(),
        };
        let next = next_state(fields);
        if next != self.state {
            debug!("session state: {} -> {}", self.state, next);
            self.state = next;
        }
    }

    /// Clears card, bound account, and operation together and returns the
    /// session to idle. No partial resets.
    fn reset(&mut self) {
        self.card = None;
        self.account_number = None;
        self.operation = None;
        self.state = AtmState::Idle;
    }

    fn reject(&self, event: EventKind) -> Outcome {
        warn!("rejected: cannot {} while {}", event, self.state);
        Outcome::Rejected {
            event,
            state: self.state,
        }
    }

    /// Customer inserts a card. Legal only while idle.
    pub fn insert_card(&mut self, card: Card) -> Result<Outcome> {
        match self.state {
            AtmState::Idle => {
                debug!("card {} inserted", card.number());
                self.card = Some(card);
                self.advance_state();
                Ok(Outcome::CardAccepted)
            }
            _ => Ok(self.reject(EventKind::InsertCard)),
        }
    }

    /// Customer enters a PIN. Legal only with a card awaiting its PIN.
    ///
    /// A matching PIN binds the card's linked account to the session; a
    /// mismatch leaves the session unchanged and the customer may retry.
    ///
    /// # Errors
    ///
    /// Returns [`AtmError::UnknownAccount`] when the PIN matches but the
    /// card links to an account the store does not hold. The session stays
    /// in the same state.
    pub fn enter_pin(&mut self, pin: u32) -> Result<Outcome> {
        match self.state {
            AtmState::CardPresented => {
                // Safety: CardPresented is only reachable with a card stored
                let card = self.card.as_ref().expect("card present while awaiting PIN");
                if !card.validate_pin(pin) {
                    warn!("invalid PIN for card {}", card.number());
                    return Ok(Outcome::InvalidPin);
                }

                let number = card.account_number().to_string();
                if self.accounts.get(&number).is_none() {
                    return Err(AtmError::UnknownAccount(number));
                }

                debug!("PIN accepted, account {} bound to session", number);
                self.account_number = Some(number);
                self.advance_state();
                Ok(Outcome::PinAccepted)
            }
            _ => Ok(self.reject(EventKind::EnterPin)),
        }
    }

    /// Customer selects the operation for this transaction.
    pub fn select_operation(&mut self, operation: Operation) -> Result<Outcome> {
        match self.state {
            AtmState::OperationSelection => {
                debug!("operation selected: {}", operation);
                self.operation = Some(operation);
                self.advance_state();
                Ok(Outcome::OperationSelected(operation))
            }
            _ => Ok(self.reject(EventKind::SelectOperation)),
        }
    }

    /// Executes the selected operation.
    ///
    /// `amount` is the withdrawal amount; balance inquiries ignore it. On
    /// completion or on any business-rule failure the session returns to
    /// operation selection with the selected operation cleared, so the
    /// customer can run another transaction on the same card.
    pub fn execute(&mut self, amount: Money) -> Result<Outcome> {
        match self.state {
            AtmState::Transacting => {
                // Safety: Transacting is only reachable with an operation selected
                let operation = self
                    .operation
                    .take()
                    .expect("operation selected while transacting");
                let outcome = match operation {
                    Operation::CheckBalance => self.check_balance()?,
                    Operation::WithdrawCash => self.withdraw_cash(amount)?,
                };
                self.advance_state();
                Ok(outcome)
            }
            _ => Ok(self.reject(EventKind::Execute)),
        }
    }

    /// Returns the card and resets the session. Rejected while idle.
    pub fn return_card(&mut self) -> Result<Outcome> {
        match self.state {
            AtmState::Idle => Ok(self.reject(EventKind::ReturnCard)),
            _ => {
                debug!("card returned, session reset");
                self.reset();
                Ok(Outcome::CardReturned)
            }
        }
    }

    /// Cancels the session, returning the card. Rejected while idle.
    pub fn cancel(&mut self) -> Result<Outcome> {
        match self.state {
            AtmState::Idle => Ok(self.reject(EventKind::Cancel)),
            _ => {
                debug!("session cancelled, card returned");
                self.reset();
                Ok(Outcome::Cancelled)
            }
        }
    }

    fn bound_account_mut(&mut self) -> Result<&mut Account> {
        // Safety: Transacting is only reachable with an account bound
        let number = self
            .account_number
            .clone()
            .expect("account bound while transacting");
        self.accounts
            .get_mut(&number)
            .ok_or(AtmError::UnknownAccount(number))
    }

    fn check_balance(&mut self) -> Result<Outcome> {
        let balance = self.bound_account_mut()?.balance();
        debug!("balance inquiry: {}", balance);
        Ok(Outcome::Balance(balance))
    }

    /// The two-phase compensating-action withdrawal.
    ///
    /// The account is debited first; if any later step fails (whole-unit
    /// screen, aggregate cash check, exact breakdown) the debit is undone
    /// with a compensating deposit. There is no shared lock between the
    /// account and the inventory, which is fine only because sessions are
    /// single-threaded; a concurrent redesign would need to serialize the
    /// whole sequence per account and per inventory.
    fn withdraw_cash(&mut self, amount: Money) -> Result<Outcome> {
        // Field-level borrows: the account stays borrowed across the
        // inventory calls below, which is fine because store and inventory
        // are separate fields.
        // Safety: Transacting is only reachable with an account bound
        let number = self
            .account_number
            .clone()
            .expect("account bound while transacting");
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(AtmError::UnknownAccount(number))?;

        if !account.withdraw(amount) {
            warn!("withdrawal of {} refused: insufficient funds", amount);
            return Ok(Outcome::InsufficientFunds);
        }

        let units = match amount.as_units() {
            Some(units) => units,
            None => {
                account.deposit(amount);
                warn!("withdrawal of {} refused: not a whole non-negative amount", amount);
                return Ok(Outcome::ExactAmountUnavailable);
            }
        };

        if !self.inventory.has_sufficient_total(units) {
            account.deposit(amount);
            warn!("withdrawal of {} refused: insufficient terminal cash", amount);
            return Ok(Outcome::InsufficientTerminalCash);
        }

        match self.inventory.dispense(units) {
            Some(bills) => {
                let breakdown = Denomination::DESCENDING
                    .iter()
                    .filter_map(|&denomination| {
                        bills.get(&denomination).map(|&count| (denomination, count))
                    })
                    .collect();
                debug!("withdrawal of {} dispensed", amount);
                Ok(Outcome::CashDispensed(breakdown))
            }
            None => {
                account.deposit(amount);
                warn!("withdrawal of {} refused: no exact breakdown", amount);
                Ok(Outcome::ExactAmountUnavailable)
            }
        }
    }
}

impl Default for AtmMachine {
    fn default() -> Self {
        Self::new()
    }
}
