//! Customer account model and the keyed account store.

use crate::money::Money;
use serde::Serialize;
use std::collections::HashMap;

/// A customer's account: identifier plus current balance.
///
/// # Negative Amounts
///
/// `withdraw` and `deposit` apply no sign or bounds validation beyond the
/// single sufficient-funds comparison in `withdraw`. A negative withdrawal
/// therefore increases the balance and a negative deposit decreases it.
/// This mirrors the behavior of the system being simulated and is pinned
/// by tests; it is a documented quirk, not a feature.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account number.
    pub number: String,

    /// Current balance. May go negative via the quirk described above.
    balance: Money,
}

impl Account {
    /// Creates an account with the given opening balance.
    pub fn new(number: impl Into<String>, balance: Money) -> Self {
        Account {
            number: number.into(),
            balance,
        }
    }

    /// Returns the current balance.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Debits the account.
    ///
    /// Returns `false` with no mutation if `amount` exceeds the balance;
    /// otherwise subtracts `amount` and returns `true`.
    pub fn withdraw(&mut self, amount: Money) -> bool {
        if amount > self.balance {
            return false;
        }

        self.balance -= amount;
        true
    }

    /// Credits the account. Never fails.
    ///
    /// Also used as the compensating action when a withdrawal's cash leg
    /// fails after the account was already debited.
    pub fn deposit(&mut self, amount: Money) {
        self.balance += amount;
    }
}

/// In-memory account store indexed by account number.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        AccountStore {
            accounts: HashMap::new(),
        }
    }

    /// Adds an account, replacing any existing account with the same number.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.number.clone(), account);
    }

    /// Looks up an account by number.
    pub fn get(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    /// Looks up an account by number for mutation.
    pub fn get_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_withdraw_decreases_balance() {
        let mut account = Account::new("123456", money("1000.00"));
        assert!(account.withdraw(money("100.00")));
        assert_eq!(account.balance().to_string(), "900.00");
    }

    #[test]
    fn test_withdraw_fails_with_insufficient_funds() {
        let mut account = Account::new("123456", money("50.00"));
        assert!(!account.withdraw(money("100.00")));
        assert_eq!(account.balance().to_string(), "50.00");
    }

    #[test]
    fn test_withdraw_exact_balance() {
        let mut account = Account::new("123456", money("50.00"));
        assert!(account.withdraw(money("50.00")));
        assert_eq!(account.balance().to_string(), "0.00");
    }

    #[test]
    fn test_deposit_increases_balance() {
        let mut account = Account::new("123456", money("10.00"));
        account.deposit(money("5.50"));
        assert_eq!(account.balance().to_string(), "15.50");
    }

    #[test]
    fn test_negative_withdraw_inflates_balance() {
        // Documented quirk: -50 passes the sufficient-funds check and the
        // subtraction adds 50 to the balance.
        let mut account = Account::new("123456", money("100.00"));
        assert!(account.withdraw(money("-50.00")));
        assert_eq!(account.balance().to_string(), "150.00");
    }

    #[test]
    fn test_negative_deposit_drains_balance() {
        let mut account = Account::new("123456", money("100.00"));
        account.deposit(money("-30.00"));
        assert_eq!(account.balance().to_string(), "70.00");
    }

    #[test]
    fn test_store_lookup() {
        let mut store = AccountStore::new();
        store.insert(Account::new("123456", money("1000.00")));

        assert!(store.get("123456").is_some());
        assert!(store.get("999999").is_none());
    }

    #[test]
    fn test_store_insert_replaces() {
        let mut store = AccountStore::new();
        store.insert(Account::new("123456", money("1000.00")));
        store.insert(Account::new("123456", money("25.00")));

        assert_eq!(store.get("123456").unwrap().balance().to_string(), "25.00");
    }
}
