//! Bank card issued to a customer.

/// A bank card: card number, PIN, and the account it draws on.
///
/// Immutable after construction. PIN validation is a pure equality check
/// with no attempt counter or lockout.
#[derive(Debug, Clone)]
pub struct Card {
    number: String,
    pin: u32,
    account_number: String,
}

impl Card {
    /// Creates a new card linked to the given account.
    pub fn new(number: impl Into<String>, pin: u32, account_number: impl Into<String>) -> Self {
        Card {
            number: number.into(),
            pin,
            account_number: account_number.into(),
        }
    }

    /// Returns the card number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns `true` if the entered PIN matches the card's PIN.
    pub fn validate_pin(&self, entered_pin: u32) -> bool {
        self.pin == entered_pin
    }

    /// Returns the number of the account this card draws on.
    pub fn account_number(&self) -> &str {
        &self.account_number
    }
}
