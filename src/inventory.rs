//! Physical cash inventory: bill denominations and the greedy dispenser.
//!
//! The inventory tracks how many bills of each denomination the terminal
//! holds. `dispense` is atomic: it either commits a full breakdown for the
//! requested amount or leaves the counts untouched.

use log::debug;
use std::collections::HashMap;
use std::fmt;

/// A bill denomination recognized by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Denomination {
    Hundred,
    Fifty,
    Twenty,
    Ten,
    Five,
    One,
}

impl Denomination {
    /// All denominations in descending face-value order.
    ///
    /// This ordering is load-bearing: the greedy breakdown in
    /// [`CashInventory::dispense`] walks it front to back.
    pub const DESCENDING: [Denomination; 6] = [
        Denomination::Hundred,
        Denomination::Fifty,
        Denomination::Twenty,
        Denomination::Ten,
        Denomination::Five,
        Denomination::One,
    ];

    /// Face value in whole currency units.
    pub fn face_value(self) -> u32 {
        match self {
            Denomination::Hundred => 100,
            Denomination::Fifty => 50,
            Denomination::Twenty => 20,
            Denomination::Ten => 10,
            Denomination::Five => 5,
            Denomination::One => 1,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.face_value())
    }
}

/// The terminal's stock of bills, counted per denomination.
///
/// # Invariants
///
/// - Every count is non-negative (structural, counts are `u32`).
/// - `dispense` either fully commits or leaves every count unchanged.
#[derive(Debug, Clone)]
pub struct CashInventory {
    bills: HashMap<Denomination, u32>,
}

impl CashInventory {
    /// Creates an inventory with the canonical starting stock:
    /// 10x$100, 10x$50, 20x$20, 30x$10, 20x$5, 50x$1 (total value 2350).
    pub fn new() -> Self {
        CashInventory::from_stock(&[
            (Denomination::Hundred, 10),
            (Denomination::Fifty, 10),
            (Denomination::Twenty, 20),
            (Denomination::Ten, 30),
            (Denomination::Five, 20),
            (Denomination::One, 50),
        ])
    }

    /// Creates an inventory with an arbitrary bill mix.
    pub fn from_stock(stock: &[(Denomination, u32)]) -> Self {
        let mut inventory = CashInventory {
            bills: HashMap::new(),
        };
        for &(denomination, count) in stock {
            inventory.add(denomination, count);
        }
        inventory
    }

    /// Returns the number of bills on hand for a denomination.
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.bills.get(&denomination).copied().unwrap_or(0)
    }

    /// Total value of all bills on hand.
    pub fn total_value(&self) -> u32 {
        self.bills
            .iter()
            .map(|(denomination, count)| denomination.face_value() * count)
            .sum()
    }

    /// Returns `true` if the aggregate value on hand covers `amount`.
    ///
    /// Aggregate value only: an exact breakdown may still be impossible,
    /// so callers must treat a subsequent `dispense` failure as a real
    /// outcome even when this returns `true`.
    pub fn has_sufficient_total(&self, amount: u32) -> bool {
        self.total_value() >= amount
    }

    /// Adds bills to the stock (restocking).
    pub fn add(&mut self, denomination: Denomination, count: u32) {
        *self.bills.entry(denomination).or_insert(0) += count;
    }

    /// Dispenses `amount` as a greedy largest-denomination-first breakdown.
    ///
    /// Returns the per-denomination bill counts removed from stock, or
    /// `None` with no mutation when the aggregate value is insufficient or
    /// the greedy walk cannot reach the amount exactly with the bills on
    /// hand. `dispense(0)` succeeds with an empty breakdown.
    ///
    /// The greedy walk is exact for the canonical denomination set under
    /// normal stock levels but is not a subset-sum solver: a depleted mix
    /// can make it fail on a value-feasible amount. That failure is a
    /// recoverable business outcome, and callers compensate for it.
    pub fn dispense(&mut self, amount: u32) -> Option<HashMap<Denomination, u32>> {
        if !self.has_sufficient_total(amount) {
            debug!(
                "dispense of {} refused: only {} on hand",
                amount,
                self.total_value()
            );
            return None;
        }

        let mut remaining = amount;
        let mut reserved: HashMap<Denomination, u32> = HashMap::new();

        for denomination in Denomination::DESCENDING {
            let take = (remaining / denomination.face_value()).min(self.count(denomination));
            if take > 0 {
                reserved.insert(denomination, take);
                remaining -= take * denomination.face_value();
            }
        }

        if remaining != 0 {
            debug!(
                "dispense of {} refused: no exact breakdown ({} left after greedy walk)",
                amount, remaining
            );
            return None;
        }

        for (&denomination, &take) in &reserved {
            // Safety: `take` was capped at the on-hand count above
            *self.bills.get_mut(&denomination).expect("reserved denomination is stocked") -= take;
        }

        debug!("dispensed {} with {} bill kinds", amount, reserved.len());
        Some(reserved)
    }
}

impl Default for CashInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_stock_totals_2350() {
        let inventory = CashInventory::new();
        assert_eq!(inventory.total_value(), 2350);
    }

    #[test]
    fn test_has_sufficient_total() {
        let inventory = CashInventory::new();
        assert!(inventory.has_sufficient_total(1000));
        assert!(inventory.has_sufficient_total(2350));
        assert!(!inventory.has_sufficient_total(2351));
    }

    #[test]
    fn test_dispense_100_uses_one_bill() {
        let mut inventory = CashInventory::new();
        let bills = inventory.dispense(100).unwrap();

        assert_eq!(bills.get(&Denomination::Hundred), Some(&1));
        assert_eq!(bills.len(), 1);
        assert_eq!(inventory.total_value(), 2250);
    }

    #[test]
    fn test_dispense_250_breakdown() {
        let mut inventory = CashInventory::new();
        let bills = inventory.dispense(250).unwrap();

        assert_eq!(bills.get(&Denomination::Hundred), Some(&2));
        assert_eq!(bills.get(&Denomination::Fifty), Some(&1));
        assert_eq!(bills.len(), 2);
        assert_eq!(inventory.total_value(), 2100);
    }

    #[test]
    fn test_dispense_573_breakdown() {
        let mut inventory = CashInventory::new();
        let bills = inventory.dispense(573).unwrap();

        assert_eq!(bills.get(&Denomination::Hundred), Some(&5));
        assert_eq!(bills.get(&Denomination::Fifty), Some(&1));
        assert_eq!(bills.get(&Denomination::Twenty), Some(&1));
        assert_eq!(bills.get(&Denomination::One), Some(&3));
        assert_eq!(bills.len(), 4);
        assert_eq!(inventory.total_value(), 1777);
    }

    #[test]
    fn test_dispense_entire_stock() {
        let mut inventory = CashInventory::new();
        let bills = inventory.dispense(2350).unwrap();

        let dispensed_value: u32 = bills
            .iter()
            .map(|(denomination, count)| denomination.face_value() * count)
            .sum();
        assert_eq!(dispensed_value, 2350);
        assert_eq!(inventory.total_value(), 0);
    }

    #[test]
    fn test_dispense_zero_is_empty() {
        let mut inventory = CashInventory::new();
        let bills = inventory.dispense(0).unwrap();

        assert!(bills.is_empty());
        assert_eq!(inventory.total_value(), 2350);
    }

    #[test]
    fn test_dispense_insufficient_total_leaves_stock_untouched() {
        let mut inventory = CashInventory::new();
        assert!(inventory.dispense(3000).is_none());
        assert_eq!(inventory.total_value(), 2350);
    }

    #[test]
    fn test_dispense_no_exact_breakdown_leaves_stock_untouched() {
        // 1x$50 on hand: aggregate covers 20 but no exact breakdown exists.
        let mut inventory = CashInventory::from_stock(&[(Denomination::Fifty, 1)]);

        assert!(inventory.has_sufficient_total(20));
        assert!(inventory.dispense(20).is_none());
        assert_eq!(inventory.total_value(), 50);
        assert_eq!(inventory.count(Denomination::Fifty), 1);
    }

    #[test]
    fn test_greedy_walk_is_not_a_subset_sum_solver() {
        // 60 = 3x$20 exists, but greedy takes the $50 first and strands 10.
        let mut inventory =
            CashInventory::from_stock(&[(Denomination::Fifty, 1), (Denomination::Twenty, 3)]);

        assert!(inventory.dispense(60).is_none());
        assert_eq!(inventory.total_value(), 110);
    }

    #[test]
    fn test_add_restocks() {
        let mut inventory = CashInventory::new();
        inventory.add(Denomination::Hundred, 5);

        assert_eq!(inventory.count(Denomination::Hundred), 15);
        assert_eq!(inventory.total_value(), 2850);
    }

    #[test]
    fn test_dispense_then_add() {
        let mut inventory = CashInventory::new();
        inventory.dispense(500).unwrap();
        assert_eq!(inventory.total_value(), 1850);

        inventory.add(Denomination::Hundred, 10);
        assert_eq!(inventory.total_value(), 2850);
    }

    #[test]
    fn test_sequential_dispenses_compound() {
        let mut inventory = CashInventory::new();
        inventory.dispense(500).unwrap();
        inventory.dispense(1000).unwrap();

        assert_eq!(inventory.total_value(), 850);
    }

    #[test]
    fn test_dispense_single_unit() {
        let mut inventory = CashInventory::new();
        let bills = inventory.dispense(1).unwrap();

        assert_eq!(bills.get(&Denomination::One), Some(&1));
        assert_eq!(inventory.total_value(), 2349);
    }
}
