//! Totals accumulator
//!
//! The report keeps one flat map of named sums: per-category totals keyed
//! by the category name, per-subtype totals keyed by the subtype string,
//! and the derived statement keys. Reads of a missing key return zero -
//! that default is part of the contract, not an accident of the container.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived totals keys
pub mod keys {
    pub const TOTAL_ASSET: &str = "Total Asset";
    pub const TOTAL_LIABILITY: &str = "Total Liability";
    pub const TOTAL_EQUITY: &str = "Total Equity";
    pub const TOTAL_LIABILITY_EQUITY: &str = "Total Liability+Equity";
    pub const GROSS_PROFIT: &str = "Gross Profit";
    pub const OPERATING_PROFIT: &str = "Operating Profit";
    pub const NET_PROFIT: &str = "Net Profit";
}

/// Named sums for one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Totals {
    entries: BTreeMap<String, Decimal>,
}

impl Totals {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sum under `key`, or zero when the key was never written
    pub fn get(&self, key: &str) -> Decimal {
        self.entries.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns true if `key` has been written at least once
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Adds `amount` to the sum under `key`, creating it at zero first
    pub fn add(&mut self, key: &str, amount: Decimal) {
        *self
            .entries
            .entry(key.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    /// Overwrites the sum under `key`
    pub fn set(&mut self, key: &str, amount: Decimal) {
        self.entries.insert(key.to_string(), amount);
    }

    /// Iterates all (key, sum) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_key_reads_zero() {
        let totals = Totals::new();
        assert_eq!(totals.get("Asset"), Decimal::ZERO);
        assert!(!totals.contains("Asset"));
    }

    #[test]
    fn test_add_accumulates() {
        let mut totals = Totals::new();
        totals.add("Asset", dec!(100.50));
        totals.add("Asset", dec!(-20.25));
        assert_eq!(totals.get("Asset"), dec!(80.25));
        assert!(totals.contains("Asset"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut totals = Totals::new();
        totals.add("Gross Profit", dec!(10));
        totals.set("Gross Profit", dec!(99));
        assert_eq!(totals.get("Gross Profit"), dec!(99));
    }
}
