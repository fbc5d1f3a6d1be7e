//! Financial statement categories
//!
//! Every account belongs to exactly one of six fixed categories. Upstream
//! data carries free-text category labels (the original books were kept in
//! Spanish), so normalization accepts a known alias table and falls back to
//! substring matching in a fixed priority order. A label that survives
//! neither step rejects the row - an account is never silently
//! miscategorized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six financial statement classifications
///
/// Ordering follows statement presentation order (balance sheet first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Asset,
    Liability,
    Equity,
    Revenue,
    Cost,
    Expense,
}

/// Substring fallback order. Load-bearing: labels carrying several stems
/// resolve to the first category listed here.
const SUBSTRING_PRIORITY: [Category; 6] = [
    Category::Liability,
    Category::Equity,
    Category::Asset,
    Category::Revenue,
    Category::Cost,
    Category::Expense,
];

impl Category {
    /// All six categories in statement order
    pub const ALL: [Category; 6] = [
        Category::Asset,
        Category::Liability,
        Category::Equity,
        Category::Revenue,
        Category::Cost,
        Category::Expense,
    ];

    /// Balance-sheet categories (percentaged against Total Asset)
    pub const BALANCE_SHEET: [Category; 3] =
        [Category::Asset, Category::Liability, Category::Equity];

    /// Income-statement categories (percentaged against Revenue)
    pub const INCOME_STATEMENT: [Category; 3] =
        [Category::Revenue, Category::Cost, Category::Expense];

    /// Canonical display name, also used as the totals key
    pub fn name(&self) -> &'static str {
        match self {
            Category::Asset => "Asset",
            Category::Liability => "Liability",
            Category::Equity => "Equity",
            Category::Revenue => "Revenue",
            Category::Cost => "Cost",
            Category::Expense => "Expense",
        }
    }

    /// Returns true for balance-sheet categories
    pub fn is_balance_sheet(&self) -> bool {
        matches!(self, Category::Asset | Category::Liability | Category::Equity)
    }

    /// Returns true for income-statement categories
    pub fn is_income_statement(&self) -> bool {
        !self.is_balance_sheet()
    }

    /// Lowercase stems a label may carry for this category
    ///
    /// English canonical names plus the Spanish terms the source books use.
    fn stems(&self) -> &'static [&'static str] {
        match self {
            Category::Asset => &["asset", "activo"],
            Category::Liability => &["liability", "liabilities", "pasivo"],
            Category::Equity => &["equity", "patrimonio", "capital"],
            Category::Revenue => &["revenue", "income", "ingreso"],
            Category::Cost => &["cost", "costo"],
            Category::Expense => &["expense", "gasto"],
        }
    }

    /// Normalizes a free-text category label to one of the six categories
    ///
    /// Matching order:
    /// 1. trimmed, case-insensitive exact match against any stem;
    /// 2. substring match against the stems, trying categories in
    ///    `Liability, Equity, Asset, Revenue, Cost, Expense` order.
    ///
    /// Returns `None` for labels that match nothing; callers must reject
    /// the row and record a diagnostic.
    pub fn normalize(label: &str) -> Option<Category> {
        let needle = label.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        for category in Category::ALL {
            if category.stems().iter().any(|s| *s == needle) {
                return Some(category);
            }
        }

        for category in SUBSTRING_PRIORITY {
            if category.stems().iter().any(|s| needle.contains(s)) {
                return Some(category);
            }
        }

        None
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert_eq!(Category::normalize("ASSET"), Some(Category::Asset));
        assert_eq!(Category::normalize("  expense "), Some(Category::Expense));
    }

    #[test]
    fn test_spanish_aliases() {
        assert_eq!(Category::normalize("Activo"), Some(Category::Asset));
        assert_eq!(Category::normalize("Pasivo"), Some(Category::Liability));
        assert_eq!(Category::normalize("Patrimonio"), Some(Category::Equity));
        assert_eq!(Category::normalize("Ingreso"), Some(Category::Revenue));
        assert_eq!(Category::normalize("Costo"), Some(Category::Cost));
        assert_eq!(Category::normalize("Gasto"), Some(Category::Expense));
    }

    #[test]
    fn test_substring_fallback() {
        assert_eq!(Category::normalize("Current Asset"), Some(Category::Asset));
        assert_eq!(
            Category::normalize("Pasivo Corriente"),
            Some(Category::Liability)
        );
        assert_eq!(
            Category::normalize("Capital Social"),
            Some(Category::Equity)
        );
    }

    #[test]
    fn test_liability_wins_priority_over_asset() {
        // A label carrying both stems resolves by priority order
        assert_eq!(
            Category::normalize("asset-backed liability"),
            Some(Category::Liability)
        );
    }

    #[test]
    fn test_unrecognized_label_is_rejected() {
        assert_eq!(Category::normalize("Miscellaneous"), None);
        assert_eq!(Category::normalize(""), None);
        assert_eq!(Category::normalize("   "), None);
    }
}
