//! The period report aggregate
//!
//! One `Report` is the classified, totaled snapshot of a fiscal year:
//! every account sorted into its category and subtype, plus the named
//! totals. All downstream analyses are pure functions over one or two of
//! these.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{AccountId, Category, FiscalYear};

use crate::totals::{keys, Totals};

/// Fallback subtype for rows whose catalog entry carries none
pub const DEFAULT_SUBTYPE: &str = "General";

/// One account line within a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub id: AccountId,
    pub name: String,
    pub amount: Decimal,
}

impl AccountBalance {
    pub fn new(id: AccountId, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
        }
    }
}

/// Subtype grouping within one category: subtype name → ordered accounts
pub type CategorySection = BTreeMap<String, Vec<AccountBalance>>;

/// The classified, totaled snapshot for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    period: FiscalYear,
    sections: BTreeMap<Category, CategorySection>,
    pub totals: Totals,
}

impl Report {
    /// Creates an empty report shell for a period
    pub fn new(period: FiscalYear) -> Self {
        Self {
            period,
            sections: BTreeMap::new(),
            totals: Totals::new(),
        }
    }

    /// The period this report describes
    pub fn period(&self) -> FiscalYear {
        self.period
    }

    /// Subtype groups of a category, in subtype order
    pub fn subtypes(&self, category: Category) -> impl Iterator<Item = (&str, &[AccountBalance])> {
        self.sections
            .get(&category)
            .into_iter()
            .flat_map(|section| section.iter().map(|(name, accounts)| (name.as_str(), accounts.as_slice())))
    }

    /// All accounts of a category across its subtypes
    pub fn accounts(&self, category: Category) -> impl Iterator<Item = &AccountBalance> {
        self.subtypes(category).flat_map(|(_, accounts)| accounts)
    }

    /// Looks up one account's balance within a category
    pub fn account_amount(&self, category: Category, id: AccountId) -> Option<Decimal> {
        self.accounts(category)
            .find(|account| account.id == id)
            .map(|account| account.amount)
    }

    /// Sum of the accounts in subtypes whose name satisfies `matches`
    ///
    /// Used by the ratio engine to pull e.g. current assets out of the
    /// balance sheet by subtype key.
    pub fn subtype_sum<F: Fn(&str) -> bool>(&self, category: Category, matches: F) -> Option<Decimal> {
        let mut found = false;
        let mut sum = Decimal::ZERO;
        for (subtype, accounts) in self.subtypes(category) {
            if matches(subtype) {
                found = true;
                sum += accounts.iter().map(|a| a.amount).sum::<Decimal>();
            }
        }
        found.then_some(sum)
    }

    /// Appends an account line and folds it into the running totals
    pub(crate) fn push_account(
        &mut self,
        category: Category,
        subtype: &str,
        account: AccountBalance,
    ) {
        let amount = account.amount;
        self.sections
            .entry(category)
            .or_default()
            .entry(subtype.to_string())
            .or_default()
            .push(account);
        self.totals.add(category.name(), amount);
        self.totals.add(subtype, amount);
    }

    /// Difference between Total Asset and Total Liability+Equity
    ///
    /// The engine does not enforce balance-sheet equality; manually kept
    /// books can legitimately drift. The residual is exposed so callers
    /// can display the data-quality gap.
    pub fn balance_residual(&self) -> Decimal {
        self.totals.get(keys::TOTAL_ASSET) - self.totals.get(keys::TOTAL_LIABILITY_EQUITY)
    }
}
