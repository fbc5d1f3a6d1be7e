//! Sources and uses of funds
//!
//! Classifies every balance-sheet account's variation between two periods
//! as a source (origin) or a use (application) of funds, per the
//! accounting sign convention: assets release cash when they shrink,
//! liabilities and equity release cash when they grow.
//!
//! The two grand totals are not forced to balance - real books drift, and
//! the caller may display the residual.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use core_kernel::{AccountId, Category, FiscalYear};
use domain_report::Report;

/// Variations under this absolute threshold are noise, not funds movement
const NEGLIGIBLE: Decimal = dec!(0.01);

/// One classified funds movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsEntry {
    pub account_id: AccountId,
    pub name: String,
    pub category: Category,
    pub base: Decimal,
    pub analysis: Decimal,
    /// Absolute size of the movement
    pub variation: Decimal,
}

/// One side of the statement: entries grouped by subtype, with subtotals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundsBucket {
    entries: BTreeMap<String, Vec<FundsEntry>>,
    pub total: Decimal,
}

impl FundsBucket {
    fn push(&mut self, subtype: &str, entry: FundsEntry) {
        self.total += entry.variation;
        self.entries
            .entry(subtype.to_string())
            .or_default()
            .push(entry);
    }

    /// Subtype groups in subtype order
    pub fn subtypes(&self) -> impl Iterator<Item = (&str, &[FundsEntry])> {
        self.entries
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Sum of one subtype's entries
    pub fn subtotal(&self, subtype: &str) -> Decimal {
        self.entries
            .get(subtype)
            .map(|entries| entries.iter().map(|e| e.variation).sum())
            .unwrap_or(Decimal::ZERO)
    }

    /// All entries across subtypes
    pub fn entries(&self) -> impl Iterator<Item = &FundsEntry> {
        self.entries.values().flatten()
    }
}

/// The classified statement of funds between two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesAndUses {
    pub base_period: FiscalYear,
    pub analysis_period: FiscalYear,
    pub origins: FundsBucket,
    pub applications: FundsBucket,
}

impl SourcesAndUses {
    /// Origin total minus application total; nonzero on unbalanced books
    pub fn residual(&self) -> Decimal {
        self.origins.total - self.applications.total
    }
}

/// Classifies the account variations between two reports
pub fn sources_and_uses(base: &Report, analysis: &Report) -> SourcesAndUses {
    let mut origins = FundsBucket::default();
    let mut applications = FundsBucket::default();

    for category in Category::BALANCE_SHEET {
        for (id, subtype) in account_union(base, analysis, category) {
            let base_amount = base.account_amount(category, id).unwrap_or_default();
            let analysis_amount = analysis.account_amount(category, id).unwrap_or_default();
            let delta = analysis_amount - base_amount;
            if delta.abs() < NEGLIGIBLE {
                continue;
            }

            let name = account_name(analysis, base, category, id)
                .unwrap_or_else(|| format!("Account {id}"));
            let entry = FundsEntry {
                account_id: id,
                name,
                category,
                base: base_amount,
                analysis: analysis_amount,
                variation: delta.abs(),
            };

            // Asset growth consumes funds; liability or equity growth
            // provides them.
            let is_source = match category {
                Category::Asset => delta < Decimal::ZERO,
                _ => delta > Decimal::ZERO,
            };
            if is_source {
                origins.push(&subtype, entry);
            } else {
                applications.push(&subtype, entry);
            }
        }
    }

    SourcesAndUses {
        base_period: base.period(),
        analysis_period: analysis.period(),
        origins,
        applications,
    }
}

/// Union of account ids in a category, each with its display subtype
/// (analysis period's grouping wins for accounts present in both)
fn account_union(
    base: &Report,
    analysis: &Report,
    category: Category,
) -> Vec<(AccountId, String)> {
    let mut subtype_of: BTreeMap<AccountId, String> = BTreeMap::new();
    for (subtype, accounts) in base.subtypes(category) {
        for account in accounts {
            subtype_of.insert(account.id, subtype.to_string());
        }
    }
    for (subtype, accounts) in analysis.subtypes(category) {
        for account in accounts {
            subtype_of.insert(account.id, subtype.to_string());
        }
    }

    let ids: BTreeSet<AccountId> = subtype_of.keys().copied().collect();
    ids.into_iter()
        .map(|id| {
            let subtype = subtype_of.get(&id).cloned().unwrap_or_default();
            (id, subtype)
        })
        .collect()
}

fn account_name(
    analysis: &Report,
    base: &Report,
    category: Category,
    id: AccountId,
) -> Option<String> {
    analysis
        .accounts(category)
        .chain(base.accounts(category))
        .find(|account| account.id == id)
        .map(|account| account.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::BalanceRow;
    use domain_report::build_from_rows;

    fn row(id: i64, name: &str, label: &str, subtype: &str, amount: Decimal) -> BalanceRow {
        BalanceRow {
            account_id: AccountId::new(id),
            account_name: name.to_string(),
            category_label: Some(label.to_string()),
            subtype: Some(subtype.to_string()),
            amount: Some(amount),
        }
    }

    fn report(year: i32, rows: Vec<BalanceRow>) -> Report {
        build_from_rows(FiscalYear::new(year), rows).0
    }

    #[test]
    fn test_shrinking_asset_is_a_source() {
        let base = report(2022, vec![row(1, "Inventory", "Asset", "Current", dec!(1000))]);
        let analysis = report(2023, vec![row(1, "Inventory", "Asset", "Current", dec!(600))]);

        let statement = sources_and_uses(&base, &analysis);
        let entry = statement.origins.entries().next().unwrap();
        assert_eq!(entry.variation, dec!(400));
        assert_eq!(statement.applications.total, Decimal::ZERO);
    }

    #[test]
    fn test_growing_liability_is_a_source() {
        let base = report(2022, vec![row(1, "Bank loan", "Liability", "Long Term", dec!(500))]);
        let analysis = report(2023, vec![row(1, "Bank loan", "Liability", "Long Term", dec!(900))]);

        let statement = sources_and_uses(&base, &analysis);
        assert_eq!(statement.origins.total, dec!(400));
    }

    #[test]
    fn test_combined_scenario_totals() {
        // Asset down 400 and liability up 400: both sources.
        let base = report(
            2022,
            vec![
                row(1, "Inventory", "Asset", "Current", dec!(1000)),
                row(2, "Bank loan", "Liability", "Long Term", dec!(500)),
            ],
        );
        let analysis = report(
            2023,
            vec![
                row(1, "Inventory", "Asset", "Current", dec!(600)),
                row(2, "Bank loan", "Liability", "Long Term", dec!(900)),
            ],
        );

        let statement = sources_and_uses(&base, &analysis);
        assert!(statement.origins.total >= dec!(800));
        assert_eq!(statement.residual(), dec!(800));
    }

    #[test]
    fn test_growing_asset_is_a_use_with_subtype_subtotal() {
        let base = report(
            2022,
            vec![
                row(1, "Machinery", "Asset", "Fixed Asset", dec!(100)),
                row(2, "Vehicles", "Asset", "Fixed Asset", dec!(50)),
            ],
        );
        let analysis = report(
            2023,
            vec![
                row(1, "Machinery", "Asset", "Fixed Asset", dec!(300)),
                row(2, "Vehicles", "Asset", "Fixed Asset", dec!(90)),
            ],
        );

        let statement = sources_and_uses(&base, &analysis);
        assert_eq!(statement.applications.total, dec!(240));
        assert_eq!(statement.applications.subtotal("Fixed Asset"), dec!(240));
    }

    #[test]
    fn test_negligible_variation_is_skipped() {
        let base = report(2022, vec![row(1, "Cash", "Asset", "Current", dec!(100.000))]);
        let analysis = report(2023, vec![row(1, "Cash", "Asset", "Current", dec!(100.005))]);

        let statement = sources_and_uses(&base, &analysis);
        assert_eq!(statement.origins.entries().count(), 0);
        assert_eq!(statement.applications.entries().count(), 0);
    }

    #[test]
    fn test_account_absent_in_base_counts_from_zero() {
        let base = report(2022, vec![]);
        let analysis = report(2023, vec![row(1, "Equipment", "Asset", "Fixed", dec!(70))]);

        let statement = sources_and_uses(&base, &analysis);
        let entry = statement.applications.entries().next().unwrap();
        assert_eq!(entry.base, Decimal::ZERO);
        assert_eq!(entry.variation, dec!(70));
    }

    #[test]
    fn test_shrinking_equity_is_a_use() {
        let base = report(2022, vec![row(1, "Share capital", "Equity", "Capital", dec!(900))]);
        let analysis = report(2023, vec![row(1, "Share capital", "Equity", "Capital", dec!(700))]);

        let statement = sources_and_uses(&base, &analysis);
        let entry = statement.applications.entries().next().unwrap();
        assert_eq!(entry.category, Category::Equity);
        assert_eq!(entry.variation, dec!(200));
    }
}
