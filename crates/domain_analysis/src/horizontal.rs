//! Horizontal (comparative) analysis
//!
//! Account-by-account and total-by-total deltas between two periods. The
//! caller guarantees the base period chronologically precedes the analysis
//! period; the engine only computes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use core_kernel::{AccountId, Category, ChangeClass, FiscalYear, RelativeChange};
use domain_report::{keys, Report};

/// The fixed totals rows every comparison carries, in display order
const TOTAL_KEYS: [&str; 9] = [
    keys::TOTAL_ASSET,
    keys::TOTAL_LIABILITY,
    keys::TOTAL_EQUITY,
    keys::TOTAL_LIABILITY_EQUITY,
    "Revenue",
    "Cost",
    "Expense",
    keys::GROSS_PROFIT,
    keys::NET_PROFIT,
];

/// Comparison of one account across the two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountComparison {
    pub id: AccountId,
    pub name: String,
    pub base: Decimal,
    pub analysis: Decimal,
    pub absolute: Decimal,
    pub relative: RelativeChange,
    pub class: ChangeClass,
}

/// Comparison of one named total across the two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalComparison {
    pub base: Decimal,
    pub analysis: Decimal,
    pub absolute: Decimal,
    pub relative: RelativeChange,
    pub class: ChangeClass,
}

/// Full comparative view between a base and an analysis period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub base_period: FiscalYear,
    pub analysis_period: FiscalYear,
    sections: BTreeMap<Category, BTreeMap<String, Vec<AccountComparison>>>,
    pub totals: BTreeMap<String, TotalComparison>,
}

impl ComparativeAnalysis {
    /// Subtype groups of a category, in subtype order
    pub fn subtypes(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (&str, &[AccountComparison])> {
        self.sections
            .get(&category)
            .into_iter()
            .flat_map(|section| {
                section
                    .iter()
                    .map(|(name, accounts)| (name.as_str(), accounts.as_slice()))
            })
    }

    /// All account comparisons of a category
    pub fn accounts(&self, category: Category) -> impl Iterator<Item = &AccountComparison> {
        self.subtypes(category).flat_map(|(_, accounts)| accounts)
    }

    /// One totals row by key
    pub fn total(&self, key: &str) -> Option<&TotalComparison> {
        self.totals.get(key)
    }
}

/// Compares two reports account-by-account and total-by-total
///
/// Precondition (caller-enforced): `base.period() < analysis.period()`.
pub fn horizontal_analysis(base: &Report, analysis: &Report) -> ComparativeAnalysis {
    let mut sections = BTreeMap::new();

    for category in Category::ALL {
        let section = compare_category(base, analysis, category);
        if !section.is_empty() {
            sections.insert(category, section);
        }
    }

    let mut totals = BTreeMap::new();
    for key in TOTAL_KEYS {
        if let Some(comparison) = compare_total(base, analysis, key) {
            totals.insert(key.to_string(), comparison);
        }
    }
    // Standalone category rows for the financing-structure display. Their
    // sign class compares the raw amounts, not the relative figure.
    for category in [Category::Liability, Category::Equity] {
        let key = category.name();
        if base.totals.contains(key) && analysis.totals.contains(key) {
            let base_total = base.totals.get(key);
            let analysis_total = analysis.totals.get(key);
            totals.insert(
                key.to_string(),
                TotalComparison {
                    base: base_total,
                    analysis: analysis_total,
                    absolute: analysis_total - base_total,
                    relative: total_relative(base_total, analysis_total),
                    class: ChangeClass::of(analysis_total - base_total),
                },
            );
        }
    }

    ComparativeAnalysis {
        base_period: base.period(),
        analysis_period: analysis.period(),
        sections,
        totals,
    }
}

fn compare_category(
    base: &Report,
    analysis: &Report,
    category: Category,
) -> BTreeMap<String, Vec<AccountComparison>> {
    let mut subtype_names: BTreeSet<&str> = base.subtypes(category).map(|(s, _)| s).collect();
    subtype_names.extend(analysis.subtypes(category).map(|(s, _)| s));

    let mut section = BTreeMap::new();
    for subtype in subtype_names {
        let base_accounts = subtype_index(base, category, subtype);
        let analysis_accounts = subtype_index(analysis, category, subtype);

        let mut ids: BTreeSet<AccountId> = base_accounts.keys().copied().collect();
        ids.extend(analysis_accounts.keys().copied());

        let mut comparisons = Vec::with_capacity(ids.len());
        for id in ids {
            let base_entry = base_accounts.get(&id);
            let analysis_entry = analysis_accounts.get(&id);

            let base_amount = base_entry.map(|(_, amount)| *amount).unwrap_or_default();
            let analysis_amount = analysis_entry.map(|(_, amount)| *amount).unwrap_or_default();
            let name = analysis_entry
                .or(base_entry)
                .map(|(name, _)| (*name).to_string())
                .unwrap_or_else(|| format!("Account {id}"));

            let relative = RelativeChange::between(base_amount, analysis_amount);
            comparisons.push(AccountComparison {
                id,
                name,
                base: base_amount,
                analysis: analysis_amount,
                absolute: analysis_amount - base_amount,
                class: relative.class(),
                relative,
            });
        }
        section.insert(subtype.to_string(), comparisons);
    }
    section
}

fn subtype_index<'a>(
    report: &'a Report,
    category: Category,
    subtype: &str,
) -> BTreeMap<AccountId, (&'a str, Decimal)> {
    report
        .subtypes(category)
        .filter(|(name, _)| *name == subtype)
        .flat_map(|(_, accounts)| accounts)
        .map(|account| (account.id, (account.name.as_str(), account.amount)))
        .collect()
}

fn compare_total(base: &Report, analysis: &Report, key: &str) -> Option<TotalComparison> {
    let in_base = base.totals.contains(key);
    let in_analysis = analysis.totals.contains(key);

    match (in_base, in_analysis) {
        (true, true) => {
            let base_total = base.totals.get(key);
            let analysis_total = analysis.totals.get(key);
            let relative = total_relative(base_total, analysis_total);
            Some(TotalComparison {
                base: base_total,
                analysis: analysis_total,
                absolute: analysis_total - base_total,
                class: relative.class(),
                relative,
            })
        }
        // A key that disappears swings a full -100%; one that newly
        // appears swings infinitely.
        (true, false) => {
            let base_total = base.totals.get(key);
            Some(TotalComparison {
                base: base_total,
                analysis: Decimal::ZERO,
                absolute: -base_total,
                relative: RelativeChange::Finite(Decimal::from(-100)),
                class: ChangeClass::Negative,
            })
        }
        (false, true) => {
            let analysis_total = analysis.totals.get(key);
            Some(TotalComparison {
                base: Decimal::ZERO,
                analysis: analysis_total,
                absolute: analysis_total,
                relative: RelativeChange::Infinite,
                class: ChangeClass::Positive,
            })
        }
        (false, false) => None,
    }
}

/// Totals use a flat zero when the base is zero - unlike account lines,
/// a derived total never "newly appears" from a zero base.
fn total_relative(base: Decimal, analysis: Decimal) -> RelativeChange {
    if base.is_zero() {
        RelativeChange::Finite(Decimal::ZERO)
    } else {
        RelativeChange::Finite((analysis / base - Decimal::ONE) * Decimal::from(100))
    }
}
