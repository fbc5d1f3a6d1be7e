//! Vertical (common-size) analysis
//!
//! Expresses every balance-sheet line as a percentage of Total Asset and
//! every income line as a percentage of Revenue. The output is a new
//! structure; the input report is never mutated, so the same report can
//! feed several analyses safely.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use core_kernel::{AccountId, Category, FiscalYear};
use domain_report::{keys, Report};

/// One account line with its common-size percentage attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentagedAccount {
    pub id: AccountId,
    pub name: String,
    pub amount: Decimal,
    /// amount / base × 100, or 0.0 under a non-positive base
    pub percentage: Decimal,
}

/// Scope whose base denominator was unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseWarning {
    /// Total Asset was zero or negative; balance-sheet percentages are 0.0
    BalanceSheetBaseNonPositive,
    /// Revenue was zero or negative; income-statement percentages are 0.0
    IncomeBaseNonPositive,
}

/// Common-size view of one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalAnalysis {
    period: FiscalYear,
    sections: BTreeMap<Category, BTreeMap<String, Vec<PercentagedAccount>>>,
    /// Base for Asset / Liability / Equity lines (Total Asset)
    pub balance_sheet_base: Decimal,
    /// Base for Revenue / Cost / Expense lines (Revenue)
    pub income_base: Decimal,
    pub warnings: Vec<BaseWarning>,
}

impl VerticalAnalysis {
    /// The period the underlying report describes
    pub fn period(&self) -> FiscalYear {
        self.period
    }

    /// Subtype groups of a category, in subtype order
    pub fn subtypes(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (&str, &[PercentagedAccount])> {
        self.sections
            .get(&category)
            .into_iter()
            .flat_map(|section| {
                section
                    .iter()
                    .map(|(name, accounts)| (name.as_str(), accounts.as_slice()))
            })
    }

    /// All percentaged accounts of a category
    pub fn accounts(&self, category: Category) -> impl Iterator<Item = &PercentagedAccount> {
        self.subtypes(category).flat_map(|(_, accounts)| accounts)
    }
}

/// Computes the common-size percentages for one report
///
/// Every account in the six categories ends up with exactly one
/// percentage. A zero or negative base never divides: the whole scope
/// falls back to 0.0 and the matching warning is recorded.
pub fn vertical_analysis(report: &Report) -> VerticalAnalysis {
    let balance_sheet_base = report.totals.get(keys::TOTAL_ASSET);
    let income_base = report.totals.get(Category::Revenue.name());

    let mut warnings = Vec::new();
    if balance_sheet_base <= Decimal::ZERO {
        warn!(base = %balance_sheet_base, "total asset base is non-positive, balance-sheet percentages fall back to zero");
        warnings.push(BaseWarning::BalanceSheetBaseNonPositive);
    }
    if income_base <= Decimal::ZERO {
        warn!(base = %income_base, "revenue base is non-positive, income-statement percentages fall back to zero");
        warnings.push(BaseWarning::IncomeBaseNonPositive);
    }

    let mut sections = BTreeMap::new();
    for category in Category::ALL {
        let base = if category.is_balance_sheet() {
            balance_sheet_base
        } else {
            income_base
        };

        let mut section: BTreeMap<String, Vec<PercentagedAccount>> = BTreeMap::new();
        for (subtype, accounts) in report.subtypes(category) {
            let lines = accounts
                .iter()
                .map(|account| PercentagedAccount {
                    id: account.id,
                    name: account.name.clone(),
                    amount: account.amount,
                    percentage: percentage_of(account.amount, base),
                })
                .collect();
            section.insert(subtype.to_string(), lines);
        }
        if !section.is_empty() {
            sections.insert(category, section);
        }
    }

    VerticalAnalysis {
        period: report.period(),
        sections,
        balance_sheet_base,
        income_base,
        warnings,
    }
}

/// amount / base × 100, with the documented zero fallback
fn percentage_of(amount: Decimal, base: Decimal) -> Decimal {
    if base > Decimal::ZERO {
        amount / base * dec!(100)
    } else {
        Decimal::ZERO
    }
}
