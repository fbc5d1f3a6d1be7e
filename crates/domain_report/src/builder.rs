//! Report builder
//!
//! Folds the ledger's raw balance rows into a `Report`. Row-level problems
//! (missing or unclassifiable category labels) skip the row and record a
//! diagnostic; only infrastructure faults from the port propagate as
//! errors. "Period unknown" and "period present but empty" are distinct,
//! ordinary outcomes.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use core_kernel::{
    BalanceRow, BalanceSource, Category, FiscalYear, RowDiagnostic, SkipReason, SourceError,
};

use crate::report::{AccountBalance, Report, DEFAULT_SUBTYPE};
use crate::totals::keys;

/// Name stems that mark accumulated depreciation / amortization accounts
///
/// Stems, not words: they match both the English and the Spanish spellings
/// ("depreciation" / "depreciación", "amortization" / "amortización").
const DEPRECIATION_STEMS: [&str; 2] = ["deprecia", "amortiza"];

/// Subtype stems that mark the operating-expense subtotal
const OPERATING_SUBTYPE_STEMS: [&str; 2] = ["operat", "operac"];

/// Returns true for accounts that carry accumulated depreciation
pub fn is_depreciation_like(name: &str) -> bool {
    let needle = name.to_lowercase();
    DEPRECIATION_STEMS.iter().any(|stem| needle.contains(stem))
}

/// Outcome of building a report for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BuildOutcome {
    /// The period resolved and at least one balance row existed
    Built {
        report: Report,
        /// Rows that were skipped, for caller-side display
        diagnostics: Vec<RowDiagnostic>,
    },
    /// The period has no catalog entry
    PeriodNotFound,
    /// The period exists but has zero balance rows
    NoBalanceData,
}

impl BuildOutcome {
    /// Returns the report when one was built
    pub fn report(&self) -> Option<&Report> {
        match self {
            BuildOutcome::Built { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the report when one was built
    pub fn into_report(self) -> Option<Report> {
        match self {
            BuildOutcome::Built { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Fetches a period's rows and builds its report
///
/// Propagates only infrastructure faults; both empty cases come back as
/// named outcomes so the caller can distinguish them.
pub async fn build_report<S>(source: &S, period: FiscalYear) -> Result<BuildOutcome, SourceError>
where
    S: BalanceSource + ?Sized,
{
    let rows = match source.fetch_period_balances(period).await? {
        None => return Ok(BuildOutcome::PeriodNotFound),
        Some(rows) => rows,
    };

    if rows.is_empty() {
        return Ok(BuildOutcome::NoBalanceData);
    }

    let (report, diagnostics) = build_from_rows(period, rows);
    Ok(BuildOutcome::Built {
        report,
        diagnostics,
    })
}

/// Pure fold from raw rows to a classified, totaled report
///
/// Deterministic: identical input rows produce an identical report.
pub fn build_from_rows(
    period: FiscalYear,
    rows: Vec<BalanceRow>,
) -> (Report, Vec<RowDiagnostic>) {
    let mut report = Report::new(period);
    let mut diagnostics = Vec::new();

    for row in rows {
        let category = match classify(&row) {
            Ok(category) => category,
            Err(diagnostic) => {
                warn!(
                    account = %diagnostic.account_id,
                    name = %diagnostic.account_name,
                    reason = %diagnostic.reason,
                    "skipping balance row"
                );
                diagnostics.push(diagnostic);
                continue;
            }
        };

        let mut amount = row.amount.unwrap_or(Decimal::ZERO);
        // Contra-accounts must reduce their category even when the ledger
        // delivered them unsigned.
        if amount > Decimal::ZERO && is_depreciation_like(&row.account_name) {
            amount = -amount;
        }

        let subtype = row.subtype.as_deref().unwrap_or(DEFAULT_SUBTYPE);
        report.push_account(
            category,
            subtype,
            AccountBalance::new(row.account_id, row.account_name, amount),
        );
    }

    finalize_totals(&mut report);

    debug!(
        period = %period,
        skipped = diagnostics.len(),
        total_asset = %report.totals.get(keys::TOTAL_ASSET),
        "report built"
    );

    (report, diagnostics)
}

fn classify(row: &BalanceRow) -> Result<Category, RowDiagnostic> {
    let label = match row.category_label.as_deref() {
        Some(label) if !label.trim().is_empty() => label,
        _ => {
            return Err(RowDiagnostic::new(
                row.account_id,
                row.account_name.clone(),
                row.category_label.clone(),
                SkipReason::MissingCategory,
            ))
        }
    };

    Category::normalize(label).ok_or_else(|| {
        RowDiagnostic::new(
            row.account_id,
            row.account_name.clone(),
            Some(label.to_string()),
            SkipReason::UnclassifiableCategory,
        )
    })
}

fn finalize_totals(report: &mut Report) {
    let operating_expenses = report.subtype_sum(Category::Expense, |subtype| {
        let needle = subtype.to_lowercase();
        OPERATING_SUBTYPE_STEMS
            .iter()
            .any(|stem| needle.contains(stem))
    });

    let asset = report.totals.get(Category::Asset.name());
    let liability = report.totals.get(Category::Liability.name());
    let equity = report.totals.get(Category::Equity.name());
    let revenue = report.totals.get(Category::Revenue.name());
    let cost = report.totals.get(Category::Cost.name());
    let expense = report.totals.get(Category::Expense.name());

    let gross = revenue - cost;
    // Falls back to gross profit when the books carry no operating-expense
    // subtype at all.
    let operating = match operating_expenses {
        Some(subtotal) => gross - subtotal,
        None => gross,
    };

    let totals = &mut report.totals;
    totals.set(keys::TOTAL_ASSET, asset);
    totals.set(keys::TOTAL_LIABILITY, liability);
    totals.set(keys::TOTAL_EQUITY, equity);
    totals.set(keys::TOTAL_LIABILITY_EQUITY, liability + equity);
    totals.set(keys::GROSS_PROFIT, gross);
    totals.set(keys::OPERATING_PROFIT, operating);
    totals.set(keys::NET_PROFIT, gross - expense);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::AccountId;
    use rust_decimal_macros::dec;

    fn row(
        id: i64,
        name: &str,
        label: Option<&str>,
        subtype: Option<&str>,
        amount: Option<Decimal>,
    ) -> BalanceRow {
        BalanceRow {
            account_id: AccountId::new(id),
            account_name: name.to_string(),
            category_label: label.map(String::from),
            subtype: subtype.map(String::from),
            amount,
        }
    }

    #[test]
    fn test_depreciation_name_detection() {
        assert!(is_depreciation_like("Accumulated Depreciation"));
        assert!(is_depreciation_like("Depreciación acumulada"));
        assert!(is_depreciation_like("Amortización de intangibles"));
        assert!(!is_depreciation_like("Machinery"));
    }

    #[test]
    fn test_depreciation_amount_is_forced_negative() {
        let rows = vec![row(
            1,
            "Accumulated Depreciation",
            Some("Asset"),
            Some("Fixed Asset"),
            Some(dec!(250)),
        )];
        let (report, diagnostics) = build_from_rows(FiscalYear::new(2023), rows);
        assert!(diagnostics.is_empty());
        assert_eq!(
            report.account_amount(Category::Asset, AccountId::new(1)),
            Some(dec!(-250))
        );
        assert_eq!(report.totals.get(keys::TOTAL_ASSET), dec!(-250));
    }

    #[test]
    fn test_already_negative_depreciation_is_untouched() {
        let rows = vec![row(
            1,
            "Depreciación acumulada",
            Some("Activo"),
            None,
            Some(dec!(-250)),
        )];
        let (report, _) = build_from_rows(FiscalYear::new(2023), rows);
        assert_eq!(
            report.account_amount(Category::Asset, AccountId::new(1)),
            Some(dec!(-250))
        );
    }

    #[test]
    fn test_missing_amount_defaults_to_zero() {
        let rows = vec![row(1, "Cash", Some("Asset"), Some("Current Asset"), None)];
        let (report, diagnostics) = build_from_rows(FiscalYear::new(2023), rows);
        assert!(diagnostics.is_empty());
        assert_eq!(
            report.account_amount(Category::Asset, AccountId::new(1)),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_missing_subtype_lands_in_general() {
        let rows = vec![row(1, "Cash", Some("Asset"), None, Some(dec!(10)))];
        let (report, _) = build_from_rows(FiscalYear::new(2023), rows);
        let subtypes: Vec<&str> = report.subtypes(Category::Asset).map(|(s, _)| s).collect();
        assert_eq!(subtypes, vec![DEFAULT_SUBTYPE]);
        assert_eq!(report.totals.get(DEFAULT_SUBTYPE), dec!(10));
    }

    #[test]
    fn test_unclassifiable_row_is_skipped_with_diagnostic() {
        let rows = vec![
            row(1, "Cash", Some("Asset"), None, Some(dec!(10))),
            row(2, "Mystery", Some("Misc"), None, Some(dec!(99))),
            row(3, "Nameless", None, None, Some(dec!(5))),
        ];
        let (report, diagnostics) = build_from_rows(FiscalYear::new(2023), rows);

        assert_eq!(report.totals.get(keys::TOTAL_ASSET), dec!(10));
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].reason, SkipReason::UnclassifiableCategory);
        assert_eq!(diagnostics[0].raw_label.as_deref(), Some("Misc"));
        assert_eq!(diagnostics[1].reason, SkipReason::MissingCategory);
    }

    #[test]
    fn test_operating_profit_falls_back_to_gross() {
        let rows = vec![
            row(1, "Sales", Some("Revenue"), Some("Sales"), Some(dec!(1000))),
            row(2, "Cost of goods", Some("Cost"), Some("Sales"), Some(dec!(400))),
            row(3, "Rent", Some("Expense"), Some("Admin"), Some(dec!(100))),
        ];
        let (report, _) = build_from_rows(FiscalYear::new(2023), rows);
        // No operating-expense subtype: operating profit mirrors gross.
        assert_eq!(report.totals.get(keys::GROSS_PROFIT), dec!(600));
        assert_eq!(report.totals.get(keys::OPERATING_PROFIT), dec!(600));
        assert_eq!(report.totals.get(keys::NET_PROFIT), dec!(500));
    }

    #[test]
    fn test_operating_profit_subtracts_operating_subtype() {
        let rows = vec![
            row(1, "Sales", Some("Revenue"), Some("Sales"), Some(dec!(1000))),
            row(2, "Cost of goods", Some("Cost"), Some("Sales"), Some(dec!(400))),
            row(
                3,
                "Salaries",
                Some("Expense"),
                Some("Operating Expense"),
                Some(dec!(150)),
            ),
            row(4, "Interest", Some("Expense"), Some("Financial"), Some(dec!(50))),
        ];
        let (report, _) = build_from_rows(FiscalYear::new(2023), rows);
        assert_eq!(report.totals.get(keys::OPERATING_PROFIT), dec!(450));
        assert_eq!(report.totals.get(keys::NET_PROFIT), dec!(400));
    }
}
