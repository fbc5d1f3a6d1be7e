//! End-to-end analysis scenarios
//!
//! Drives full statements through the builder and the analyses together,
//! including the worked example used to validate the vertical percentages
//! and the band-consistency law across every produced ratio.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AccountId, BalanceRow, Category, FiscalYear};
use domain_analysis::{
    horizontal_analysis, ratio_analysis, sources_and_uses, vertical_analysis, OptimalBand,
    RatioState,
};
use domain_report::{build_from_rows, keys, Report};

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

/// The worked statement: Revenue 30,812,479.51 / Cost 16,169,380.12 /
/// Expense 12,721,291.66.
fn worked_example() -> Report {
    report(
        2023,
        vec![
            row(1, "Cash", "Asset", "Current Asset", dec!(9895003.78)),
            row(2, "Sales", "Revenue", "Operating", dec!(30812479.51)),
            row(3, "Cost of sales", "Cost", "Sales", dec!(16169380.12)),
            row(4, "General expenses", "Expense", "Administration", dec!(12721291.66)),
        ],
    )
}

#[test]
fn worked_example_profit_chain() {
    let statement = worked_example();
    assert_eq!(statement.totals.get(keys::GROSS_PROFIT), dec!(14643099.39));
    assert_eq!(statement.totals.get(keys::NET_PROFIT), dec!(1921807.73));
}

#[test]
fn worked_example_expense_percentage() {
    let statement = worked_example();
    let analysis = vertical_analysis(&statement);

    let expense = analysis.accounts(Category::Expense).next().unwrap();
    // Exactly amount / revenue x 100.
    assert_eq!(
        expense.percentage,
        dec!(12721291.66) / dec!(30812479.51) * dec!(100)
    );
    assert_eq!(expense.percentage.round_dp(2), dec!(41.29));
}

#[test]
fn ratio_band_consistency_across_all_produced_ratios() {
    let current = report(
        2023,
        vec![
            row(1, "Cash", "Asset", "Current Asset", dec!(350)),
            row(2, "Inventory", "Asset", "Current Asset", dec!(200)),
            row(3, "Accounts receivable", "Asset", "Current Asset", dec!(250)),
            row(4, "Equipment", "Asset", "Fixed Asset", dec!(700)),
            row(5, "Suppliers", "Liability", "Current Liability", dec!(400)),
            row(6, "Bank loan", "Liability", "Long Term", dec!(350)),
            row(7, "Share capital", "Equity", "Capital", dec!(750)),
            row(8, "Sales", "Revenue", "Operating", dec!(2400)),
            row(9, "Cost of sales", "Cost", "Sales", dec!(1500)),
            row(10, "Salaries", "Expense", "Operating Expense", dec!(500)),
            row(11, "Interest paid", "Expense", "Financial", dec!(120)),
        ],
    );

    let analysis = ratio_analysis(&current, None);
    assert!(analysis.all().count() >= 10);

    for ratio in analysis.all() {
        match ratio.optimal {
            OptimalBand::Closed { lo, hi } => {
                let expected = if ratio.value < lo {
                    RatioState::Low
                } else if ratio.value > hi {
                    RatioState::High
                } else {
                    RatioState::Optimal
                };
                assert_eq!(ratio.state, expected, "band broken for {}", ratio.name);
            }
            OptimalBand::AtLeast { lo } => {
                assert_eq!(
                    ratio.state == RatioState::Optimal,
                    ratio.value >= lo,
                    "band broken for {}",
                    ratio.name
                );
            }
            OptimalBand::Positive => {
                assert_eq!(
                    ratio.state == RatioState::Optimal,
                    ratio.value > Decimal::ZERO,
                    "band broken for {}",
                    ratio.name
                );
            }
            OptimalBand::Tiered { optimal, normal } => {
                let expected = if ratio.value >= optimal {
                    RatioState::Optimal
                } else if ratio.value >= normal {
                    RatioState::Normal
                } else {
                    RatioState::Low
                };
                assert_eq!(ratio.state, expected, "band broken for {}", ratio.name);
            }
        }
    }
}

#[test]
fn sources_and_uses_scenario_totals() {
    // Asset down 400 (source) and liability up 400 (source).
    let base = report(
        2022,
        vec![
            row(1, "Inventory", "Asset", "Current", dec!(1000)),
            row(2, "Suppliers", "Liability", "Current", dec!(500)),
        ],
    );
    let analysis = report(
        2023,
        vec![
            row(1, "Inventory", "Asset", "Current", dec!(600)),
            row(2, "Suppliers", "Liability", "Current", dec!(900)),
        ],
    );

    let statement = sources_and_uses(&base, &analysis);
    assert_eq!(statement.origins.entries().count(), 2);
    assert!(statement.origins.total >= dec!(800));
}

#[test]
fn horizontal_and_vertical_agree_on_the_same_report() {
    let base = worked_example();
    let analysis_rows = vec![
        row(1, "Cash", "Asset", "Current Asset", dec!(10200000.00)),
        row(2, "Sales", "Revenue", "Operating", dec!(33000000.00)),
        row(3, "Cost of sales", "Cost", "Sales", dec!(17000000.00)),
        row(4, "General expenses", "Expense", "Administration", dec!(13000000.00)),
    ];
    let current = report(2024, analysis_rows);

    let comparison = horizontal_analysis(&base, &current);
    let revenue = comparison.total("Revenue").unwrap();
    assert_eq!(revenue.analysis, current.totals.get("Revenue"));
    assert_eq!(revenue.base, base.totals.get("Revenue"));
    assert_eq!(revenue.absolute, revenue.analysis - revenue.base);
}
