//! Workspace integration tests
//!
//! Exercises the full pipeline - builder, analyses, cash flow - over the
//! shared fixtures, covering the cross-crate scenarios no single crate's
//! suite owns.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Category, FiscalYear};
use domain_analysis::{
    dupont_analysis, horizontal_analysis, project, ratio_analysis, sources_and_uses,
    vertical_analysis, DeterminingFactor, ProjectionAssumptions,
};
use domain_cashflow::cash_flow;
use domain_report::{build_report, keys, BuildOutcome};
use test_utils::{
    assert_balanced, assert_conservation, two_period_company, worked_statement, BalanceRowBuilder,
    InMemoryLedger, ReportBuilder,
};

#[test]
fn fixtures_are_internally_consistent() {
    let (base, current) = two_period_company();
    assert_balanced(&base);
    assert_balanced(&current);
    assert_conservation(&base);
    assert_conservation(&current);
}

#[tokio::test]
async fn full_pipeline_from_ledger_to_analyses() {
    let ledger = InMemoryLedger::new()
        .with_period(
            2023,
            vec![
                BalanceRowBuilder::new(1).named("Cash").worth(dec!(500)).build(),
                BalanceRowBuilder::new(2)
                    .named("Sales")
                    .labeled("Revenue")
                    .subtyped("Operating")
                    .worth(dec!(2000))
                    .build(),
            ],
        )
        .with_empty_period(2022);

    let outcome = build_report(&ledger, FiscalYear::new(2023)).await.unwrap();
    let report = outcome.into_report().expect("2023 should build");

    let vertical = vertical_analysis(&report);
    assert_eq!(
        vertical.accounts(Category::Asset).next().unwrap().percentage,
        dec!(100)
    );

    // The empty and unknown periods keep their distinct outcomes.
    assert_eq!(
        build_report(&ledger, FiscalYear::new(2022)).await.unwrap(),
        BuildOutcome::NoBalanceData
    );
    assert_eq!(
        build_report(&ledger, FiscalYear::new(1990)).await.unwrap(),
        BuildOutcome::PeriodNotFound
    );

    ledger.set_unreachable(true);
    assert!(build_report(&ledger, FiscalYear::new(2023)).await.is_err());
}

#[test]
fn worked_statement_flows_through_vertical_analysis() {
    let statement = worked_statement(2023);
    assert_eq!(statement.totals.get(keys::GROSS_PROFIT), dec!(14643099.39));
    assert_eq!(statement.totals.get(keys::NET_PROFIT), dec!(1921807.73));

    let vertical = vertical_analysis(&statement);
    let expense = vertical.accounts(Category::Expense).next().unwrap();
    assert_eq!(
        expense.percentage,
        dec!(12721291.66) / dec!(30812479.51) * dec!(100)
    );
}

#[test]
fn two_period_company_cash_flow_reconciles() {
    let (base, current) = two_period_company();
    let statement = cash_flow(&base, &current);

    // Net profit 600 + depreciation 150 - receivables 100 + inventory 50
    // + suppliers 150.
    assert_eq!(statement.operating.total, dec!(850));
    // Machinery purchase.
    assert_eq!(statement.investing.total, dec!(-300));
    // Loan drawdown 200, dividends -200.
    assert_eq!(statement.financing.total, Decimal::ZERO);
    assert_eq!(statement.net_flow, dec!(550));
    assert!(statement.reconciliation.reconciles);
    assert_eq!(statement.reconciliation.cash_end_actual, dec!(1550));
}

#[test]
fn two_period_company_horizontal_and_funds_agree() {
    let (base, current) = two_period_company();

    let comparison = horizontal_analysis(&base, &current);
    let revenue = comparison.total("Revenue").unwrap();
    assert_eq!(revenue.absolute, dec!(600));

    let funds = sources_and_uses(&base, &current);
    // Inventory shrank 50: a source. Machinery grew 300: a use.
    assert_eq!(funds.origins.subtotal("Current Asset"), dec!(50));
    assert!(funds.applications.total >= dec!(300));
}

#[test]
fn two_period_company_ratios_and_dupont() {
    let (base, current) = two_period_company();

    let ratios = ratio_analysis(&current, Some(&base));
    let current_ratio = ratios.ratio("Current Ratio").unwrap();
    // (1550 + 500 + 550) / 650 = 4.
    assert_eq!(current_ratio.value, dec!(4));
    assert!(current_ratio.prior_value.is_some());

    let dupont = dupont_analysis(&base, &current);
    assert!(dupont.current.roe > Decimal::ZERO);
    assert_ne!(dupont.determining_factor, DeterminingFactor::Stable);
}

#[test]
fn pro_forma_projection_over_the_worked_statement() {
    let statement = worked_statement(2023);
    let projection = project(&statement, ProjectionAssumptions::new(dec!(0.10)));

    assert_eq!(projection.revenue.projected, dec!(33893727.461));
    // Fractions of revenue are preserved.
    let base_cost_share = projection.cost.base / projection.revenue.base;
    let projected_cost_share = projection.cost.projected / projection.revenue.projected;
    assert_eq!(
        base_cost_share.round_dp(10),
        projected_cost_share.round_dp(10)
    );
}

#[test]
fn report_builder_survives_dirty_rows() {
    let report = ReportBuilder::for_year(2023)
        .with_row(BalanceRowBuilder::new(1).named("Cash").worth(dec!(100)).build())
        .with_row(BalanceRowBuilder::new(2).named("Mystery").labeled("???").build())
        .with_row(BalanceRowBuilder::new(3).named("No label").without_label().build())
        .with_row(
            BalanceRowBuilder::new(4)
                .named("No amount")
                .without_amount()
                .build(),
        )
        .build();

    assert_conservation(&report);
    // Rows 1 and 4 survive; 2 and 3 are skipped.
    assert_eq!(report.accounts(Category::Asset).count(), 2);
    assert_eq!(report.totals.get(keys::TOTAL_ASSET), dec!(100));
}
