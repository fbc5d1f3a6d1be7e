//! Custom test assertions
//!
//! Domain-aware assertion helpers with clearer failure messages than the
//! standard macros.

use rust_decimal::Decimal;

use core_kernel::Category;
use domain_report::Report;

/// Asserts two decimals are equal within a tolerance
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "decimals differ by more than tolerance: actual={actual}, expected={expected}, diff={diff}, tolerance={tolerance}"
    );
}

/// Asserts every category total equals the sum of its account amounts
pub fn assert_conservation(report: &Report) {
    for category in Category::ALL {
        let sum: Decimal = report.accounts(category).map(|a| a.amount).sum();
        assert_eq!(
            report.totals.get(category.name()),
            sum,
            "category total diverged from its account sum for {category}"
        );
    }
}

/// Asserts the balance sheet actually balances (fixture sanity check)
pub fn assert_balanced(report: &Report) {
    assert_eq!(
        report.balance_residual(),
        Decimal::ZERO,
        "fixture balance sheet does not balance (residual {})",
        report.balance_residual()
    );
}
