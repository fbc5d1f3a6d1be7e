//! Pro-forma income statement projection
//!
//! Classic percent-of-sales: revenue grows by the stated rate, cost and
//! operating expense hold their base-year share of revenue, and tax is a
//! flat statutory rate on positive pre-tax profit. The rate is a named
//! constant so a different regime can override it without touching the
//! projection.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Category, FiscalYear};
use domain_report::Report;

/// Statutory tax rate applied to positive pre-tax profit
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.30);

/// Growth and tax assumptions for one projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Revenue growth as a decimal (0.15 = +15%)
    pub growth_rate: Decimal,
    pub tax_rate: Decimal,
}

impl ProjectionAssumptions {
    /// Assumptions with the default statutory tax rate
    pub fn new(growth_rate: Decimal) -> Self {
        Self {
            growth_rate,
            tax_rate: DEFAULT_TAX_RATE,
        }
    }

    /// Overrides the tax rate
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}

/// One projected statement line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedLine {
    pub base: Decimal,
    pub projected: Decimal,
    pub delta: Decimal,
}

impl ProjectedLine {
    fn new(base: Decimal, projected: Decimal) -> Self {
        Self {
            base,
            projected,
            delta: projected - base,
        }
    }
}

/// Base-year figures next to their projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProFormaStatement {
    pub base_period: FiscalYear,
    pub assumptions: ProjectionAssumptions,
    pub revenue: ProjectedLine,
    pub cost: ProjectedLine,
    pub gross_profit: ProjectedLine,
    pub operating_expense: ProjectedLine,
    pub pre_tax_profit: ProjectedLine,
    pub tax: ProjectedLine,
    pub net_profit: ProjectedLine,
}

/// Projects the income statement forward one period
pub fn project(base: &Report, assumptions: ProjectionAssumptions) -> ProFormaStatement {
    let base_revenue = base.totals.get(Category::Revenue.name());
    let base_cost = base.totals.get(Category::Cost.name());
    let base_expense = base.totals.get(Category::Expense.name());

    let projected_revenue = base_revenue * (Decimal::ONE + assumptions.growth_rate);

    // Cost and operating expense keep their base share of revenue.
    let cost_fraction = fraction(base_cost, base_revenue);
    let expense_fraction = fraction(base_expense, base_revenue);
    let projected_cost = projected_revenue * cost_fraction;
    let projected_expense = projected_revenue * expense_fraction;

    let base_gross = base_revenue - base_cost;
    let projected_gross = projected_revenue - projected_cost;

    let base_pre_tax = base_gross - base_expense;
    let projected_pre_tax = projected_gross - projected_expense;

    // Tax is never carried forward proportionally - always recomputed
    // from pre-tax profit, and only when that profit is positive.
    let base_tax = tax_on(base_pre_tax, assumptions.tax_rate);
    let projected_tax = tax_on(projected_pre_tax, assumptions.tax_rate);

    ProFormaStatement {
        base_period: base.period(),
        assumptions,
        revenue: ProjectedLine::new(base_revenue, projected_revenue),
        cost: ProjectedLine::new(base_cost, projected_cost),
        gross_profit: ProjectedLine::new(base_gross, projected_gross),
        operating_expense: ProjectedLine::new(base_expense, projected_expense),
        pre_tax_profit: ProjectedLine::new(base_pre_tax, projected_pre_tax),
        tax: ProjectedLine::new(base_tax, projected_tax),
        net_profit: ProjectedLine::new(base_pre_tax - base_tax, projected_pre_tax - projected_tax),
    }
}

fn fraction(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole
    }
}

fn tax_on(pre_tax_profit: Decimal, rate: Decimal) -> Decimal {
    if pre_tax_profit > Decimal::ZERO {
        pre_tax_profit * rate
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{AccountId, BalanceRow};
    use domain_report::build_from_rows;

    fn row(id: i64, name: &str, label: &str, amount: Decimal) -> BalanceRow {
        BalanceRow {
            account_id: AccountId::new(id),
            account_name: name.to_string(),
            category_label: Some(label.to_string()),
            subtype: Some("Operating".to_string()),
            amount: Some(amount),
        }
    }

    fn base_report() -> Report {
        let rows = vec![
            row(1, "Sales", "Revenue", dec!(1000)),
            row(2, "Cost of sales", "Cost", dec!(600)),
            row(3, "Overhead", "Expense", dec!(200)),
        ];
        build_from_rows(FiscalYear::new(2023), rows).0
    }

    #[test]
    fn test_revenue_grows_by_rate() {
        let statement = project(&base_report(), ProjectionAssumptions::new(dec!(0.15)));
        assert_eq!(statement.revenue.projected, dec!(1150));
        assert_eq!(statement.revenue.delta, dec!(150));
    }

    #[test]
    fn test_cost_and_expense_hold_their_revenue_share() {
        let statement = project(&base_report(), ProjectionAssumptions::new(dec!(0.15)));
        // 60% of 1150 and 20% of 1150.
        assert_eq!(statement.cost.projected, dec!(690));
        assert_eq!(statement.operating_expense.projected, dec!(230));
        assert_eq!(statement.gross_profit.projected, dec!(460));
    }

    #[test]
    fn test_tax_is_flat_rate_on_positive_profit() {
        let statement = project(&base_report(), ProjectionAssumptions::new(dec!(0.15)));
        // Pre-tax 1150 - 690 - 230 = 230; tax 30%.
        assert_eq!(statement.pre_tax_profit.projected, dec!(230));
        assert_eq!(statement.tax.projected, dec!(69));
        assert_eq!(statement.net_profit.projected, dec!(161));
    }

    #[test]
    fn test_loss_pays_no_tax() {
        let rows = vec![
            row(1, "Sales", "Revenue", dec!(100)),
            row(2, "Cost of sales", "Cost", dec!(150)),
        ];
        let base = build_from_rows(FiscalYear::new(2023), rows).0;
        let statement = project(&base, ProjectionAssumptions::new(dec!(0.10)));

        assert!(statement.pre_tax_profit.projected < Decimal::ZERO);
        assert_eq!(statement.tax.projected, Decimal::ZERO);
        assert_eq!(
            statement.net_profit.projected,
            statement.pre_tax_profit.projected
        );
    }

    #[test]
    fn test_tax_rate_is_overridable() {
        let statement = project(
            &base_report(),
            ProjectionAssumptions::new(dec!(0.15)).with_tax_rate(dec!(0.25)),
        );
        assert_eq!(statement.tax.projected, dec!(57.50));
    }

    #[test]
    fn test_zero_revenue_base_projects_flat_zero() {
        let rows = vec![row(1, "Overhead", "Expense", dec!(50))];
        let base = build_from_rows(FiscalYear::new(2023), rows).0;
        let statement = project(&base, ProjectionAssumptions::new(dec!(0.20)));

        assert_eq!(statement.revenue.projected, Decimal::ZERO);
        assert_eq!(statement.cost.projected, Decimal::ZERO);
        // The base expense is real but has no revenue share to carry.
        assert_eq!(statement.operating_expense.projected, Decimal::ZERO);
    }
}
