//! DuPont decomposition
//!
//! Breaks return on equity into net margin × asset turnover × equity
//! multiplier for two consecutive periods and names the factor that drove
//! the year-over-year move.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Category, FiscalYear};
use domain_report::{keys, Report};

/// Factor moves under this relative threshold read as noise
const STABILITY_THRESHOLD: Decimal = dec!(0.01);

/// The three factors and their product for one period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuPontFactors {
    pub period: FiscalYear,
    /// Net profit / revenue
    pub net_margin: Decimal,
    /// Revenue / total assets
    pub asset_turnover: Decimal,
    /// Total assets / total equity
    pub equity_multiplier: Decimal,
    /// Product of the three factors
    pub roe: Decimal,
}

impl DuPontFactors {
    /// Computes the decomposition for one report
    ///
    /// A zero denominator zeroes that factor rather than erroring; a dead
    /// factor then zeroes the product too.
    pub fn from_report(report: &Report) -> Self {
        let revenue = report.totals.get(Category::Revenue.name());
        let total_asset = report.totals.get(keys::TOTAL_ASSET);
        let total_equity = report.totals.get(keys::TOTAL_EQUITY);
        let net_profit = report.totals.get(keys::NET_PROFIT);

        let net_margin = guarded(net_profit, revenue);
        let asset_turnover = guarded(revenue, total_asset);
        let equity_multiplier = guarded(total_asset, total_equity);

        Self {
            period: report.period(),
            net_margin,
            asset_turnover,
            equity_multiplier,
            roe: net_margin * asset_turnover * equity_multiplier,
        }
    }
}

fn guarded(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Which factor explains the ROE move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeterminingFactor {
    NetMargin,
    AssetTurnover,
    EquityMultiplier,
    /// ROE barely moved (under 1% relative)
    Stable,
}

impl fmt::Display for DeterminingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeterminingFactor::NetMargin => "net margin",
            DeterminingFactor::AssetTurnover => "asset turnover",
            DeterminingFactor::EquityMultiplier => "equity multiplier",
            DeterminingFactor::Stable => "stable",
        };
        write!(f, "{label}")
    }
}

/// Two-period decomposition with attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuPontAnalysis {
    pub prior: DuPontFactors,
    pub current: DuPontFactors,
    /// Relative change of each factor (prior -> current)
    pub net_margin_change: Decimal,
    pub asset_turnover_change: Decimal,
    pub equity_multiplier_change: Decimal,
    pub roe_change: Decimal,
    pub determining_factor: DeterminingFactor,
}

/// Decomposes both periods and attributes the ROE move
///
/// When ROE declined, the determining factor is the one with the most
/// negative relative change; when it improved, the most positive.
pub fn dupont_analysis(prior: &Report, current: &Report) -> DuPontAnalysis {
    let prior_factors = DuPontFactors::from_report(prior);
    let current_factors = DuPontFactors::from_report(current);

    let net_margin_change = relative(prior_factors.net_margin, current_factors.net_margin);
    let asset_turnover_change =
        relative(prior_factors.asset_turnover, current_factors.asset_turnover);
    let equity_multiplier_change = relative(
        prior_factors.equity_multiplier,
        current_factors.equity_multiplier,
    );
    let roe_change = relative(prior_factors.roe, current_factors.roe);

    let changes = [
        (DeterminingFactor::NetMargin, net_margin_change),
        (DeterminingFactor::AssetTurnover, asset_turnover_change),
        (DeterminingFactor::EquityMultiplier, equity_multiplier_change),
    ];

    let determining_factor = if roe_change.abs() < STABILITY_THRESHOLD {
        DeterminingFactor::Stable
    } else if roe_change < Decimal::ZERO {
        changes
            .iter()
            .min_by(|a, b| a.1.cmp(&b.1))
            .map(|(factor, _)| *factor)
            .unwrap_or(DeterminingFactor::Stable)
    } else {
        changes
            .iter()
            .max_by(|a, b| a.1.cmp(&b.1))
            .map(|(factor, _)| *factor)
            .unwrap_or(DeterminingFactor::Stable)
    };

    DuPontAnalysis {
        prior: prior_factors,
        current: current_factors,
        net_margin_change,
        asset_turnover_change,
        equity_multiplier_change,
        roe_change,
        determining_factor,
    }
}

/// Relative change prior -> current, zero when there is no prior base
fn relative(prior: Decimal, current: Decimal) -> Decimal {
    if prior.is_zero() {
        Decimal::ZERO
    } else {
        current / prior - Decimal::ONE
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
            subtype: Some("General".to_string()),
            amount: Some(amount),
        }
    }

    /// Revenue, assets, equity fixed; net profit varies via expenses.
    fn report(year: i32, expense: Decimal) -> Report {
        let rows = vec![
            row(1, "Operating assets", "Asset", dec!(2000)),
            row(2, "Share capital", "Equity", dec!(1000)),
            row(3, "Sales", "Revenue", dec!(1000)),
            row(4, "Overhead", "Expense", expense),
        ];
        build_from_rows(FiscalYear::new(year), rows).0
    }

    #[test]
    fn test_factors_multiply_to_roe() {
        let factors = DuPontFactors::from_report(&report(2023, dec!(900)));
        assert_eq!(factors.net_margin, dec!(0.1)); // 100 / 1000
        assert_eq!(factors.asset_turnover, dec!(0.5)); // 1000 / 2000
        assert_eq!(factors.equity_multiplier, dec!(2)); // 2000 / 1000
        assert_eq!(factors.roe, dec!(0.1));
    }

    #[test]
    fn test_zero_denominator_zeroes_the_factor() {
        let rows = vec![row(1, "Sales", "Revenue", dec!(1000))];
        let report = build_from_rows(FiscalYear::new(2023), rows).0;
        let factors = DuPontFactors::from_report(&report);
        assert_eq!(factors.asset_turnover, Decimal::ZERO);
        assert_eq!(factors.equity_multiplier, Decimal::ZERO);
        assert_eq!(factors.roe, Decimal::ZERO);
    }

    #[test]
    fn test_declining_roe_names_the_worst_factor() {
        // Prior ROE 10% (net margin 0.10); current ROE 8% via margin drop,
        // turnover and multiplier unchanged.
        let prior = report(2022, dec!(900));
        let current = report(2023, dec!(920));

        let analysis = dupont_analysis(&prior, &current);
        assert!(analysis.roe_change < Decimal::ZERO);
        assert_eq!(analysis.determining_factor, DeterminingFactor::NetMargin);
        assert_eq!(analysis.asset_turnover_change, Decimal::ZERO);
        assert_eq!(analysis.equity_multiplier_change, Decimal::ZERO);
    }

    #[test]
    fn test_improving_roe_names_the_best_factor() {
        let prior = report(2022, dec!(920));
        let current = report(2023, dec!(900));

        let analysis = dupont_analysis(&prior, &current);
        assert!(analysis.roe_change > Decimal::ZERO);
        assert_eq!(analysis.determining_factor, DeterminingFactor::NetMargin);
    }

    #[test]
    fn test_near_zero_move_reads_stable() {
        let prior = report(2022, dec!(900));
        let current = report(2023, dec!(900.5));

        let analysis = dupont_analysis(&prior, &current);
        assert_eq!(analysis.determining_factor, DeterminingFactor::Stable);
    }
}
