//! Financial ratio engine
//!
//! Derives the liquidity, activity, leverage, and profitability families
//! from one report, with optional prior-period values for trend display.
//! Figures are pulled out of the report by literal subtype keys (current
//! assets / current liabilities) and by account-name tokens; the token
//! corpus covers the English terms and the Spanish ones the source books
//! use.
//!
//! A ratio whose denominator is zero or missing is omitted - the engine
//! never emits Inf or NaN.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::{Category, FiscalYear};
use domain_report::{keys, Report};

const CURRENT_SUBTYPE_TOKENS: [&str; 2] = ["current", "corriente"];
const INVENTORY_TOKENS: [&str; 3] = ["inventor", "inventar", "existencia"];
const RECEIVABLE_TOKENS: [&str; 4] = ["receivable", "cobrar", "client", "deudor"];
const FIXED_ASSET_TOKENS: [&str; 8] = [
    "fixed", "fijo", "propert", "propiedad", "equip", "maquinar", "planta", "edificio",
];
const FINANCIAL_EXPENSE_TOKENS: [&str; 3] = ["interest", "interes", "financ"];

/// Days in the commercial year used for days-sales-outstanding
const COMMERCIAL_YEAR_DAYS: Decimal = dec!(360);

/// Qualitative position of a ratio against its band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioState {
    Optimal,
    High,
    Low,
    /// Acceptable but below the optimal tier (return-style ratios only)
    Normal,
}

impl fmt::Display for RatioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatioState::Optimal => "optimal",
            RatioState::High => "high",
            RatioState::Low => "low",
            RatioState::Normal => "normal",
        };
        write!(f, "{label}")
    }
}

/// The band a ratio is judged against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimalBand {
    /// optimal iff lo <= value <= hi
    Closed { lo: Decimal, hi: Decimal },
    /// optimal iff value >= lo; below is low (never high)
    AtLeast { lo: Decimal },
    /// optimal iff value > 0
    Positive,
    /// optimal above `optimal`, normal above `normal`, low below
    Tiered { optimal: Decimal, normal: Decimal },
}

impl OptimalBand {
    /// Judges a value against this band
    pub fn state(&self, value: Decimal) -> RatioState {
        match self {
            OptimalBand::Closed { lo, hi } => {
                if value < *lo {
                    RatioState::Low
                } else if value > *hi {
                    RatioState::High
                } else {
                    RatioState::Optimal
                }
            }
            OptimalBand::AtLeast { lo } => {
                if value >= *lo {
                    RatioState::Optimal
                } else {
                    RatioState::Low
                }
            }
            OptimalBand::Positive => {
                if value > Decimal::ZERO {
                    RatioState::Optimal
                } else {
                    RatioState::Low
                }
            }
            OptimalBand::Tiered { optimal, normal } => {
                if value >= *optimal {
                    RatioState::Optimal
                } else if value >= *normal {
                    RatioState::Normal
                } else {
                    RatioState::Low
                }
            }
        }
    }
}

impl fmt::Display for OptimalBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimalBand::Closed { lo, hi } => write!(f, "{lo} - {hi}"),
            OptimalBand::AtLeast { lo } => write!(f, ">= {lo}"),
            OptimalBand::Positive => write!(f, "> 0"),
            OptimalBand::Tiered { optimal, normal } => {
                write!(f, ">= {optimal} (normal >= {normal})")
            }
        }
    }
}

/// One named ratio with its judgement and templated reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    pub name: String,
    pub value: Decimal,
    pub formula: String,
    pub optimal: OptimalBand,
    pub state: RatioState,
    pub interpretation: String,
    /// Same figure computed on the prior report, when one was supplied
    pub prior_value: Option<Decimal>,
}

impl Ratio {
    fn new(name: &str, formula: &str, value: Decimal, optimal: OptimalBand) -> Self {
        let value = value.round_dp(4);
        let state = optimal.state(value);
        Self {
            name: name.to_string(),
            value,
            formula: formula.to_string(),
            interpretation: interpret(name, value, state),
            optimal,
            state,
            prior_value: None,
        }
    }
}

/// Deterministic reading: plain string formatting, no generation
fn interpret(name: &str, value: Decimal, state: RatioState) -> String {
    match state {
        RatioState::Optimal => format!("{name} of {value} sits inside its optimal band."),
        RatioState::High => format!("{name} of {value} is above its optimal band."),
        RatioState::Low => format!("{name} of {value} is below its optimal band."),
        RatioState::Normal => {
            format!("{name} of {value} is acceptable but short of the optimal tier.")
        }
    }
}

/// The four ratio families for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioAnalysis {
    pub period: FiscalYear,
    pub prior_period: Option<FiscalYear>,
    pub liquidity: Vec<Ratio>,
    pub activity: Vec<Ratio>,
    pub leverage: Vec<Ratio>,
    pub profitability: Vec<Ratio>,
}

impl RatioAnalysis {
    /// All ratios across the four families
    pub fn all(&self) -> impl Iterator<Item = &Ratio> {
        self.liquidity
            .iter()
            .chain(&self.activity)
            .chain(&self.leverage)
            .chain(&self.profitability)
    }

    /// Looks a ratio up by name
    pub fn ratio(&self, name: &str) -> Option<&Ratio> {
        self.all().find(|r| r.name == name)
    }
}

/// Raw figures the families are computed from
#[derive(Debug, Clone, Copy, Default)]
struct RatioInputs {
    current_assets: Option<Decimal>,
    current_liabilities: Option<Decimal>,
    inventory: Decimal,
    receivables: Decimal,
    fixed_assets: Decimal,
    financial_expense: Decimal,
    total_asset: Decimal,
    total_liability: Decimal,
    total_equity: Decimal,
    revenue: Decimal,
    cost: Decimal,
    gross_profit: Decimal,
    operating_profit: Decimal,
    net_profit: Decimal,
}

impl RatioInputs {
    fn extract(report: &Report) -> Self {
        let inputs = Self {
            current_assets: report
                .subtype_sum(Category::Asset, |s| contains_any(s, &CURRENT_SUBTYPE_TOKENS)),
            current_liabilities: report
                .subtype_sum(Category::Liability, |s| contains_any(s, &CURRENT_SUBTYPE_TOKENS)),
            inventory: name_sum(report, Category::Asset, &INVENTORY_TOKENS),
            receivables: name_sum(report, Category::Asset, &RECEIVABLE_TOKENS),
            fixed_assets: name_sum(report, Category::Asset, &FIXED_ASSET_TOKENS),
            financial_expense: name_sum(report, Category::Expense, &FINANCIAL_EXPENSE_TOKENS),
            total_asset: report.totals.get(keys::TOTAL_ASSET),
            total_liability: report.totals.get(keys::TOTAL_LIABILITY),
            total_equity: report.totals.get(keys::TOTAL_EQUITY),
            revenue: report.totals.get(Category::Revenue.name()),
            cost: report.totals.get(Category::Cost.name()),
            gross_profit: report.totals.get(keys::GROSS_PROFIT),
            operating_profit: report.totals.get(keys::OPERATING_PROFIT),
            net_profit: report.totals.get(keys::NET_PROFIT),
        };
        debug!(
            period = %report.period(),
            current_assets = ?inputs.current_assets,
            current_liabilities = ?inputs.current_liabilities,
            "ratio figures extracted"
        );
        inputs
    }
}

fn contains_any(haystack: &str, tokens: &[&str]) -> bool {
    let needle = haystack.to_lowercase();
    tokens.iter().any(|token| needle.contains(token))
}

/// Sum of a category's accounts whose name carries any of the tokens
fn name_sum(report: &Report, category: Category, tokens: &[&str]) -> Decimal {
    report
        .accounts(category)
        .filter(|account| contains_any(&account.name, tokens))
        .map(|account| account.amount)
        .sum()
}

/// Guarded division: `None` when the denominator is zero
fn ratio_of(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Computes the four families for a report, with prior-period trend values
pub fn ratio_analysis(current: &Report, prior: Option<&Report>) -> RatioAnalysis {
    let inputs = RatioInputs::extract(current);
    let mut analysis = RatioAnalysis {
        period: current.period(),
        prior_period: prior.map(Report::period),
        liquidity: liquidity(&inputs),
        activity: activity(&inputs),
        leverage: leverage(&inputs),
        profitability: profitability(&inputs),
    };

    if let Some(prior_report) = prior {
        let prior_inputs = RatioInputs::extract(prior_report);
        let prior_families: Vec<Ratio> = liquidity(&prior_inputs)
            .into_iter()
            .chain(activity(&prior_inputs))
            .chain(leverage(&prior_inputs))
            .chain(profitability(&prior_inputs))
            .collect();

        for family in [
            &mut analysis.liquidity,
            &mut analysis.activity,
            &mut analysis.leverage,
            &mut analysis.profitability,
        ] {
            for ratio in family.iter_mut() {
                ratio.prior_value = prior_families
                    .iter()
                    .find(|p| p.name == ratio.name)
                    .map(|p| p.value);
            }
        }
    }

    analysis
}

fn liquidity(inputs: &RatioInputs) -> Vec<Ratio> {
    let mut ratios = Vec::new();
    if let (Some(ca), Some(cl)) = (inputs.current_assets, inputs.current_liabilities) {
        if let Some(value) = ratio_of(ca, cl) {
            ratios.push(Ratio::new(
                "Current Ratio",
                "Current Assets / Current Liabilities",
                value,
                OptimalBand::Closed {
                    lo: dec!(1.5),
                    hi: dec!(2.0),
                },
            ));
        }
        if let Some(value) = ratio_of(ca - inputs.inventory, cl) {
            ratios.push(Ratio::new(
                "Quick Ratio",
                "(Current Assets - Inventory) / Current Liabilities",
                value,
                OptimalBand::AtLeast { lo: dec!(1.0) },
            ));
        }
        ratios.push(Ratio::new(
            "Working Capital",
            "Current Assets - Current Liabilities",
            ca - cl,
            OptimalBand::Positive,
        ));
    }
    ratios
}

fn activity(inputs: &RatioInputs) -> Vec<Ratio> {
    let mut ratios = Vec::new();
    if let Some(value) = ratio_of(inputs.cost, inputs.inventory) {
        ratios.push(Ratio::new(
            "Inventory Turnover",
            "Cost / Inventory",
            value,
            OptimalBand::Closed {
                lo: dec!(5),
                hi: dec!(10),
            },
        ));
    }
    if let Some(turnover) = ratio_of(inputs.revenue, inputs.receivables) {
        ratios.push(Ratio::new(
            "Receivables Turnover",
            "Revenue / Receivables",
            turnover,
            OptimalBand::Closed {
                lo: dec!(6),
                hi: dec!(12),
            },
        ));
        if let Some(days) = ratio_of(COMMERCIAL_YEAR_DAYS, turnover) {
            ratios.push(Ratio::new(
                "Days Sales Outstanding",
                "360 / Receivables Turnover",
                days,
                OptimalBand::Closed {
                    lo: dec!(30),
                    hi: dec!(45),
                },
            ));
        }
    }
    if let Some(value) = ratio_of(inputs.revenue, inputs.fixed_assets) {
        ratios.push(Ratio::new(
            "Fixed-Asset Turnover",
            "Revenue / Fixed Assets",
            value,
            OptimalBand::Closed {
                lo: dec!(5),
                hi: dec!(8),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.revenue, inputs.total_asset) {
        ratios.push(Ratio::new(
            "Total-Asset Turnover",
            "Revenue / Total Assets",
            value,
            OptimalBand::Closed {
                lo: dec!(1.0),
                hi: dec!(2.5),
            },
        ));
    }
    ratios
}

fn leverage(inputs: &RatioInputs) -> Vec<Ratio> {
    let mut ratios = Vec::new();
    if let Some(value) = ratio_of(inputs.total_liability, inputs.total_asset) {
        ratios.push(Ratio::new(
            "Debt Ratio",
            "Total Liabilities / Total Assets",
            value,
            OptimalBand::Closed {
                lo: dec!(0.3),
                hi: dec!(0.5),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.total_liability, inputs.total_equity) {
        ratios.push(Ratio::new(
            "Debt-to-Equity",
            "Total Liabilities / Total Equity",
            value,
            OptimalBand::Closed {
                lo: dec!(0.5),
                hi: dec!(1.0),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.operating_profit, inputs.financial_expense) {
        ratios.push(Ratio::new(
            "Interest Coverage",
            "Operating Profit / Financial Expense",
            value,
            OptimalBand::Closed {
                lo: dec!(3),
                hi: dec!(5),
            },
        ));
    }
    ratios
}

fn profitability(inputs: &RatioInputs) -> Vec<Ratio> {
    let hundred = dec!(100);
    let mut ratios = Vec::new();
    if let Some(value) = ratio_of(inputs.gross_profit, inputs.revenue) {
        ratios.push(Ratio::new(
            "Gross Margin",
            "Gross Profit / Revenue x 100",
            value * hundred,
            OptimalBand::Closed {
                lo: dec!(20),
                hi: dec!(40),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.operating_profit, inputs.revenue) {
        ratios.push(Ratio::new(
            "Operating Margin",
            "Operating Profit / Revenue x 100",
            value * hundred,
            OptimalBand::Closed {
                lo: dec!(10),
                hi: dec!(20),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.net_profit, inputs.revenue) {
        ratios.push(Ratio::new(
            "Net Margin",
            "Net Profit / Revenue x 100",
            value * hundred,
            OptimalBand::Closed {
                lo: dec!(5),
                hi: dec!(10),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.net_profit, inputs.total_asset) {
        ratios.push(Ratio::new(
            "Return on Assets",
            "Net Profit / Total Assets x 100",
            value * hundred,
            OptimalBand::Closed {
                lo: dec!(5),
                hi: dec!(10),
            },
        ));
    }
    if let Some(value) = ratio_of(inputs.net_profit, inputs.total_equity) {
        ratios.push(Ratio::new(
            "Return on Equity",
            "Net Profit / Total Equity x 100",
            value * hundred,
            OptimalBand::Tiered {
                optimal: dec!(15),
                normal: dec!(10),
            },
        ));
    }
    ratios
}
