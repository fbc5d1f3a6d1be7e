//! Cash flow statement structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::FiscalYear;

/// What produced a flow line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowLineKind {
    /// The starting point of the indirect method
    NetProfit,
    /// Non-cash depreciation added back
    DepreciationAddBack,
    /// Working-capital variation of one account
    WorkingCapital,
    /// Purchase or disposal of a tangible fixed asset
    FixedAsset,
    /// Drawdown or repayment of financial debt
    Financing,
    /// Contribution or withdrawal on a capital account
    CapitalVariation,
    /// Synthetic dividends / retained-earnings reconciling line
    DividendAdjustment,
}

/// One labeled line in a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLine {
    pub label: String,
    pub amount: Decimal,
    pub kind: FlowLineKind,
}

impl FlowLine {
    pub fn new(label: impl Into<String>, amount: Decimal, kind: FlowLineKind) -> Self {
        Self {
            label: label.into(),
            amount,
            kind,
        }
    }
}

/// One of the three statement sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowSection {
    pub lines: Vec<FlowLine>,
    pub total: Decimal,
}

impl FlowSection {
    /// Appends a line and folds it into the section total
    pub fn push(&mut self, line: FlowLine) {
        self.total += line.amount;
        self.lines.push(line);
    }

    /// Finds a line by its label
    pub fn line(&self, label: &str) -> Option<&FlowLine> {
        self.lines.iter().find(|l| l.label == label)
    }
}

/// Check of the computed net flow against the cash balance delta
///
/// Diagnostic output: a failed reconciliation never suppresses the
/// computed sections, it only surfaces the discrepancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Cash-like balances at the start (prior period)
    pub cash_start: Decimal,
    /// Cash-like balances the current period actually shows
    pub cash_end_actual: Decimal,
    /// cash_start + net flow
    pub cash_end_computed: Decimal,
    /// actual - computed
    pub discrepancy: Decimal,
    pub reconciles: bool,
}

/// The indirect-method statement for one period pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub prior_period: FiscalYear,
    pub current_period: FiscalYear,
    pub operating: FlowSection,
    pub investing: FlowSection,
    pub financing: FlowSection,
    pub net_flow: Decimal,
    pub reconciliation: Reconciliation,
}
