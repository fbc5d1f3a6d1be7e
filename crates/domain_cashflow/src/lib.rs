//! Cash Flow Domain
//!
//! Builds an indirect-method cash flow statement from two consecutive
//! period reports. Account names are free text, so classification runs on
//! ordered token rule tables with exclusions ahead of inclusions; the
//! result is reconciled against the cash balance delta as a diagnostic.
//!
//! # Classification precedence
//!
//! - depreciation/amortization tokens remove an account from investing
//!   eligibility (the reserve feeds the operating add-back instead)
//! - work-in-process tokens remove an account from both the operating and
//!   the investing sections
//! - cash-like tokens remove an account from classification entirely; cash
//!   is the reconciliation target, never a flow line

pub mod engine;
pub mod rules;
pub mod statement;

pub use engine::cash_flow;
pub use rules::{
    classify_asset, classify_equity, classify_liability, AssetClass, EquityClass, LiabilityClass,
};
pub use statement::{CashFlowStatement, FlowLine, FlowLineKind, FlowSection, Reconciliation};
