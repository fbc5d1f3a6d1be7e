//! Core Kernel - Foundational types for the financial analysis system
//!
//! This crate provides the shared vocabulary used across all domain modules:
//! - Fiscal periods and account identifiers
//! - The six-way statement category enum and its label normalization
//! - Derived-figure value types (relative changes with an explicit
//!   infinity sentinel, qualitative sign classes)
//! - Ledger read ports and their error taxonomy
//! - Row-level diagnostics for skipped data

pub mod category;
pub mod diagnostics;
pub mod figures;
pub mod identifiers;
pub mod period;
pub mod ports;

pub use category::Category;
pub use diagnostics::{RowDiagnostic, SkipReason};
pub use figures::{ChangeClass, RelativeChange};
pub use identifiers::AccountId;
pub use period::FiscalYear;
pub use ports::{
    BalanceRow, BalanceSource, LedgerPort, PeriodCatalog, SourceError, SummaryError, Summarizer,
};
