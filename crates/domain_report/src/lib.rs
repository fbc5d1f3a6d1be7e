//! Report Building Domain
//!
//! Turns the ledger's flat (account, label, subtype, amount) rows for one
//! fiscal year into a classified, totaled `Report` - the aggregate every
//! downstream analysis consumes.
//!
//! # Key behavior
//!
//! - Free-text category labels normalize to the six fixed categories;
//!   rows that cannot be classified are skipped with a diagnostic, never
//!   miscategorized.
//! - Amounts are summed as delivered (signed); accumulated depreciation /
//!   amortization accounts are forced negative first.
//! - "Period unknown" and "period empty" are distinct outcomes, and both
//!   are distinct from infrastructure faults.

pub mod builder;
pub mod report;
pub mod totals;

pub use builder::{build_from_rows, build_report, is_depreciation_like, BuildOutcome};
pub use report::{AccountBalance, CategorySection, Report, DEFAULT_SUBTYPE};
pub use totals::{keys, Totals};
