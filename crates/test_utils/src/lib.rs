//! Shared Test Utilities
//!
//! Builders, fixtures, assertions, and an in-memory ledger fake used by
//! the test suites across the workspace.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod ledger;

pub use assertions::{assert_balanced, assert_conservation, assert_decimal_approx_eq};
pub use builders::{BalanceRowBuilder, ReportBuilder};
pub use fixtures::{two_period_company, worked_statement};
pub use ledger::InMemoryLedger;
