//! Row-level diagnostics
//!
//! Bad rows are absorbed, not fatal: the builder skips them and records
//! what was skipped and why, so callers can surface data-quality problems
//! without losing the rest of the period.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::AccountId;

/// Why a balance row was left out of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The category label matched none of the six categories
    UnclassifiableCategory,
    /// The row carried no category label at all
    MissingCategory,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::UnclassifiableCategory => "unclassifiable category label",
            SkipReason::MissingCategory => "missing category label",
        };
        write!(f, "{label}")
    }
}

/// Record of one skipped row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub account_id: AccountId,
    pub account_name: String,
    /// The raw label as the ledger delivered it, for operator triage
    pub raw_label: Option<String>,
    pub reason: SkipReason,
}

impl RowDiagnostic {
    pub fn new(
        account_id: AccountId,
        account_name: impl Into<String>,
        raw_label: Option<String>,
        reason: SkipReason,
    ) -> Self {
        Self {
            account_id,
            account_name: account_name.into(),
            raw_label,
            reason,
        }
    }
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "account {} ({}): {}",
            self.account_id, self.account_name, self.reason
        )?;
        if let Some(label) = &self.raw_label {
            write!(f, " (label: {label:?})")?;
        }
        Ok(())
    }
}
