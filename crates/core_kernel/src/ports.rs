//! Ledger ports
//!
//! The analysis core never talks to storage directly. It consumes two read
//! ports - one for balance rows, one for period enumeration - and produces
//! structures for presentation collaborators. Adapters (database, in-memory
//! fakes) implement these traits.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::AccountId;
use crate::period::FiscalYear;

/// A raw balance fact as the ledger stores it, before classification
///
/// Category label and subtype are free text from the catalog; amount may be
/// missing on incomplete rows. Cleaning these up is the report builder's
/// job, not the adapter's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub account_id: AccountId,
    pub account_name: String,
    pub category_label: Option<String>,
    pub subtype: Option<String>,
    pub amount: Option<Decimal>,
}

/// Failure of a ledger read
///
/// These are infrastructure faults. "Period unknown" and "period has no
/// rows" are NOT errors - they are ordinary `None`/empty outcomes of the
/// port methods.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection to the underlying store failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The read timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// Anything else the adapter could not classify
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SourceError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        SourceError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        SourceError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if a retry may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SourceError::Connection { .. } | SourceError::Timeout { .. }
        )
    }
}

/// Read port for per-period balance rows
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetches the joined (account, label, subtype, amount) rows for a period
    ///
    /// Returns `Ok(None)` when the period has no catalog entry. A period
    /// that exists but has zero balance rows returns `Ok(Some(vec![]))`.
    async fn fetch_period_balances(
        &self,
        period: FiscalYear,
    ) -> Result<Option<Vec<BalanceRow>>, SourceError>;
}

/// Read port for period enumeration
#[async_trait]
pub trait PeriodCatalog: Send + Sync {
    /// Lists known periods, most recent first
    async fn list_periods(&self) -> Result<Vec<FiscalYear>, SourceError>;
}

/// Convenience supertrait for adapters that provide both reads
pub trait LedgerPort: BalanceSource + PeriodCatalog {}

impl<T: BalanceSource + PeriodCatalog> LedgerPort for T {}

/// Failure of the summarization collaborator
///
/// Kept separate from `SourceError`: a missing summary never affects
/// computed figures, so callers degrade instead of propagating.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Summarizer not configured: {0}")]
    Unavailable(String),

    #[error("Summarizer upstream failure: {0}")]
    Upstream(String),
}

/// Sink that turns a structured report into formatted prose
///
/// The payload is the already-serialized analysis; implementations never
/// get to change numbers, only narrate them.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, report: serde_json::Value) -> Result<String, SummaryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_transient() {
        assert!(SourceError::connection("refused").is_transient());
        assert!(SourceError::Timeout {
            operation: "fetch_period_balances".to_string(),
            duration_ms: 5000,
        }
        .is_transient());
        assert!(!SourceError::internal("bad row").is_transient());
    }
}
