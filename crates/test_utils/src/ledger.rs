//! In-memory ledger fake
//!
//! Implements both read ports over a fixed map of periods, plus a failure
//! switch for exercising the infrastructure-fault path.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use core_kernel::{BalanceRow, BalanceSource, FiscalYear, PeriodCatalog, SourceError};

/// A ledger held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    periods: BTreeMap<FiscalYear, Vec<BalanceRow>>,
    unreachable: AtomicBool,
}

impl InMemoryLedger {
    /// Creates an empty ledger (every period unknown)
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a period with its rows
    pub fn with_period(mut self, year: i32, rows: Vec<BalanceRow>) -> Self {
        self.periods.insert(FiscalYear::new(year), rows);
        self
    }

    /// Registers a period that exists but has no balance rows
    pub fn with_empty_period(self, year: i32) -> Self {
        self.with_period(year, Vec::new())
    }

    /// Makes every subsequent read fail with a connection error
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), SourceError> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(SourceError::connection("in-memory ledger marked unreachable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BalanceSource for InMemoryLedger {
    async fn fetch_period_balances(
        &self,
        period: FiscalYear,
    ) -> Result<Option<Vec<BalanceRow>>, SourceError> {
        self.check_reachable()?;
        Ok(self.periods.get(&period).cloned())
    }
}

#[async_trait]
impl PeriodCatalog for InMemoryLedger {
    async fn list_periods(&self) -> Result<Vec<FiscalYear>, SourceError> {
        self.check_reachable()?;
        Ok(self.periods.keys().rev().copied().collect())
    }
}
