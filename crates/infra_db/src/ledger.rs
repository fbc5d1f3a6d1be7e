//! Postgres ledger adapter
//!
//! Implements the two read ports the analysis core consumes: period
//! resolution + joined balance fetch, and period enumeration. The adapter
//! never interprets the data - labels and subtypes pass through as free
//! text for the report builder to normalize.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tracing::warn;

use core_kernel::{
    AccountId, BalanceRow, BalanceSource, FiscalYear, PeriodCatalog, SourceError,
};

use crate::error::DatabaseError;

/// Ledger reads backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Creates the adapter over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn resolve_period(&self, period: FiscalYear) -> Result<Option<i64>, DatabaseError> {
        let row = sqlx::query("SELECT period_id FROM periods WHERE year = $1")
            .bind(period.year())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<i64, _>("period_id")))
    }
}

#[async_trait]
impl BalanceSource for PostgresLedger {
    async fn fetch_period_balances(
        &self,
        period: FiscalYear,
    ) -> Result<Option<Vec<BalanceRow>>, SourceError> {
        let period_id = match self.resolve_period(period).await.map_err(SourceError::from)? {
            Some(id) => id,
            None => return Ok(None),
        };

        let rows = sqlx::query(
            r#"
            SELECT
                c.account_id, c.account_name, c.account_type, c.account_subtype, b.amount
            FROM account_balances b
            JOIN account_catalog c ON b.account_id = c.account_id
            WHERE b.period_id = $1
            ORDER BY c.account_type, c.account_subtype, c.account_id
            "#,
        )
        .bind(period_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)
        .map_err(SourceError::from)?;

        let mut balances = Vec::with_capacity(rows.len());
        for row in rows {
            // A row whose amount column will not decode is a data fault,
            // not an infrastructure fault: drop the row, keep the period.
            let account_id: i64 = match row.try_get("account_id") {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "dropping balance row with unreadable account id");
                    continue;
                }
            };
            let amount = match row.try_get::<Option<Decimal>, _>("amount") {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(account_id, error = %e, "dropping non-numeric balance amount");
                    None
                }
            };

            balances.push(BalanceRow {
                account_id: AccountId::new(account_id),
                account_name: row.try_get::<String, _>("account_name").unwrap_or_default(),
                category_label: row.try_get::<Option<String>, _>("account_type").ok().flatten(),
                subtype: row
                    .try_get::<Option<String>, _>("account_subtype")
                    .ok()
                    .flatten(),
                amount,
            });
        }

        Ok(Some(balances))
    }
}

#[async_trait]
impl PeriodCatalog for PostgresLedger {
    async fn list_periods(&self) -> Result<Vec<FiscalYear>, SourceError> {
        let rows = sqlx::query("SELECT year FROM periods ORDER BY year DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from)
            .map_err(SourceError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| FiscalYear::new(row.get::<i32, _>("year")))
            .collect())
    }
}
