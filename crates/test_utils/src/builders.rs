//! Test data builders
//!
//! Builders for raw balance rows and whole period reports with sensible
//! defaults, so tests only spell out the fields they care about.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AccountId, BalanceRow, FiscalYear};
use domain_report::{build_from_rows, Report};

/// Builder for a single raw balance row
#[derive(Debug, Clone)]
pub struct BalanceRowBuilder {
    account_id: AccountId,
    account_name: String,
    category_label: Option<String>,
    subtype: Option<String>,
    amount: Option<Decimal>,
}

impl BalanceRowBuilder {
    /// Starts a row with default values (an asset account worth 100)
    pub fn new(account_id: i64) -> Self {
        Self {
            account_id: AccountId::new(account_id),
            account_name: format!("Account {account_id}"),
            category_label: Some("Asset".to_string()),
            subtype: Some("Current Asset".to_string()),
            amount: Some(dec!(100)),
        }
    }

    /// Sets the account name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.account_name = name.into();
        self
    }

    /// Sets the raw category label
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.category_label = Some(label.into());
        self
    }

    /// Clears the category label
    pub fn without_label(mut self) -> Self {
        self.category_label = None;
        self
    }

    /// Sets the subtype
    pub fn subtyped(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Clears the subtype
    pub fn without_subtype(mut self) -> Self {
        self.subtype = None;
        self
    }

    /// Sets the amount
    pub fn worth(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Clears the amount
    pub fn without_amount(mut self) -> Self {
        self.amount = None;
        self
    }

    /// Builds the row
    pub fn build(self) -> BalanceRow {
        BalanceRow {
            account_id: self.account_id,
            account_name: self.account_name,
            category_label: self.category_label,
            subtype: self.subtype,
            amount: self.amount,
        }
    }
}

/// Builder for a whole period report
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    period: FiscalYear,
    rows: Vec<BalanceRow>,
    next_id: i64,
}

impl ReportBuilder {
    /// Starts an empty report for a year
    pub fn for_year(year: i32) -> Self {
        Self {
            period: FiscalYear::new(year),
            rows: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a fully specified row
    pub fn with_row(mut self, row: BalanceRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Adds an account with an auto-assigned id
    pub fn with_account(
        mut self,
        name: &str,
        label: &str,
        subtype: &str,
        amount: Decimal,
    ) -> Self {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(
            BalanceRowBuilder::new(id)
                .named(name)
                .labeled(label)
                .subtyped(subtype)
                .worth(amount)
                .build(),
        );
        self
    }

    /// The raw rows accumulated so far
    pub fn rows(&self) -> Vec<BalanceRow> {
        self.rows.clone()
    }

    /// Builds the report, discarding diagnostics
    pub fn build(self) -> Report {
        build_from_rows(self.period, self.rows).0
    }
}
