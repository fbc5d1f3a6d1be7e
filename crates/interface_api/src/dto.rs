//! Request and response data transfer objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FiscalYear, RowDiagnostic};
use domain_analysis::VerticalAnalysis;
use domain_report::Report;

/// Known periods, most recent first
#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub periods: Vec<FiscalYear>,
}

/// One built report plus its data-quality companions
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: Report,
    /// Rows skipped during the build
    pub diagnostics: Vec<RowDiagnostic>,
    /// Total Asset minus Total Liability+Equity
    pub balance_residual: Decimal,
}

/// Vertical analysis with its optional prose summary
///
/// `summary` is null whenever the summarizer collaborator failed - the
/// figures never depend on it.
#[derive(Debug, Serialize)]
pub struct VerticalResponse {
    pub analysis: VerticalAnalysis,
    pub summary: Option<String>,
}

/// Query parameters for the two-period analyses
#[derive(Debug, Deserialize)]
pub struct ComparativeParams {
    pub base: i32,
    pub analysis: i32,
}

impl ComparativeParams {
    /// The base period must chronologically precede the analysis period
    pub fn ordered(&self) -> Result<(FiscalYear, FiscalYear), String> {
        let base = FiscalYear::new(self.base);
        let analysis = FiscalYear::new(self.analysis);
        if base.precedes(&analysis) {
            Ok((base, analysis))
        } else {
            Err("base period must precede the analysis period".to_string())
        }
    }
}

/// Query parameters for the pro-forma projection
#[derive(Debug, Deserialize)]
pub struct ProFormaParams {
    /// Revenue growth as a decimal (0.15 = +15%)
    pub growth: Decimal,
    /// Optional override of the statutory tax rate
    pub tax_rate: Option<Decimal>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Login response with the issued bearer token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparative_params_ordering() {
        let ok = ComparativeParams {
            base: 2022,
            analysis: 2023,
        };
        assert!(ok.ordered().is_ok());

        let swapped = ComparativeParams {
            base: 2023,
            analysis: 2022,
        };
        assert!(swapped.ordered().is_err());

        let equal = ComparativeParams {
            base: 2023,
            analysis: 2023,
        };
        assert!(equal.ordered().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        assert!(bad.validate().is_err());

        let good = LoginRequest {
            email: "analyst@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(good.validate().is_ok());
    }
}
