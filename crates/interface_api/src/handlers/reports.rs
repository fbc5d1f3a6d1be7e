//! Report handlers

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::FiscalYear;
use domain_report::{build_report, BuildOutcome, Report};

use crate::dto::ReportResponse;
use crate::error::ApiError;
use crate::AppState;

/// Builds and returns the full statement report for one fiscal year
pub async fn get_report(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<ReportResponse>, ApiError> {
    let outcome = build_report(state.ledger.as_ref(), FiscalYear::new(year)).await?;
    match outcome {
        BuildOutcome::Built {
            report,
            diagnostics,
        } => Ok(Json(ReportResponse {
            balance_residual: report.balance_residual(),
            report,
            diagnostics,
        })),
        BuildOutcome::PeriodNotFound => Err(ApiError::PeriodNotFound(year)),
        BuildOutcome::NoBalanceData => Err(ApiError::NoBalanceData(year)),
    }
}

/// Builds a report or maps the empty outcomes onto API errors
///
/// Shared by every analysis handler; diagnostics are dropped here because
/// the report endpoint is the place to inspect them.
pub(crate) async fn require_report(
    state: &AppState,
    year: FiscalYear,
) -> Result<Report, ApiError> {
    match build_report(state.ledger.as_ref(), year).await? {
        BuildOutcome::Built { report, .. } => Ok(report),
        BuildOutcome::PeriodNotFound => Err(ApiError::PeriodNotFound(year.year())),
        BuildOutcome::NoBalanceData => Err(ApiError::NoBalanceData(year.year())),
    }
}

/// Builds a report, treating the empty outcomes as absence
///
/// Used where a prior period is optional (ratio trends).
pub(crate) async fn optional_report(
    state: &AppState,
    year: FiscalYear,
) -> Result<Option<Report>, ApiError> {
    Ok(build_report(state.ledger.as_ref(), year).await?.into_report())
}
