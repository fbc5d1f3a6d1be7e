//! Analysis handlers
//!
//! One endpoint per derived analysis. All of them build their input
//! reports through the same outcome mapping, then run the pure engines.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use core_kernel::FiscalYear;
use domain_analysis::{
    dupont_analysis, horizontal_analysis, project, ratio_analysis, sources_and_uses,
    vertical_analysis, ComparativeAnalysis, DuPontAnalysis, ProFormaStatement,
    ProjectionAssumptions, RatioAnalysis, SourcesAndUses,
};
use domain_cashflow::{cash_flow, CashFlowStatement};

use crate::dto::{ComparativeParams, ProFormaParams, VerticalResponse};
use crate::error::ApiError;
use crate::handlers::reports::{optional_report, require_report};
use crate::AppState;

/// Common-size analysis for one year, with an optional prose summary
pub async fn vertical(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<VerticalResponse>, ApiError> {
    let report = require_report(&state, FiscalYear::new(year)).await?;
    let analysis = vertical_analysis(&report);

    // A summarizer failure degrades to a null summary; it never touches
    // the computed figures.
    let summary = match serde_json::to_value(&analysis) {
        Ok(payload) => match state.summarizer.summarize(payload).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "summarizer failed, returning figures without prose");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "analysis serialization for summarizer failed");
            None
        }
    };

    Ok(Json(VerticalResponse { analysis, summary }))
}

/// Period-over-period comparison
pub async fn horizontal(
    State(state): State<AppState>,
    Query(params): Query<ComparativeParams>,
) -> Result<Json<ComparativeAnalysis>, ApiError> {
    let (base_year, analysis_year) = params.ordered().map_err(ApiError::BadRequest)?;
    let base = require_report(&state, base_year).await?;
    let analysis = require_report(&state, analysis_year).await?;
    Ok(Json(horizontal_analysis(&base, &analysis)))
}

/// Ratio families for one year, with prior-year trend values when present
pub async fn ratios(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<RatioAnalysis>, ApiError> {
    let current_year = FiscalYear::new(year);
    let current = require_report(&state, current_year).await?;
    let prior = optional_report(&state, current_year.previous()).await?;
    Ok(Json(ratio_analysis(&current, prior.as_ref())))
}

/// Sources and uses of funds between two periods
pub async fn sources_uses(
    State(state): State<AppState>,
    Query(params): Query<ComparativeParams>,
) -> Result<Json<SourcesAndUses>, ApiError> {
    let (base_year, analysis_year) = params.ordered().map_err(ApiError::BadRequest)?;
    let base = require_report(&state, base_year).await?;
    let analysis = require_report(&state, analysis_year).await?;
    Ok(Json(sources_and_uses(&base, &analysis)))
}

/// Indirect-method cash flow for a year against its predecessor
pub async fn cashflow(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<CashFlowStatement>, ApiError> {
    let current_year = FiscalYear::new(year);
    let prior = require_report(&state, current_year.previous()).await?;
    let current = require_report(&state, current_year).await?;
    Ok(Json(cash_flow(&prior, &current)))
}

/// DuPont decomposition for a year against its predecessor
pub async fn dupont(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<DuPontAnalysis>, ApiError> {
    let current_year = FiscalYear::new(year);
    let prior = require_report(&state, current_year.previous()).await?;
    let current = require_report(&state, current_year).await?;
    Ok(Json(dupont_analysis(&prior, &current)))
}

/// Percent-of-sales pro-forma projection
pub async fn proforma(
    State(state): State<AppState>,
    Path(year): Path<i32>,
    Query(params): Query<ProFormaParams>,
) -> Result<Json<ProFormaStatement>, ApiError> {
    let base = require_report(&state, FiscalYear::new(year)).await?;
    let mut assumptions = ProjectionAssumptions::new(params.growth);
    if let Some(tax_rate) = params.tax_rate {
        assumptions = assumptions.with_tax_rate(tax_rate);
    }
    Ok(Json(project(&base, assumptions)))
}
