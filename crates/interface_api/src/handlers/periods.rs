//! Period catalog handlers

use axum::{extract::State, Json};

use crate::dto::PeriodsResponse;
use crate::error::ApiError;
use crate::AppState;

/// Lists known fiscal years, most recent first
pub async fn list_periods(
    State(state): State<AppState>,
) -> Result<Json<PeriodsResponse>, ApiError> {
    let periods = state.ledger.list_periods().await?;
    Ok(Json(PeriodsResponse { periods }))
}
