//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::SourceError;

/// API error types
///
/// The two empty-period cases carry distinct error codes on purpose: a
/// missing catalog entry and a period with zero balance rows look the
/// same to the builder but mean different things to an operator.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Period {0} has no catalog entry")]
    PeriodNotFound(i32),

    #[error("Period {0} exists but has no balance data")]
    NoBalanceData(i32),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::PeriodNotFound(_) => (StatusCode::NOT_FOUND, "period_not_found"),
            ApiError::NoBalanceData(_) => (StatusCode::NOT_FOUND, "no_balance_data"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::LedgerUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "ledger_unavailable")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        if err.is_transient() {
            ApiError::LedgerUnavailable(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_source_errors_map_to_unavailable() {
        let err: ApiError = SourceError::connection("refused").into();
        assert!(matches!(err, ApiError::LedgerUnavailable(_)));

        let err: ApiError = SourceError::internal("boom").into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
