//! Database error types

use thiserror::Error;

use core_kernel::SourceError;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not establish or acquire a connection
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    /// A query failed to execute
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DatabaseError::ConnectionFailed(err.to_string())
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

impl From<DatabaseError> for SourceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConnectionFailed(message) => SourceError::connection(message),
            DatabaseError::QueryFailed(message) => SourceError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failure_maps_to_transient_source_error() {
        let err: SourceError = DatabaseError::ConnectionFailed("refused".to_string()).into();
        assert!(err.is_transient());

        let err: SourceError = DatabaseError::QueryFailed("syntax".to_string()).into();
        assert!(!err.is_transient());
    }
}
