//! Error handling utilities for repositories

use pipe_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Convert a SQLx error raised while reading `table`, separating rows that
/// could not be decoded from connectivity or query failures
pub fn map_read_error(table: &'static str) -> impl Fn(SqlxError) -> DomainError {
    move |e| match e {
        SqlxError::ColumnDecode { .. } | SqlxError::ColumnNotFound(_) | SqlxError::Decode(_) => {
            DomainError::MalformedRow {
                table,
                reason: e.to_string(),
            }
        }
        other => map_db_error(other),
    }
}
