//! Helpers shared by the soft-deletable catalogue repositories.

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

/// Build a `LIKE` pattern matching `term` anywhere, lowercased and with
/// wildcards in the term escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Map a unique index violation to a conflict; other
/// errors stay database errors.
pub(crate) fn unique_conflict(err: DbErr, message: &str, cause: &'static str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!("Unique violation: {}", detail);
            AppError::conflict(message, cause)
        }
        _ => AppError::Database(err),
    }
}
