// src/error/types.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl AppError {
    /// True when the underlying SQLite error is a constraint violation
    /// (NOT NULL, PRIMARY KEY, FOREIGN KEY, ...).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            AppError::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_source_message() {
        let err = AppError::Other("schema too new".to_string());
        assert_eq!(err.to_string(), "Other error: schema too new");
    }

    #[test]
    fn test_non_sqlite_errors_are_not_constraint_violations() {
        let err = AppError::Pool("timed out".to_string());
        assert!(!err.is_constraint_violation());

        let err = AppError::Database(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_constraint_violation());
    }
}
