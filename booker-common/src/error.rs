//! Common error types for Booker

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Common result type for Booker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Booker crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (connection, transaction, decoding)
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Integrity constraint rejected the write (foreign key, unique, not-null, check)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when the store refused the write because of an integrity constraint
    pub fn is_constraint(&self) -> bool {
        matches!(self, Error::Constraint(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return Error::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Error::Database(err)
    }
}
