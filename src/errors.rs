//! Unified error type for the data layer and the admin presentation layer.
//!
//! Database failures are classified on the way in: uniqueness and foreign key
//! violations get their own variants so callers can tell a duplicate
//! profile apart from a broken connection.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Everything that can go wrong in the data layer or a list view.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad seed file or unknown admin model
    #[error("Configuration error: {message}")]
    Config {
        /// What could not be loaded
        message: String,
    },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A unique column or column pair already holds this value
    #[error("Unique constraint violated: {message}")]
    UniqueViolation {
        /// Database driver message
        message: String,
    },

    /// A referenced row does not exist
    #[error("Foreign key constraint violated: {message}")]
    ForeignKeyViolation {
        /// Database driver message
        message: String,
    },

    /// A field value was rejected before reaching the database
    #[error("Invalid value for {field}: {message}")]
    Validation {
        /// The offending field
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },

    /// A value outside a field's fixed set of choices
    #[error("'{value}' is not a valid choice for {field}")]
    InvalidChoice {
        /// The offending field
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// No row with this id
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Table or entity name
        entity: String,
        /// The missing id
        id: i64,
    },

    /// A filter or search named a column the model does not have
    #[error("Unknown field '{field}' on {model}")]
    UnknownField {
        /// Model the field was looked up on
        model: String,
        /// The unknown column name
        field: String,
    },

    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A count did not fit the target integer type
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),
}

impl Error {
    /// Shorthand for a missing row
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// Shorthand for a rejected field value
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::UniqueViolation { message },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                Self::ForeignKeyViolation { message }
            }
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
