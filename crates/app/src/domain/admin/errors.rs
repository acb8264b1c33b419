//! Admin service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminServiceError {
    #[error("not found")]
    NotFound,

    /// Message raised by a backend procedure, kept verbatim.
    #[error("{0}")]
    Procedure(String),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl AdminServiceError {
    /// Classify an error returned by a backend procedure call.
    ///
    /// Anything the database raised keeps its message, whatever its kind.
    pub(crate) fn from_procedure(error: Error) -> Self {
        match error.as_database_error() {
            Some(db_error) => Self::Procedure(db_error.message().to_string()),
            None => Self::from(error),
        }
    }
}

impl From<Error> for AdminServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error() {
            Some(db_error) if matches!(db_error.kind(), ErrorKind::Other) => {
                Self::Procedure(DatabaseError::message(db_error).to_string())
            }
            Some(_) | None => Self::Sql(error),
        }
    }
}
