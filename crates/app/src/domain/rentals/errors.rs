//! Rentals service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::rentals::pin::PinError;

#[derive(Debug, Error)]
pub enum RentalsServiceError {
    #[error("Box not found.")]
    BoxNotFound,

    #[error("Deposit box already rented.")]
    BoxUnavailable,

    #[error("Rental not found.")]
    RentalNotFound,

    #[error("Please choose what you will store in the box.")]
    MissingItemsType,

    #[error("This rental has already been paid for.")]
    AlreadyPaid,

    #[error("Payment for this rental has not been completed.")]
    PaymentIncomplete,

    #[error("A PIN has already been set for this rental.")]
    PinAlreadySet,

    #[error("This rental is not active and cannot be extended.")]
    RentalInactive,

    #[error("This submission was already used for a different request.")]
    SubmissionKeyReused,

    #[error("This duration cannot be added to a rental.")]
    DurationNotExtendable,

    #[error(transparent)]
    Pin(#[from] PinError),

    /// Message raised by a backend procedure, kept verbatim.
    #[error("{0}")]
    Procedure(String),

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl RentalsServiceError {
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

impl From<Error> for RentalsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::RentalNotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(_) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test::raised;

    use super::*;

    #[test]
    fn procedure_constraint_violations_keep_their_message() {
        let error = RentalsServiceError::from_procedure(raised(
            || ErrorKind::UniqueViolation,
            "Payment already recorded for this rental",
        ));

        assert!(
            matches!(&error, RentalsServiceError::Procedure(message) if message == "Payment already recorded for this rental"),
            "expected Procedure, got {error:?}"
        );
    }

    #[test]
    fn procedure_raised_exceptions_keep_their_message() {
        let error =
            RentalsServiceError::from_procedure(raised(|| ErrorKind::Other, "Box not available"));

        assert_eq!(error.to_string(), "Box not available");
    }

    #[test]
    fn procedure_missing_row_is_rental_not_found() {
        let error = RentalsServiceError::from_procedure(Error::RowNotFound);

        assert!(matches!(error, RentalsServiceError::RentalNotFound));
    }

    #[test]
    fn plain_queries_still_classify_by_kind() {
        let error = RentalsServiceError::from(raised(
            || ErrorKind::ForeignKeyViolation,
            "insert or update violates foreign key constraint",
        ));

        assert!(matches!(error, RentalsServiceError::InvalidReference));
    }
}
