//! Rental Errors

use salvo::http::StatusError;
use tracing::{error, info};

use brankas_app::domain::rentals::{RentalsServiceError, pin::PinError};

pub(crate) fn into_status_error(error: RentalsServiceError) -> StatusError {
    let brief = error.to_string();

    match error {
        RentalsServiceError::BoxNotFound | RentalsServiceError::RentalNotFound => {
            StatusError::not_found().brief(brief)
        }
        RentalsServiceError::BoxUnavailable
        | RentalsServiceError::AlreadyPaid
        | RentalsServiceError::PaymentIncomplete
        | RentalsServiceError::PinAlreadySet
        | RentalsServiceError::RentalInactive
        | RentalsServiceError::SubmissionKeyReused => StatusError::conflict().brief(brief),
        RentalsServiceError::MissingItemsType
        | RentalsServiceError::DurationNotExtendable
        | RentalsServiceError::Pin(PinError::InvalidFormat) => {
            StatusError::bad_request().brief(brief)
        }
        RentalsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid rental reference")
        }
        RentalsServiceError::Procedure(message) => {
            info!("rental procedure failed: {message}");

            StatusError::internal_server_error().brief(message)
        }
        RentalsServiceError::Pin(PinError::Hashing(source)) => {
            error!("failed to hash PIN: {source}");

            StatusError::internal_server_error()
        }
        RentalsServiceError::Sql(source) => {
            error!("rental query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Like [`into_status_error`], with procedure messages prefixed by `prefix`.
pub(crate) fn into_submission_error(prefix: &str) -> impl Fn(RentalsServiceError) -> StatusError {
    move |error| match error {
        RentalsServiceError::Procedure(message) => {
            info!("{prefix} {message}");

            StatusError::internal_server_error().brief(format!("{prefix} {message}"))
        }
        other => into_status_error(other),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn conflicts_keep_their_message() {
        let error = into_status_error(RentalsServiceError::AlreadyPaid);

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "This rental has already been paid for.");
    }

    #[test]
    fn reused_submission_key_is_conflict() {
        let error = into_submission_error("Payment processing failed:")(
            RentalsServiceError::SubmissionKeyReused,
        );

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(
            error.brief,
            "This submission was already used for a different request."
        );
    }

    #[test]
    fn invalid_pin_is_bad_request() {
        let error = into_status_error(RentalsServiceError::Pin(PinError::InvalidFormat));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "PIN must be exactly 4 digits.");
    }

    #[test]
    fn procedure_message_is_prefixed() {
        let map = into_submission_error("Payment processing failed:");

        let error = map(RentalsServiceError::Procedure("Box not available".to_string()));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.brief, "Payment processing failed: Box not available");
    }

    #[test]
    fn unknown_rental_is_not_found() {
        let error = into_submission_error("Extension failed:")(RentalsServiceError::RentalNotFound);

        assert_eq!(error.code, StatusCode::NOT_FOUND);
    }
}
