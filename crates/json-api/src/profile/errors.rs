//! Profile Errors

use salvo::http::StatusError;
use tracing::error;

use brankas_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::EmptyFullName => {
            StatusError::bad_request().brief("Full name cannot be empty.")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found."),
        UsersServiceError::AlreadyExists | UsersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Invalid profile payload")
        }
        UsersServiceError::Sql(source) => {
            error!("user query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
