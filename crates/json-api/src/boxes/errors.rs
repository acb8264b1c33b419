//! Deposit Box Errors

use salvo::http::StatusError;
use tracing::error;

use brankas_app::domain::boxes::BoxesServiceError;

pub(crate) fn into_status_error(error: BoxesServiceError) -> StatusError {
    match error {
        BoxesServiceError::NotFound => StatusError::not_found().brief("Box not found."),
        BoxesServiceError::AlreadyExists => {
            StatusError::conflict().brief("A box with this code already exists.")
        }
        BoxesServiceError::EmptyBoxCode => {
            StatusError::bad_request().brief("Box code cannot be empty.")
        }
        BoxesServiceError::InvalidData => StatusError::bad_request().brief("Invalid box payload"),
        BoxesServiceError::Sql(source) => {
            error!("deposit box query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
