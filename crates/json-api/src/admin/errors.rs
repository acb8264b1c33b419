//! Admin Errors

use salvo::http::StatusError;
use tracing::error;

use brankas_app::domain::admin::AdminServiceError;

pub(crate) fn into_status_error(error: AdminServiceError) -> StatusError {
    match error {
        AdminServiceError::NotFound => StatusError::not_found(),
        AdminServiceError::Procedure(message) => {
            error!("admin procedure failed: {message}");

            StatusError::internal_server_error().brief(message)
        }
        AdminServiceError::Sql(source) => {
            error!("admin query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
