//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use brankas_app::auth::AuthError;

pub(crate) fn into_status_error(error: AuthError) -> StatusError {
    match error {
        AuthError::Rejected {
            status: 401 | 403,
            message,
        } => StatusError::unauthorized().brief(message),
        AuthError::Rejected {
            status: 429,
            message,
        } => StatusError::too_many_requests().brief(message),
        AuthError::Rejected { message, .. } => StatusError::bad_request().brief(message),
        AuthError::Http(source) => {
            error!("auth service unreachable: {source}");

            StatusError::internal_server_error()
        }
        AuthError::UnexpectedResponse(detail) => {
            error!("unexpected auth service response: {detail}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    fn rejected(status: u16) -> AuthError {
        AuthError::Rejected {
            status,
            message: "Invalid login credentials".to_string(),
        }
    }

    #[test]
    fn rejections_keep_the_auth_service_message() {
        let error = into_status_error(rejected(400));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Invalid login credentials");
    }

    #[test]
    fn unauthorised_and_rate_limited_rejections_keep_their_status() {
        assert_eq!(into_status_error(rejected(401)).code, StatusCode::UNAUTHORIZED);
        assert_eq!(
            into_status_error(rejected(429)).code,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn unexpected_responses_are_internal_errors() {
        let error = into_status_error(AuthError::UnexpectedResponse("boom".to_string()));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
