//! Response helpers.

use salvo::{
    http::{StatusCode, header::LOCATION},
    prelude::{Response, StatusError},
};

use crate::extensions::*;

pub(crate) trait ResponseExt {
    /// `302 Found` to a relative `target`.
    fn redirect_found(&mut self, target: &str) -> Result<(), StatusError>;
}

impl ResponseExt for Response {
    fn redirect_found(&mut self, target: &str) -> Result<(), StatusError> {
        self.add_header(LOCATION, target, true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::FOUND);

        Ok(())
    }
}
