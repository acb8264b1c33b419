//! Query string helpers.

use salvo::prelude::{Request, StatusError};
use uuid::Uuid;

use brankas_app::uuids::TypedUuid;

use crate::extensions::*;

pub(crate) trait RequestExt {
    /// Parse a required id from the query string, e.g. `?rentalId=`.
    ///
    /// A missing value is a bad request with `missing`; a malformed one is a
    /// bad request naming the parameter.
    fn query_id_or_400<T>(&self, name: &str, missing: &str) -> Result<TypedUuid<T>, StatusError>;

    /// An optional query value, blank counting as absent.
    fn query_text(&self, name: &str) -> Option<String>;
}

impl RequestExt for Request {
    fn query_id_or_400<T>(&self, name: &str, missing: &str) -> Result<TypedUuid<T>, StatusError> {
        let value = self
            .query_text(name)
            .ok_or_else(|| StatusError::bad_request().brief(missing))?;

        Uuid::parse_str(&value)
            .map(TypedUuid::from_uuid)
            .or_400(&format!("\"{name}\" is not a valid id"))
    }

    fn query_text(&self, name: &str) -> Option<String> {
        self.query::<String>(name)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }
}
