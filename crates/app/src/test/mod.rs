//! Service-level test support.

mod db;

pub(crate) use context::TestContext;
pub(crate) use database_error::raised;
