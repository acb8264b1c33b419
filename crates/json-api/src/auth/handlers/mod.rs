//! Auth Handlers

pub(crate) mod admin_login;
pub(crate) mod callback;
pub(crate) mod forgot_password;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
pub(crate) mod update_password;
