//! Notifications

pub mod errors;
pub mod mailer;
pub mod records;
mod repository;
pub mod service;

pub use errors::NotificationsServiceError;
pub use mailer::{EdgeFunctionMailer, Mailer, MailerError, MockMailer, PinSetEmail};
pub use service::*;
