//! Brankas Kita Domain Concerns

pub mod admin;
pub mod boxes;
pub mod notifications;
pub mod rentals;
pub mod users;
