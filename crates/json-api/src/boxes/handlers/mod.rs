//! Deposit Box Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update;
