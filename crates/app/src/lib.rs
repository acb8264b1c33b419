//! Shared application domain, persistence and backend client modules.

pub mod assistant;
pub mod auth;
pub mod backend;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
