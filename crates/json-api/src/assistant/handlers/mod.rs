//! Assistant Handlers

pub(crate) mod help_chat;
pub(crate) mod report_chat;
