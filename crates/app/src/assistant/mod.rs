//! AI Assistant
//!
//! Help-desk chat grounded in a knowledge base, and the admin weekly-report
//! analyst, both backed by the generative-language API.

mod errors;
pub mod gemini;
pub mod knowledge;
pub mod markdown;
mod models;
mod service;

pub use errors::*;
pub use gemini::{GeminiClient, GeminiConfig, GenerativeModel, MockGenerativeModel};
pub use knowledge::KnowledgeBase;
pub use models::*;
pub use service::*;
