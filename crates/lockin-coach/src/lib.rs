//! Client for the local chat-completion service that plays accountability
//! coach.
//!
//! Speaks the Ollama `/api/chat` wire format (non-streaming). Failures never
//! escape [`CoachClient::respond`]; they degrade to static fallback text.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{CoachClient, CoachConfig};
pub use error::{Error, Result};
