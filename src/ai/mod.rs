//! Thin adapter over an OpenAI-compatible chat-completions API used for
//! course and module drafting. Generated drafts are returned to the client
//! and never persisted here.

pub mod client;
pub mod parser;
pub mod prompts;
