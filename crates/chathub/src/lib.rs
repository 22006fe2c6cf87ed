//! chathub - a terminal chat client for OpenRouter-hosted language models.

pub mod config;
pub mod credential;
pub mod llm;
pub mod session;
pub mod surface;
