//! Builds the outbound completion request from conversation history.

use super::types::{ChatRequest, Message};

/// Reply length cap applied to every request.
pub const MAX_TOKENS: u32 = 500;

/// System prompt prepended to every request. Never stored in the history.
pub const SYSTEM_PROMPT: &str = "You are an autonomous, helpful AI agent that provides concise, \
accurate, and natural responses to user queries about Agentic AI and related technologies.";

/// Compose a request: the system prompt followed by the full history.
///
/// Pure: the same inputs always serialize to the same bytes. History is not
/// truncated; oversize conversations are rejected by the provider.
pub fn build_request(system_prompt: &str, history: &[Message], provider_id: &str) -> ChatRequest {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(system_prompt));
    messages.extend(history.iter().cloned());

    ChatRequest {
        model: provider_id.to_string(),
        messages,
        max_tokens: MAX_TOKENS,
    }
}
