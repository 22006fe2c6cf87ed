//! LLM gateway client for chat completions.

mod error;
mod openrouter;
mod provider;
mod registry;
mod request;
mod types;

pub use error::{ErrorDetail, GatewayError, GatewayResult};
pub use openrouter::OpenRouterClient;
pub use provider::GatewayClient;
pub use registry::{ModelRegistry, ModelSelection};
pub use request::{MAX_TOKENS, SYSTEM_PROMPT, build_request};
pub use types::{ChatRequest, ChatResponse, Choice, ChoiceMessage, Message, Role, Usage};
