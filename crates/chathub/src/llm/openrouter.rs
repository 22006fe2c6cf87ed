//! OpenRouter gateway client.
//!
//! Speaks the OpenAI-compatible chat completions format, so any compatible
//! endpoint works when `base_url` points at it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::{ErrorDetail, GatewayError, GatewayResult};
use super::provider::GatewayClient;
use super::types::{ChatRequest, ChatResponse};
use crate::credential::Credential;

/// Client for the OpenRouter chat completions endpoint.
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    referer: String,
}

impl OpenRouterClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://openrouter.ai/api/v1";
    pub const DEFAULT_REFERER: &'static str = "https://openrouter-chatbot.streamlit.app/";

    #[must_use]
    pub fn new(client: Client, base_url: String, referer: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            referer,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl GatewayClient for OpenRouterClient {
    async fn send(
        &self,
        request: &ChatRequest,
        credential: &Credential,
        timeout: Duration,
    ) -> GatewayResult {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", credential.expose()))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::transport(&e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(&e, timeout))?;

        if !status.is_success() {
            let status = status.as_u16();
            debug!(status, "Gateway returned an error status");
            return Err(GatewayError::Http {
                status,
                detail: ErrorDetail::from_body(status, &body),
            });
        }

        parse_reply(&body)
    }
}

/// Extract `choices[0].message.content` from a 2xx body.
fn parse_reply(body: &str) -> GatewayResult {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON body: {e}")))?;
    let response: ChatResponse = serde_json::from_value(value)
        .map_err(|e| GatewayError::MalformedResponse(format!("unexpected response shape: {e}")))?;

    if let Some(usage) = response.usage {
        debug!(
            prompt_tokens = ?usage.prompt_tokens,
            completion_tokens = ?usage.completion_tokens,
            total_tokens = ?usage.total_tokens,
            "Completion usage"
        );
    }

    if let Some(content) = response.first_content() {
        return Ok(content.to_string());
    }

    let reason = if let Some(error) = &response.error {
        let detail = ErrorDetail::Structured(error.clone());
        format!("gateway reported an error: {}", detail.summary())
    } else if response.choices.is_empty() {
        "response contained no choices".to_string()
    } else {
        "first choice has no message content".to_string()
    };
    Err(GatewayError::MalformedResponse(reason))
}
