//! Gateway client trait.

use std::time::Duration;

use async_trait::async_trait;

use super::error::GatewayResult;
use super::types::ChatRequest;
use crate::credential::Credential;

/// A completion gateway that turns a chat request into a single reply.
///
/// Implementations never touch conversation state; the caller decides what to
/// do with the returned result.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Perform one completion call, bounded by `timeout`.
    async fn send(
        &self,
        request: &ChatRequest,
        credential: &Credential,
        timeout: Duration,
    ) -> GatewayResult;
}
