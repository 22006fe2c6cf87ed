//! The turn state machine.
//!
//! A turn moves Idle → Sending → Idle:
//! 1. Validate the credential, then the input (nothing changes on failure)
//! 2. Append the user message and build the request from the full history
//! 3. Call the gateway
//! 4. Append the reply on success; on failure leave the user message unanswered

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::store::ConversationStore;
use crate::credential::Credential;
use crate::llm::{
    ChatRequest, GatewayClient, GatewayError, GatewayResult, Message, ModelSelection,
    SYSTEM_PROMPT, build_request,
};
use crate::surface::PresentationSurface;

/// Shown when a message is submitted before an API key was entered.
pub const ENTER_KEY_PROMPT: &str = "Please enter your OpenRouter API key to start.";

/// Shown when an empty message is submitted.
pub const TYPE_MESSAGE_PROMPT: &str = "Type a message to start chatting.";

/// Why a turn produced no assistant reply.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("no api key entered")]
    MissingCredential,

    #[error("empty message")]
    EmptyInput,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl TurnError {
    /// Text shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            TurnError::MissingCredential => ENTER_KEY_PROMPT.to_string(),
            TurnError::EmptyInput => TYPE_MESSAGE_PROMPT.to_string(),
            TurnError::Gateway(e) => e.report(),
        }
    }
}

/// Result of handling one surface interaction.
#[derive(Debug)]
pub enum StepOutcome {
    /// The history was cleared on request.
    Cleared,
    /// The gateway replied and the reply was appended.
    Replied(String),
    /// No reply; the surface was told why.
    Rejected(TurnError),
}

/// Session context: everything one interactive chat owns.
///
/// Created empty, cleared on request, dropped when the session ends. Turns take
/// `&mut self`, so at most one gateway call is in flight per session.
pub struct ChatSession {
    gateway: Arc<dyn GatewayClient>,
    store: ConversationStore,
    credential: Credential,
    model: ModelSelection,
    timeout: Duration,
}

impl ChatSession {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(gateway: Arc<dyn GatewayClient>, model: ModelSelection) -> Self {
        Self {
            gateway,
            store: ConversationStore::new(),
            credential: Credential::default(),
            model,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn history(&self) -> &[Message] {
        self.store.snapshot()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Replace the API key; empty values keep the current one.
    pub fn set_credential(&mut self, key: &str) -> bool {
        let changed = self.credential.update(key);
        if changed {
            debug!("Session credential updated");
        }
        changed
    }

    pub fn model(&self) -> ModelSelection {
        self.model
    }

    pub fn select_model(&mut self, model: ModelSelection) {
        if model != self.model {
            debug!(model = %model.provider_id, "Model selected");
            self.model = model;
        }
    }

    pub fn clear(&mut self) {
        debug!(messages = self.store.len(), "Clearing conversation");
        self.store.clear();
    }

    /// Run one full turn for `input`, returning the assistant reply.
    pub async fn submit(&mut self, input: &str) -> Result<String, TurnError> {
        let request = self.begin_turn(input)?;
        let result = self
            .gateway
            .send(&request, &self.credential, self.timeout)
            .await;
        self.finish_turn(result)
    }

    /// Handle one interaction from `surface`: a clear request or a submission.
    pub async fn step<S: PresentationSurface + ?Sized>(&mut self, surface: &mut S) -> StepOutcome {
        if surface.clear_requested() {
            self.clear();
            surface.render(self.history());
            return StepOutcome::Cleared;
        }

        self.set_credential(&surface.credential());
        self.select_model(surface.selected_model());
        let input = surface.user_input().unwrap_or_default();

        let request = match self.begin_turn(&input) {
            Ok(request) => request,
            Err(e) => {
                surface.show_info(&e.user_message());
                return StepOutcome::Rejected(e);
            }
        };
        surface.render(self.history());

        surface.set_busy(true);
        let result = self
            .gateway
            .send(&request, &self.credential, self.timeout)
            .await;
        surface.set_busy(false);

        let outcome = match self.finish_turn(result) {
            Ok(reply) => StepOutcome::Replied(reply),
            Err(e) => {
                surface.show_error(&e.user_message());
                StepOutcome::Rejected(e)
            }
        };
        surface.render(self.history());
        outcome
    }

    /// Idle → Sending: validate, record the user message, build the request.
    fn begin_turn(&mut self, input: &str) -> Result<ChatRequest, TurnError> {
        if !self.credential.is_present() {
            return Err(TurnError::MissingCredential);
        }
        if input.trim().is_empty() {
            return Err(TurnError::EmptyInput);
        }

        self.store.append(Message::user(input));
        Ok(build_request(
            SYSTEM_PROMPT,
            self.store.snapshot(),
            self.model.provider_id,
        ))
    }

    /// Sending → Idle: record the reply, or leave the user message unanswered.
    fn finish_turn(&mut self, result: GatewayResult) -> Result<String, TurnError> {
        match result {
            Ok(reply) => {
                debug!(chars = reply.len(), "Reply received");
                self.store.append(Message::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, model = %self.model.provider_id, "Turn failed");
                Err(TurnError::Gateway(e))
            }
        }
    }
}
