//! Chat session state and turn orchestration.

mod store;
mod turn;

pub use store::ConversationStore;
pub use turn::{ChatSession, ENTER_KEY_PROMPT, StepOutcome, TYPE_MESSAGE_PROMPT, TurnError};
