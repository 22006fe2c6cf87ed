//! Presentation surfaces: where input comes from and replies are shown.
//!
//! The session core only talks to the [`PresentationSurface`] trait. A surface
//! is polled once per user interaction, mirroring a page that reruns on every
//! action:
//!
//! ```text
//!  next_interaction()         wait for the user
//!       │
//!       ├─ clear_requested()  → history cleared, render()
//!       │
//!       ├─ credential() / selected_model() / user_input()
//!       │
//!       ├─ missing key or empty text → show_info()
//!       │
//!       └─ user message appended, render()
//!              set_busy(true) ── gateway call ── set_busy(false)
//!              reply appended or show_error(), render()
//! ```

pub mod command;
mod terminal;

pub use terminal::{TerminalSurface, format_model_list};

use tracing::debug;

use crate::llm::{Message, ModelSelection};
use crate::session::ChatSession;

/// The user-facing side of a chat session.
pub trait PresentationSurface {
    /// Block until the user does something. Returns `false` once the surface
    /// is closed and the session should end.
    fn next_interaction(&mut self) -> bool;

    /// Text submitted in the current interaction, if any.
    fn user_input(&mut self) -> Option<String>;

    /// The API key as currently entered; empty when none.
    fn credential(&self) -> String;

    fn selected_model(&self) -> ModelSelection;

    /// Show the visible history.
    fn render(&mut self, history: &[Message]);

    fn show_error(&mut self, message: &str);

    fn show_info(&mut self, message: &str);

    /// Whether the user asked to clear the conversation. Consumes the request.
    fn clear_requested(&mut self) -> bool;

    /// Called with `true` before a gateway call and `false` after it. No new
    /// submission is accepted in between.
    fn set_busy(&mut self, _busy: bool) {}
}

/// Drive a session until the surface closes. The session is dropped on return.
pub async fn run<S: PresentationSurface + ?Sized>(mut session: ChatSession, surface: &mut S) {
    surface.render(session.history());

    while surface.next_interaction() {
        let outcome = session.step(surface).await;
        debug!(?outcome, history = session.history().len(), "Interaction handled");
    }

    debug!("Surface closed, ending session");
}
