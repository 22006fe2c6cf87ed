//! Line-editor presentation surface.

use std::io::{self, Write};

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::warn;

use super::PresentationSurface;
use super::command::{Command, HELP};
use crate::llm::{Message, ModelRegistry, ModelSelection, Role};

/// Interactive terminal chat.
///
/// Plain lines are submitted to the model; lines starting with `/` are
/// commands handled here (see [`HELP`]). Only `/clear` reaches the session;
/// the rest adjust the surface's own state.
pub struct TerminalSurface {
    editor: Reedline,
    prompt: DefaultPrompt,
    registry: ModelRegistry,
    model: ModelSelection,
    credential: String,
    pending_input: Option<String>,
    clear_pending: bool,
    rendered: usize,
}

impl TerminalSurface {
    pub fn new(registry: ModelRegistry, model: ModelSelection, credential: String) -> Self {
        Self {
            editor: Reedline::create(),
            prompt: DefaultPrompt::new(
                DefaultPromptSegment::Basic("you".to_string()),
                DefaultPromptSegment::Empty,
            ),
            registry,
            model,
            credential,
            pending_input: None,
            clear_pending: false,
            rendered: 0,
        }
    }

    pub fn print_banner(&self) {
        println!("AI Chat Hub");
        println!("Powered by OpenRouter");
        println!("Model: {}", self.model);
        if self.credential.trim().is_empty() {
            println!("No API key set. Use /key <api-key> or set OPENROUTER_API_KEY.");
        }
        println!("Type /help for commands, Ctrl-D to exit.");
        println!();
    }

    /// Apply a command that stays within the surface.
    fn apply(&mut self, command: Command) {
        match command {
            Command::Models => print!("{}", format_model_list(&self.registry, self.model)),
            Command::Model(query) if query.is_empty() => println!("Model: {}", self.model),
            Command::Model(query) => match self.registry.find(&query) {
                Some(model) => {
                    self.model = model;
                    println!("Model: {model}");
                }
                None => println!("Unknown model '{query}'. Use /models to list choices."),
            },
            Command::Key(key) if key.is_empty() => println!("Usage: /key <api-key>"),
            Command::Key(key) => {
                self.credential = key;
                println!("API key set.");
            }
            Command::Help => println!("{HELP}"),
            Command::Unknown(name) => {
                println!("Unknown command '/{name}'. Type /help for commands.")
            }
            Command::Clear | Command::Quit => {}
        }
    }
}

impl PresentationSurface for TerminalSurface {
    fn next_interaction(&mut self) -> bool {
        loop {
            match self.editor.read_line(&self.prompt) {
                Ok(Signal::Success(line)) => match Command::parse(&line) {
                    Some(Command::Clear) => {
                        self.clear_pending = true;
                        return true;
                    }
                    Some(Command::Quit) => return false,
                    Some(command) => self.apply(command),
                    None => {
                        self.pending_input = Some(line);
                        return true;
                    }
                },
                Ok(Signal::CtrlD) => return false,
                Ok(Signal::CtrlC) => continue,
                #[allow(unreachable_patterns)]
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "Failed to read from terminal");
                    return false;
                }
            }
        }
    }

    fn user_input(&mut self) -> Option<String> {
        self.pending_input.take()
    }

    fn credential(&self) -> String {
        self.credential.clone()
    }

    fn selected_model(&self) -> ModelSelection {
        self.model
    }

    fn render(&mut self, history: &[Message]) {
        if history.len() < self.rendered {
            println!("Conversation cleared.");
            self.rendered = 0;
        }

        // User lines are already on screen from the editor.
        for message in &history[self.rendered..] {
            if message.role == Role::Assistant {
                println!("\n{}\n", message.content);
            }
        }
        self.rendered = history.len();
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("\n{message}\n");
    }

    fn show_info(&mut self, message: &str) {
        println!("{message}");
    }

    fn clear_requested(&mut self) -> bool {
        std::mem::take(&mut self.clear_pending)
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            print!("Thinking...");
        } else {
            // Erase the indicator line.
            print!("\r\x1b[2K");
        }
        let _ = io::stdout().flush();
    }
}

/// Numbered model list with the current selection marked.
pub fn format_model_list(registry: &ModelRegistry, selected: ModelSelection) -> String {
    let mut out = String::new();
    for (i, model) in registry.all().iter().enumerate() {
        let marker = if *model == selected { '*' } else { ' ' };
        out.push_str(&format!(
            "{marker} {}. {model}  [{}]\n",
            i + 1,
            model.provider_id
        ));
    }
    out
}
