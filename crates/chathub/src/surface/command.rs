//! Slash commands understood by the terminal surface.

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  /clear                      clear the conversation
  /models                     list available models
  /model <number|name|id>     switch model
  /key <api-key>              set the OpenRouter API key
  /help                       show this help
  /quit                       exit (Ctrl-D also works)
Anything else is sent to the model.";

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clear,
    Models,
    Model(String),
    Key(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a line of input. Returns `None` for plain chat text.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "clear" => Command::Clear,
            "models" => Command::Models,
            "model" => Command::Model(arg.to_string()),
            "key" => Command::Key(arg.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(name.to_string()),
        };
        Some(command)
    }
}
