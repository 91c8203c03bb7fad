//! REPL command parsing.

use std::path::PathBuf;

use codechat_interaction::LineRange;

/// Slash commands offered for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/refresh", "/context", "/open", "/select", "/history", "/help",
];

pub const HELP_TEXT: &str = "\
Type a question and press Enter to send it along with your code.
  /refresh              re-read the code context (drops a sticky selection)
  /context              show where the current context came from
  /open <path>          use another file as the active document
  /select <from>-<to>   select a line range (e.g. /select 3-12)
  /select clear         clear the selection
  /history              list the conversation
  /help                 show this help
  quit | exit           leave";

/// One line of REPL input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Ordinary text to send to the model.
    Send(String),
    Refresh,
    Context,
    Open(PathBuf),
    Select(LineRange),
    ClearSelection,
    History,
    Help,
    Quit,
    /// A slash command that was recognized but malformed.
    Invalid(String),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return ReplCommand::Quit;
        }
        if !trimmed.starts_with('/') {
            return ReplCommand::Send(trimmed.to_string());
        }

        let (command, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (trimmed, ""),
        };

        match command {
            "/refresh" => ReplCommand::Refresh,
            "/context" => ReplCommand::Context,
            "/history" => ReplCommand::History,
            "/help" => ReplCommand::Help,
            "/open" if arg.is_empty() => ReplCommand::Invalid("usage: /open <path>".to_string()),
            "/open" => ReplCommand::Open(PathBuf::from(arg)),
            "/select" if arg == "clear" => ReplCommand::ClearSelection,
            "/select" => match arg.parse::<LineRange>() {
                Ok(range) => ReplCommand::Select(range),
                Err(err) => ReplCommand::Invalid(format!("usage: /select <from>-<to> ({err})")),
            },
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}
