//! Line editing support: slash-command completion, argument completion for
//! `/open` and `/select`, inline hints, and command highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMANDS;

const OPEN_PREFIX: &str = "/open ";
const SELECT_PREFIX: &str = "/select ";
const SELECT_CLEAR: &str = "clear";

/// rustyline helper for the codechat prompt.
pub struct CliHelper {
    commands: Vec<String>,
    files: FilenameCompleter,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
            files: FilenameCompleter::new(),
        }
    }

    /// Completion candidates for `line[..pos]`, with the offset they replace from.
    fn candidates(&self, line: &str, pos: usize) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];

        if head.starts_with('/') && !head.contains(' ') {
            let candidates = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(head))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            return Ok((0, candidates));
        }

        if head.starts_with(OPEN_PREFIX) {
            return self.files.complete_path(line, pos);
        }

        if let Some(arg) = head.strip_prefix(SELECT_PREFIX) {
            if SELECT_CLEAR.starts_with(arg) {
                let pair = Pair {
                    display: SELECT_CLEAR.to_string(),
                    replacement: SELECT_CLEAR.to_string(),
                };
                return Ok((SELECT_PREFIX.len(), vec![pair]));
            }
        }

        Ok((0, vec![]))
    }

    /// Greyed-out remainder shown after the cursor.
    fn hint_for(&self, head: &str) -> Option<String> {
        if head.starts_with('/') && !head.contains(' ') {
            return self
                .commands
                .iter()
                .find(|cmd| cmd.starts_with(head) && cmd.len() > head.len())
                .map(|cmd| cmd[head.len()..].to_string());
        }

        head.strip_prefix(SELECT_PREFIX)
            .filter(|arg| {
                !arg.is_empty() && arg.len() < SELECT_CLEAR.len() && SELECT_CLEAR.starts_with(arg)
            })
            .map(|arg| SELECT_CLEAR[arg.len()..].to_string())
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        self.candidates(line, pos)
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        self.hint_for(&line[..pos])
    }
}

impl Validator for CliHelper {}
