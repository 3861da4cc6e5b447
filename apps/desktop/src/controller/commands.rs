//! Line commands typed by the user.

use shared::domain::SubjectId;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  next | n            save the caption and show the next subject
  prev | p            save the caption and show the previous subject
  go <id>             save the caption and jump to the subject with <id>
  index <n>           save the caption and jump to the n-th subject (1-based)
  caption <text>      replace the caption of the displayed subject
  save                save the caption without moving
  finish              save the caption and end the session
  list                list all subjects
  status              show the current position
  help                show this help
  quit | q            save the caption and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Go(SubjectId),
    /// Zero-based list index.
    Index(usize),
    Caption(String),
    Save,
    Finish,
    List,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a subject number")]
    InvalidIndex(String),
}

impl Command {
    /// Parses one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "next" | "n" => Command::Next,
            "prev" | "p" | "previous" => Command::Previous,
            "go" => {
                let id = rest
                    .parse::<SubjectId>()
                    .map_err(|_| CommandError::MissingArgument("go"))?;
                Command::Go(id)
            }
            "index" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("index"));
                }
                let number = rest
                    .parse::<usize>()
                    .ok()
                    .filter(|number| *number > 0)
                    .ok_or_else(|| CommandError::InvalidIndex(rest.to_string()))?;
                Command::Index(number - 1)
            }
            "caption" | "c" => Command::Caption(rest.to_string()),
            "save" | "s" => Command::Save,
            "finish" => Command::Finish,
            "list" | "ls" => Command::List,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
