//! Console command parsing.

use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{ReactionId, ReactionPayload};

/// One console line, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current page.
    Show,
    /// Select a user by name.
    Select(String),
    /// Navigate to a location.
    Open(String),
    /// Add a like to the selected user.
    Like(ReactionPayload),
    /// Add a dislike to the selected user.
    Dislike(ReactionPayload),
    /// Delete a like of the selected user.
    Unlike(ReactionId),
    /// Delete a dislike of the selected user.
    Undislike(ReactionId),
    /// Fetch the list again.
    Reload,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  show                 print the current page
  select <user>        select a user
  open <path>          navigate to a location, e.g. /alice
  like <json>          add a like to the selected user, e.g. like {\"topic\": \"jazz\"}
  dislike <json>       add a dislike to the selected user
  unlike <id>          delete a like of the selected user
  undislike <id>       delete a dislike of the selected user
  reload               fetch the user list again
  help                 show this help
  quit                 leave";

/// Errors raised while parsing a console line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    /// The line is blank.
    #[error("empty command")]
    Empty,
    /// The first word is not a command.
    #[error("unknown command '{name}'; try 'help'")]
    UnknownCommand {
        /// The unrecognised word.
        name: String,
    },
    /// A required argument is missing.
    #[error("'{command}' needs an argument")]
    MissingArgument {
        /// Command that was given no argument.
        command: &'static str,
    },
    /// An argument was given to a command that takes none.
    #[error("'{command}' takes no argument")]
    UnexpectedArgument {
        /// Command that takes no argument.
        command: &'static str,
    },
    /// The payload is not a JSON object.
    #[error("payload must be a JSON object: {message}")]
    InvalidPayload {
        /// Parser or shape error.
        message: String,
    },
    /// The record id is not an unsigned integer.
    #[error("'{value}' is not a record id")]
    InvalidId {
        /// The rejected text.
        value: String,
    },
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(CommandParseError::Empty);
        }
        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "show" => no_argument("show", rest, Self::Show),
            "reload" => no_argument("reload", rest, Self::Reload),
            "help" => no_argument("help", rest, Self::Help),
            "quit" | "exit" => no_argument("quit", rest, Self::Quit),
            "select" => argument("select", rest).map(|user| Self::Select(user.to_owned())),
            "open" => argument("open", rest).map(|path| Self::Open(path.to_owned())),
            "like" => argument("like", rest).and_then(parse_payload).map(Self::Like),
            "dislike" => argument("dislike", rest)
                .and_then(parse_payload)
                .map(Self::Dislike),
            "unlike" => argument("unlike", rest).and_then(parse_id).map(Self::Unlike),
            "undislike" => argument("undislike", rest)
                .and_then(parse_id)
                .map(Self::Undislike),
            other => Err(CommandParseError::UnknownCommand {
                name: other.to_owned(),
            }),
        }
    }
}

fn no_argument(
    command: &'static str,
    rest: &str,
    parsed: Command,
) -> Result<Command, CommandParseError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandParseError::UnexpectedArgument { command })
    }
}

fn argument<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, CommandParseError> {
    if rest.is_empty() {
        Err(CommandParseError::MissingArgument { command })
    } else {
        Ok(rest)
    }
}

fn parse_payload(raw: &str) -> Result<ReactionPayload, CommandParseError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CommandParseError::InvalidPayload {
            message: format!("got {other}"),
        }),
        Err(err) => Err(CommandParseError::InvalidPayload {
            message: err.to_string(),
        }),
    }
}

fn parse_id(raw: &str) -> Result<ReactionId, CommandParseError> {
    raw.trim_start_matches('#')
        .parse::<u64>()
        .map(ReactionId::new)
        .map_err(|_| CommandParseError::InvalidId {
            value: raw.to_owned(),
        })
}
