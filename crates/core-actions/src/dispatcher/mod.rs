//! Dispatcher applying a `ParsedCommand` to a `Session`.
//!
//! Sub-modules group handlers by concern:
//! * `edit`  - buffer mutations routed through the history engine
//! * `undo`  - undo / redo
//! * `file`  - load, save and file encryption
//!
//! Every handler reports through `DispatchResult`; errors become messages and
//! never end the session.

use core_terminal::ConsoleBackend;

use crate::{Session, SessionError};

mod command_parser;
mod edit;
mod file;
mod undo;

pub use command_parser::{CommandParser, MENU, ParsedCommand};

/// Result of dispatching a single command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Buffer content changed.
    pub dirty: bool,
    pub quit: bool,
    /// Lines to show the user, in order.
    pub messages: Vec<String>,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::clean().with_message(format!("error: {err}"))
    }
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.messages.push(msg.into());
        self
    }

    pub(crate) fn from_edit(result: Result<(), SessionError>) -> Self {
        match result {
            Ok(()) => Self::dirty(),
            Err(e) => Self::error(e),
        }
    }
}

/// Apply one command to the session.
pub fn dispatch(
    command: ParsedCommand,
    session: &mut Session,
    console: &mut dyn ConsoleBackend,
) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", ?command, "dispatch");
    match command {
        ParsedCommand::Append(_)
        | ParsedCommand::NewLine
        | ParsedCommand::Insert { .. }
        | ParsedCommand::Delete { .. }
        | ParsedCommand::Cut { .. }
        | ParsedCommand::Copy { .. }
        | ParsedCommand::Paste { .. }
        | ParsedCommand::Replace { .. } => edit::handle_edit(command, session),
        ParsedCommand::Undo => undo::handle_undo(session),
        ParsedCommand::Redo => undo::handle_redo(session),
        ParsedCommand::Save(_)
        | ParsedCommand::Load(_)
        | ParsedCommand::Encrypt { .. }
        | ParsedCommand::Decrypt { .. } => file::handle_file(command, session),
        ParsedCommand::Search(needle) => {
            let hits = session.search_text(&needle);
            if hits.is_empty() {
                return DispatchResult::clean().with_message(format!("No matches for `{needle}`"));
            }
            hits.into_iter().fold(DispatchResult::clean(), |r, hit| {
                r.with_message(format!("Found on line {}, index {}", hit.line, hit.byte))
            })
        }
        ParsedCommand::Print => session
            .state()
            .buffer()
            .lines()
            .fold(DispatchResult::clean(), |r, line| r.with_message(line)),
        ParsedCommand::Clear => match console.clear() {
            Ok(()) => DispatchResult::clean(),
            Err(e) => DispatchResult::error(e),
        },
        ParsedCommand::Help => help(),
        ParsedCommand::Quit => DispatchResult::quit(),
        ParsedCommand::Empty => DispatchResult::clean(),
        ParsedCommand::Invalid(reason) => DispatchResult::error(reason),
    }
}

fn help() -> DispatchResult {
    MENU.iter()
        .fold(DispatchResult::clean(), |r, (number, usage)| {
            r.with_message(format!("{number:>3}. {usage}"))
        })
}
