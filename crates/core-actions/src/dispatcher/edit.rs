//! Buffer edit handling.
//!
//! Every command here except `append`/`newline` goes through the history
//! engine inside `EditorState`, so it is undoable; copy runs but is not
//! recorded. A rejected edit reports the error and leaves the session as it was.

use super::{DispatchResult, ParsedCommand};
use crate::Session;

pub(crate) fn handle_edit(command: ParsedCommand, session: &mut Session) -> DispatchResult {
    let result = match &command {
        ParsedCommand::Append(text) => session.append(text),
        ParsedCommand::NewLine => session.new_line(),
        ParsedCommand::Insert { line, index, text } => session.insert_text(*line, *index, text),
        ParsedCommand::Delete {
            line,
            index,
            length,
        } => session.delete_text(*line, *index, *length),
        ParsedCommand::Cut {
            line,
            index,
            length,
        } => session.cut_text(*line, *index, *length),
        ParsedCommand::Copy {
            line,
            index,
            length,
        } => {
            return match session.copy_text(*line, *index, *length) {
                Ok(()) => DispatchResult::clean().with_message(format!(
                    "Copied {} bytes",
                    session.state().clipboard().contents().len()
                )),
                Err(e) => DispatchResult::error(e),
            };
        }
        ParsedCommand::Paste { line, index } => session.paste_text(*line, *index),
        ParsedCommand::Replace { line, index, text } => {
            session.insert_replace_text(*line, *index, text)
        }
        other => {
            tracing::warn!(target: "actions.dispatch", command = ?other, "not_an_edit_command");
            return DispatchResult::clean();
        }
    };
    let outcome = DispatchResult::from_edit(result);
    tracing::trace!(
        target: "actions.dispatch",
        command = ?command,
        ok = outcome.dirty,
        undo_depth = session.state().history().undo_depth(),
        redo_depth = session.state().history().redo_depth(),
        "edit"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::CommandParser;
    use core_cipher::RotationCipher;

    fn session_with(lines: &[&str]) -> Session {
        let mut s = Session::new(Box::new(RotationCipher));
        for l in lines {
            s.append(l).unwrap();
        }
        s
    }

    fn edit(s: &mut Session, line: &str) -> DispatchResult {
        handle_edit(CommandParser::parse(line), s)
    }

    #[test]
    fn insert_marks_dirty() {
        let mut s = session_with(&["abc"]);
        let r = edit(&mut s, "insert 0 1 XY");
        assert!(r.dirty);
        assert_eq!(s.state().line(0), Some("aXYbc"));
    }

    #[test]
    fn invalid_line_is_reported() {
        let mut s = session_with(&["abc"]);
        let r = edit(&mut s, "delete 3 0 1");
        assert!(!r.dirty);
        assert_eq!(
            r.messages,
            vec!["error: invalid line number 3 (buffer holds 1 lines)"]
        );
    }

    #[test]
    fn copy_reports_size_and_stays_clean() {
        let mut s = session_with(&["hello"]);
        let r = edit(&mut s, "copy 0 0 4");
        assert!(!r.dirty);
        assert_eq!(r.messages, vec!["Copied 4 bytes"]);
        assert_eq!(s.state().clipboard().contents(), "hell");
    }
}
