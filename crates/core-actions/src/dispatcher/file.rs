//! Load, save and whole-file cipher transforms.

use super::{DispatchResult, ParsedCommand};
use crate::Session;

pub(crate) fn handle_file(command: ParsedCommand, session: &mut Session) -> DispatchResult {
    match command {
        ParsedCommand::Load(path) => match session.load_from_file(&path) {
            Ok(n) => DispatchResult {
                dirty: session.state().dirty,
                ..DispatchResult::clean()
            }
            .with_message(format!("Loaded {n} lines from {}", path.display())),
            Err(e) => DispatchResult::error(e),
        },
        ParsedCommand::Save(path) => match session.save_to_file(&path) {
            Ok(n) => DispatchResult::clean()
                .with_message(format!("Saved {n} lines to {}", path.display())),
            Err(e) => DispatchResult::error(e),
        },
        ParsedCommand::Encrypt { input, output, key } => {
            match session.encrypt_file(&input, &output, key) {
                Ok(n) => DispatchResult::clean().with_message(format!(
                    "Encrypted {n} lines into {}",
                    output.display()
                )),
                Err(e) => DispatchResult::error(e),
            }
        }
        ParsedCommand::Decrypt { input, output, key } => {
            match session.decrypt_file(&input, &output, key) {
                Ok(n) => DispatchResult::clean().with_message(format!(
                    "Decrypted {n} lines into {}",
                    output.display()
                )),
                Err(e) => DispatchResult::error(e),
            }
        }
        other => {
            tracing::warn!(target: "actions.dispatch", command = ?other, "not_a_file_command");
            DispatchResult::clean()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_cipher::RotationCipher;
    use std::path::PathBuf;

    fn load(session: &mut Session, path: PathBuf) -> DispatchResult {
        handle_file(ParsedCommand::Load(path), session)
    }

    #[test]
    fn load_into_empty_session_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let mut s = Session::new(Box::new(RotationCipher));
        let r = load(&mut s, path);
        assert!(!r.dirty);
        assert!(!s.state().dirty);
        assert!(r.messages[0].starts_with("Loaded 2 lines"));
    }

    #[test]
    fn load_after_edits_stays_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "more\n").unwrap();
        let mut s = Session::new(Box::new(RotationCipher));
        s.append("existing").unwrap();
        assert!(load(&mut s, path).dirty);
    }
}
