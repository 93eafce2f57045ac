//! Editor state: line buffer, clipboard and edit history.
//!
//! `EditorState` is the only owner of the buffer and clipboard. Every mutating
//! entry point builds the matching [`EditCommand`] and routes it through the
//! [`HistoryEngine`], which keeps undo/redo linear:
//!
//! - A new edit clears the redo stack.
//! - Undo pops the undo stack and pushes onto the redo stack; redo mirrors it.
//! - Copy runs immediately and is never recorded.
//! - A rejected edit (bad line or index) changes nothing, including history.
//!
//! Appending lines (`append`, `new_line`) is not an edit command and cannot be
//! undone. Appends never shift existing lines, so recorded commands stay valid.
//!
//! Telemetry: command execution and stack transitions are traced under
//! `state.history`; clipboard writes under `state.clipboard`.

use core_text::{BufferError, LineBuffer, Position, SearchHit};

pub mod clipboard;
pub mod command;
pub mod undo;

pub use clipboard::Clipboard;
pub use command::{EditCommand, EditKind};
pub use undo::HistoryEngine;

#[derive(Debug, Default)]
pub struct EditorState {
    buffer: LineBuffer,
    clipboard: Clipboard,
    history: HistoryEngine,
    /// Content changed since the last load or save.
    pub dirty: bool,
}

impl EditorState {
    pub fn new(buffer: LineBuffer) -> Self {
        Self {
            buffer,
            clipboard: Clipboard::new(),
            history: HistoryEngine::new(),
            dirty: false,
        }
    }

    /// Same as [`EditorState::new`] with a bounded undo stack.
    pub fn with_history_limit(buffer: LineBuffer, max_depth: Option<usize>) -> Self {
        Self {
            history: HistoryEngine::with_max_depth(max_depth),
            ..Self::new(buffer)
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }
    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }
    pub fn history(&self) -> &HistoryEngine {
        &self.history
    }

    pub fn total_lines(&self) -> usize {
        self.buffer.total_lines()
    }
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.buffer.line(idx)
    }

    pub fn append(&mut self, text: &str) -> Result<(), BufferError> {
        self.buffer.append(text)?;
        self.dirty = true;
        Ok(())
    }

    pub fn new_line(&mut self) -> Result<(), BufferError> {
        self.buffer.new_line()?;
        self.dirty = true;
        Ok(())
    }

    pub fn insert_text(&mut self, line: usize, index: usize, text: &str) -> Result<(), BufferError> {
        self.perform(EditCommand::insert(Position::new(line, index), text))
    }

    pub fn delete_text(
        &mut self,
        line: usize,
        index: usize,
        length: usize,
    ) -> Result<(), BufferError> {
        self.perform(EditCommand::delete(Position::new(line, index), length))
    }

    pub fn cut_text(&mut self, line: usize, index: usize, length: usize) -> Result<(), BufferError> {
        self.perform(EditCommand::cut(Position::new(line, index), length))
    }

    pub fn copy_text(&mut self, line: usize, index: usize, length: usize) -> Result<(), BufferError> {
        self.history.perform(
            EditCommand::copy(Position::new(line, index), length),
            &mut self.buffer,
            &mut self.clipboard,
        )
    }

    pub fn paste_text(&mut self, line: usize, index: usize) -> Result<(), BufferError> {
        self.perform(EditCommand::paste(Position::new(line, index)))
    }

    pub fn insert_replace_text(
        &mut self,
        line: usize,
        index: usize,
        text: &str,
    ) -> Result<(), BufferError> {
        let cmd = EditCommand::insert_replace(&self.buffer, Position::new(line, index), text)?;
        self.perform(cmd)
    }

    /// Returns `Ok(false)` when there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, BufferError> {
        let undone = self.history.undo(&mut self.buffer)?;
        self.dirty |= undone;
        Ok(undone)
    }

    /// Returns `Ok(false)` when there was nothing to redo.
    pub fn redo(&mut self) -> Result<bool, BufferError> {
        let redone = self.history.redo(&mut self.buffer, &mut self.clipboard)?;
        self.dirty |= redone;
        Ok(redone)
    }

    pub fn search_text(&self, needle: &str) -> Vec<SearchHit> {
        self.buffer.search(needle)
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn perform(&mut self, cmd: EditCommand) -> Result<(), BufferError> {
        self.history
            .perform(cmd, &mut self.buffer, &mut self.clipboard)?;
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_mark_state_dirty() {
        let mut s = EditorState::new(LineBuffer::from_lines(["abc"]).unwrap());
        assert!(!s.dirty);
        s.insert_text(0, 0, "x").unwrap();
        assert!(s.dirty);
        s.mark_clean();
        s.copy_text(0, 0, 1).unwrap();
        assert!(!s.dirty, "copy does not change content");
    }

    #[test]
    fn rejected_edit_leaves_state_clean() {
        let mut s = EditorState::new(LineBuffer::from_lines(["abc"]).unwrap());
        assert!(s.delete_text(1, 0, 1).is_err());
        assert!(!s.dirty);
        assert_eq!(s.history().undo_depth(), 0);
    }

    #[test]
    fn insert_replace_on_missing_line_is_rejected() {
        let mut s = EditorState::default();
        assert_eq!(
            s.insert_replace_text(0, 0, "x"),
            Err(BufferError::InvalidLine { line: 0, total: 0 })
        );
    }

    #[test]
    fn history_limit_applies() {
        let mut s = EditorState::with_history_limit(LineBuffer::from_lines([""]).unwrap(), Some(1));
        s.insert_text(0, 0, "a").unwrap();
        s.insert_text(0, 1, "b").unwrap();
        assert_eq!(s.history().undo_depth(), 1);
        assert_eq!(s.history().max_depth(), Some(1));
    }
}
