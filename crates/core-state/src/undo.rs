use core_text::{BufferError, LineBuffer};
use tracing::{debug, trace};

use crate::{Clipboard, EditCommand};

/// Linear undo/redo history of executed [`EditCommand`]s.
///
/// Every command is either on the undo stack, on the redo stack, or dropped.
/// Executing a new command clears the redo stack, so redo is only possible
/// directly after one or more undos.
#[derive(Debug, Default)]
pub struct HistoryEngine {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    /// Oldest commands are dropped once the undo stack exceeds this depth.
    max_depth: Option<usize>,
}

impl HistoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Most recently executed command still eligible for undo.
    pub fn last(&self) -> Option<&EditCommand> {
        self.undo_stack.last()
    }

    /// Execute `cmd` and record it.
    ///
    /// A failed command is dropped without touching either stack. Copy commands
    /// run but are not recorded and leave the redo stack intact.
    pub fn perform(
        &mut self,
        mut cmd: EditCommand,
        buffer: &mut LineBuffer,
        clipboard: &mut Clipboard,
    ) -> Result<(), BufferError> {
        let kind = cmd.kind();
        if let Err(e) = cmd.execute(buffer, clipboard) {
            debug!(target: "state.history", op = kind.as_str(), %e, "edit_rejected");
            return Err(e);
        }
        if !cmd.records_history() {
            trace!(target: "state.history", op = kind.as_str(), "edit_not_recorded");
            return Ok(());
        }
        self.push_undo(cmd);
        trace!(target: "state.history", op = kind.as_str(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "perform");
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.history", "redo_stack_cleared_on_new_edit");
        }
        Ok(())
    }

    /// Reverse the most recent command. Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut LineBuffer) -> Result<bool, BufferError> {
        let Some(mut cmd) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = cmd.undo(buffer) {
            tracing::error!(target: "state.history", op = cmd.kind().as_str(), %e, "undo_failed");
            self.undo_stack.push(cmd);
            return Err(e);
        }
        trace!(target: "state.history", op = cmd.kind().as_str(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len() + 1, "undo_pop");
        self.redo_stack.push(cmd);
        Ok(true)
    }

    /// Re-execute the most recently undone command. Returns `Ok(false)` when there
    /// is nothing to redo.
    pub fn redo(
        &mut self,
        buffer: &mut LineBuffer,
        clipboard: &mut Clipboard,
    ) -> Result<bool, BufferError> {
        let Some(mut cmd) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = cmd.execute(buffer, clipboard) {
            tracing::error!(target: "state.history", op = cmd.kind().as_str(), %e, "redo_failed");
            self.redo_stack.push(cmd);
            return Err(e);
        }
        trace!(target: "state.history", op = cmd.kind().as_str(), redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len() + 1, "redo_pop");
        self.push_undo(cmd);
        Ok(true)
    }

    /// Drop every recorded command.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, cmd: EditCommand) {
        self.undo_stack.push(cmd);
        if let Some(max) = self.max_depth
            && self.undo_stack.len() > max
        {
            let excess = self.undo_stack.len() - max;
            self.undo_stack.drain(..excess);
            trace!(target: "state.history", excess, "undo_stack_trimmed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Position;

    fn setup(lines: &[&str]) -> (HistoryEngine, LineBuffer, Clipboard) {
        (
            HistoryEngine::new(),
            LineBuffer::from_lines(lines.iter().copied()).unwrap(),
            Clipboard::new(),
        )
    }

    #[test]
    fn undo_and_redo_on_empty_history_are_noops() {
        let (mut h, mut b, mut c) = setup(&["abc"]);
        assert!(!h.undo(&mut b).unwrap());
        assert!(!h.redo(&mut b, &mut c).unwrap());
        assert_eq!(b.line(0), Some("abc"));
    }

    #[test]
    fn perform_moves_between_stacks() {
        let (mut h, mut b, mut c) = setup(&["abc"]);
        h.perform(EditCommand::insert(Position::new(0, 3), "d"), &mut b, &mut c)
            .unwrap();
        assert_eq!((h.undo_depth(), h.redo_depth()), (1, 0));
        assert!(h.undo(&mut b).unwrap());
        assert_eq!((h.undo_depth(), h.redo_depth()), (0, 1));
        assert!(h.redo(&mut b, &mut c).unwrap());
        assert_eq!((h.undo_depth(), h.redo_depth()), (1, 0));
        assert_eq!(b.line(0), Some("abcd"));
    }

    #[test]
    fn rejected_edit_keeps_redo_stack() {
        let (mut h, mut b, mut c) = setup(&["abc"]);
        h.perform(EditCommand::insert(Position::new(0, 0), "x"), &mut b, &mut c)
            .unwrap();
        h.undo(&mut b).unwrap();
        let err = h.perform(EditCommand::insert(Position::new(4, 0), "y"), &mut b, &mut c);
        assert!(err.is_err());
        assert_eq!(h.redo_depth(), 1);
        assert_eq!(h.undo_depth(), 0);
    }

    #[test]
    fn copy_is_not_recorded_and_keeps_redo() {
        let (mut h, mut b, mut c) = setup(&["abc"]);
        h.perform(EditCommand::delete(Position::new(0, 0), 1), &mut b, &mut c)
            .unwrap();
        h.undo(&mut b).unwrap();
        h.perform(EditCommand::copy(Position::new(0, 0), 2), &mut b, &mut c)
            .unwrap();
        assert_eq!(c.contents(), "ab");
        assert_eq!(h.undo_depth(), 0);
        assert_eq!(h.redo_depth(), 1);
    }

    #[test]
    fn max_depth_drops_oldest() {
        let mut h = HistoryEngine::with_max_depth(Some(2));
        let mut b = LineBuffer::from_lines([""]).unwrap();
        let mut c = Clipboard::new();
        for s in ["a", "b", "c"] {
            let at = Position::new(0, b.line_byte_len(0));
            h.perform(EditCommand::insert(at, s), &mut b, &mut c).unwrap();
        }
        assert_eq!(h.undo_depth(), 2);
        while h.undo(&mut b).unwrap() {}
        assert_eq!(b.line(0), Some("a"));
    }

    #[test]
    fn clear_empties_both_stacks() {
        let (mut h, mut b, mut c) = setup(&["abc"]);
        h.perform(EditCommand::insert(Position::new(0, 0), "x"), &mut b, &mut c)
            .unwrap();
        h.perform(EditCommand::insert(Position::new(0, 0), "y"), &mut b, &mut c)
            .unwrap();
        h.undo(&mut b).unwrap();
        h.clear();
        assert_eq!((h.undo_depth(), h.redo_depth()), (0, 0));
        assert!(h.last().is_none());
    }
}
