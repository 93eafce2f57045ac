//! Reversible edit commands.
//!
//! Each variant carries the coordinates fixed at construction plus whatever
//! snapshot it needs to reverse itself. Snapshots are owned by the command.
//!
//! | Variant         | execute                                  | undo                                  |
//! |-----------------|------------------------------------------|---------------------------------------|
//! | `Insert`        | splice `text` at `at`                    | delete `text.len()` bytes at `at`     |
//! | `Delete`        | capture removed bytes, remove them       | re-insert the captured bytes          |
//! | `Cut`           | as `Delete`, and write clipboard         | as `Delete` (clipboard untouched)     |
//! | `Copy`          | write clipboard only                     | nothing                               |
//! | `Paste`         | insert clipboard text (if non-empty)     | delete the pasted bytes               |
//! | `InsertReplace` | splice `text` at `at`                    | overwrite the line with `original_line` |
//!
//! `InsertReplace` undo restores the whole line captured at construction, so any
//! later edit to that line that is still applied at undo time is discarded.
//! History is strictly LIFO so in practice those later edits have already been
//! undone by then.

use core_text::{BufferError, LineBuffer, Position};

use crate::Clipboard;

/// Discriminant of an [`EditCommand`], used for logging and dispatch summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
    Cut,
    Copy,
    Paste,
    InsertReplace,
}

impl EditKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EditKind::Insert => "insert",
            EditKind::Delete => "delete",
            EditKind::Cut => "cut",
            EditKind::Copy => "copy",
            EditKind::Paste => "paste",
            EditKind::InsertReplace => "insert_replace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Insert {
        at: Position,
        text: String,
    },
    Delete {
        at: Position,
        length: usize,
        /// Captured at execute time; dropped again once undone.
        deleted: Option<String>,
    },
    Cut {
        at: Position,
        length: usize,
        cut: Option<String>,
    },
    Copy {
        at: Position,
        length: usize,
    },
    Paste {
        at: Position,
        /// Clipboard text taken on first execution and replayed on redo.
        pasted: Option<String>,
    },
    InsertReplace {
        at: Position,
        text: String,
        original_line: String,
    },
}

impl EditCommand {
    pub fn insert<S: Into<String>>(at: Position, text: S) -> Self {
        EditCommand::Insert {
            at,
            text: text.into(),
        }
    }

    pub fn delete(at: Position, length: usize) -> Self {
        EditCommand::Delete {
            at,
            length,
            deleted: None,
        }
    }

    pub fn cut(at: Position, length: usize) -> Self {
        EditCommand::Cut {
            at,
            length,
            cut: None,
        }
    }

    pub fn copy(at: Position, length: usize) -> Self {
        EditCommand::Copy { at, length }
    }

    pub fn paste(at: Position) -> Self {
        EditCommand::Paste { at, pasted: None }
    }

    /// Capture the full current content of `at.line` and prepare to splice `text`.
    pub fn insert_replace<S: Into<String>>(
        buffer: &LineBuffer,
        at: Position,
        text: S,
    ) -> Result<Self, BufferError> {
        let original_line = buffer
            .line(at.line)
            .ok_or(BufferError::InvalidLine {
                line: at.line,
                total: buffer.total_lines(),
            })?
            .to_owned();
        Ok(EditCommand::InsertReplace {
            at,
            text: text.into(),
            original_line,
        })
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditCommand::Insert { .. } => EditKind::Insert,
            EditCommand::Delete { .. } => EditKind::Delete,
            EditCommand::Cut { .. } => EditKind::Cut,
            EditCommand::Copy { .. } => EditKind::Copy,
            EditCommand::Paste { .. } => EditKind::Paste,
            EditCommand::InsertReplace { .. } => EditKind::InsertReplace,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EditCommand::Insert { at, .. }
            | EditCommand::Delete { at, .. }
            | EditCommand::Cut { at, .. }
            | EditCommand::Copy { at, .. }
            | EditCommand::Paste { at, .. }
            | EditCommand::InsertReplace { at, .. } => *at,
        }
    }

    /// Copy leaves the buffer untouched and is never kept in history.
    pub fn records_history(&self) -> bool {
        !matches!(self, EditCommand::Copy { .. })
    }

    /// Apply the command. On error the buffer and clipboard are unchanged.
    pub fn execute(
        &mut self,
        buffer: &mut LineBuffer,
        clipboard: &mut Clipboard,
    ) -> Result<(), BufferError> {
        match self {
            EditCommand::Insert { at, text } | EditCommand::InsertReplace { at, text, .. } => {
                buffer.insert(at.line, at.byte, text)
            }
            EditCommand::Delete {
                at,
                length,
                deleted,
            } => {
                *deleted = Some(buffer.delete(at.line, at.byte, *length)?);
                Ok(())
            }
            EditCommand::Cut { at, length, cut } => {
                let removed = buffer.delete(at.line, at.byte, *length)?;
                clipboard.set(removed.as_str());
                *cut = Some(removed);
                Ok(())
            }
            EditCommand::Copy { at, length } => {
                let copied = buffer.slice(at.line, at.byte, *length)?;
                clipboard.set(copied);
                Ok(())
            }
            EditCommand::Paste { at, pasted } => {
                let text = pasted
                    .clone()
                    .unwrap_or_else(|| clipboard.contents().to_owned());
                if !text.is_empty() {
                    buffer.insert(at.line, at.byte, &text)?;
                }
                *pasted = Some(text);
                Ok(())
            }
        }
    }

    /// Reverse a previously executed command.
    pub fn undo(&mut self, buffer: &mut LineBuffer) -> Result<(), BufferError> {
        match self {
            EditCommand::Insert { at, text } => {
                buffer.delete(at.line, at.byte, text.len())?;
                Ok(())
            }
            EditCommand::Delete { at, deleted, .. } | EditCommand::Cut { at, cut: deleted, .. } => {
                if let Some(text) = deleted.as_deref() {
                    buffer.insert(at.line, at.byte, text)?;
                }
                *deleted = None;
                Ok(())
            }
            EditCommand::Copy { .. } => Ok(()),
            EditCommand::Paste { at, pasted } => {
                if let Some(text) = pasted.as_deref().filter(|t| !t.is_empty()) {
                    buffer.delete(at.line, at.byte, text.len())?;
                }
                Ok(())
            }
            EditCommand::InsertReplace {
                at, original_line, ..
            } => buffer.replace_line(at.line, original_line),
        }
    }
}
