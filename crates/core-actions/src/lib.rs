//! Editing session surface: file I/O, cipher transforms and command dispatch.
//!
//! `Session` is what the interactive front end talks to. It owns the
//! `EditorState` (buffer, clipboard, history) and the cipher module resolved at
//! startup. `dispatcher` turns one parsed command line into session calls and
//! a printable outcome.

use std::path::PathBuf;

use core_text::BufferError;
use thiserror::Error;

pub mod dispatcher;
pub mod io_ops;
mod session;

pub use dispatcher::{CommandParser, DispatchResult, ParsedCommand, dispatch};
pub use session::Session;

/// Failures surfaced by session entry points. None of them end the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("could not {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    pub(crate) fn io(op: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        tracing::error!(target: "io", op, path = %path.display(), error = %source, "file_io_error");
        SessionError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}
