use std::path::Path;

use core_cipher::{CipherModule, Direction};
use core_state::EditorState;
use core_text::SearchHit;
use tracing::info;

use crate::{SessionError, io_ops};

/// One editing session: the editor state plus the cipher module injected at
/// construction.
pub struct Session {
    state: EditorState,
    cipher: Box<dyn CipherModule>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("lines", &self.state.total_lines())
            .field("undo_depth", &self.state.history().undo_depth())
            .field("redo_depth", &self.state.history().redo_depth())
            .field("cipher", &self.cipher.name())
            .finish()
    }
}

impl Session {
    pub fn new(cipher: Box<dyn CipherModule>) -> Self {
        Self::with_state(EditorState::default(), cipher)
    }

    pub fn with_state(state: EditorState, cipher: Box<dyn CipherModule>) -> Self {
        info!(target: "runtime", cipher = cipher.name(), "session_start");
        Self { state, cipher }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn cipher_name(&self) -> &'static str {
        self.cipher.name()
    }

    pub fn append(&mut self, text: &str) -> Result<(), SessionError> {
        Ok(self.state.append(text)?)
    }

    pub fn new_line(&mut self) -> Result<(), SessionError> {
        Ok(self.state.new_line()?)
    }

    pub fn insert_text(&mut self, line: usize, index: usize, text: &str) -> Result<(), SessionError> {
        Ok(self.state.insert_text(line, index, text)?)
    }

    pub fn delete_text(
        &mut self,
        line: usize,
        index: usize,
        length: usize,
    ) -> Result<(), SessionError> {
        Ok(self.state.delete_text(line, index, length)?)
    }

    pub fn cut_text(&mut self, line: usize, index: usize, length: usize) -> Result<(), SessionError> {
        Ok(self.state.cut_text(line, index, length)?)
    }

    pub fn copy_text(&mut self, line: usize, index: usize, length: usize) -> Result<(), SessionError> {
        Ok(self.state.copy_text(line, index, length)?)
    }

    pub fn paste_text(&mut self, line: usize, index: usize) -> Result<(), SessionError> {
        Ok(self.state.paste_text(line, index)?)
    }

    pub fn insert_replace_text(
        &mut self,
        line: usize,
        index: usize,
        text: &str,
    ) -> Result<(), SessionError> {
        Ok(self.state.insert_replace_text(line, index, text)?)
    }

    pub fn undo(&mut self) -> Result<bool, SessionError> {
        Ok(self.state.undo()?)
    }

    pub fn redo(&mut self) -> Result<bool, SessionError> {
        Ok(self.state.redo()?)
    }

    pub fn search_text(&self, needle: &str) -> Vec<SearchHit> {
        self.state.search_text(needle)
    }

    /// All lines, each terminated by `\n`.
    pub fn render_text(&self) -> String {
        let buffer = self.state.buffer();
        let mut out = String::with_capacity(buffer.lines().map(|l| l.len() + 1).sum());
        for line in buffer.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Append the lines of `path` after the current content. History is untouched.
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize, SessionError> {
        let was_empty = self.state.total_lines() == 0;
        let state = &mut self.state;
        let loaded = io_ops::read_lines(path, |line| state.append(&line))?;
        if was_empty {
            self.state.mark_clean();
        }
        info!(target: "io", file = %path.display(), lines = loaded, total = self.state.total_lines(), "load_from_file");
        Ok(loaded)
    }

    pub fn save_to_file(&mut self, path: &Path) -> Result<usize, SessionError> {
        let written = io_ops::write_lines(path, self.state.buffer().lines())?;
        self.state.mark_clean();
        info!(target: "io", file = %path.display(), lines = written, "save_to_file");
        Ok(written)
    }

    pub fn encrypt_file(&self, input: &Path, output: &Path, key: i64) -> Result<usize, SessionError> {
        self.transform_file(Direction::Encrypt, input, output, key)
    }

    pub fn decrypt_file(&self, input: &Path, output: &Path, key: i64) -> Result<usize, SessionError> {
        self.transform_file(Direction::Decrypt, input, output, key)
    }

    /// Read the raw lines of `input`, transform each and write the result to
    /// `output`. Lines need not be UTF-8. The session buffer and history are
    /// not involved.
    fn transform_file(
        &self,
        direction: Direction,
        input: &Path,
        output: &Path,
        key: i64,
    ) -> Result<usize, SessionError> {
        let mut scratch: Vec<Vec<u8>> = Vec::new();
        io_ops::read_raw_lines(input, |line| scratch.push(line))?;
        let module: &dyn CipherModule = self.cipher.as_ref();
        let transformed: Vec<Vec<u8>> = scratch
            .iter()
            .map(|line| direction.apply_bytes(module, line, key))
            .collect();
        let written = io_ops::write_lines(output, &transformed)?;
        info!(
            target: "cipher",
            op = direction.as_str(),
            module = module.name(),
            input = %input.display(),
            output = %output.display(),
            lines = written,
            "file_transformed"
        );
        Ok(written)
    }
}
