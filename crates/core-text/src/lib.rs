//! Line-addressed text buffer.
//!
//! The buffer owns an ordered table of lines. Each line is an owned `String`
//! with no length ceiling; offsets inside a line are byte offsets. An offset
//! that would split a UTF-8 sequence is rejected as an invalid index instead of
//! being rounded to the nearest boundary.
//!
//! Growth policy: the line table grows in fixed increments of
//! [`GROWTH_INCREMENT`] slots once the logical line count reaches the current
//! capacity. Growing never reorders or mutates existing lines. Storage is
//! reserved with `try_reserve_exact` so exhaustion surfaces as
//! [`BufferError::AllocationFailure`] and leaves the buffer untouched.
//!
//! Views returned by [`LineBuffer::line`] borrow the buffer, so the borrow
//! checker already prevents a view from outliving the next mutating call.

use thiserror::Error;
use tracing::{debug, trace};

pub mod search;

/// Slots reserved by a freshly created buffer.
pub const INITIAL_CAPACITY: usize = 10;
/// Slots added each time the line table is full.
pub const GROWTH_INCREMENT: usize = 10;

/// A position inside a buffer expressed as (line index, byte offset within that line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, index {}", self.line, self.byte)
    }
}

/// A match reported by [`LineBuffer::search`]: line index and byte offset of the match start.
pub type SearchHit = Position;

/// Failures reported by buffer mutation and addressing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("invalid line number {line} (buffer holds {total} lines)")]
    InvalidLine { line: usize, total: usize },
    #[error("invalid index {index} on line {line} (line length {len})")]
    InvalidIndex { line: usize, index: usize, len: usize },
    #[error("failed to allocate {requested} additional line slots")]
    AllocationFailure { requested: usize },
}

/// Ordered, growable sequence of text lines.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
    capacity: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for LineBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines
    }
}

impl Eq for LineBuffer {}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
        }
    }

    /// Build a buffer holding `lines` in order.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, BufferError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buffer = Self::new();
        for line in lines {
            buffer.append(line)?;
        }
        Ok(buffer)
    }

    /// Number of logical lines.
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of line slots currently reserved. Always `>= total_lines()`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Borrow the content of line `idx`, or `None` when no such line exists.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Byte length of line `idx` (0 when absent).
    pub fn line_byte_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, String::len)
    }

    /// Iterate all logical lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Add `text` as a new last line.
    pub fn append(&mut self, text: impl Into<String>) -> Result<(), BufferError> {
        self.ensure_capacity()?;
        self.lines.push(text.into());
        trace!(target: "text.buffer", total = self.lines.len(), "append");
        Ok(())
    }

    /// Append an empty line.
    pub fn new_line(&mut self) -> Result<(), BufferError> {
        self.append(String::new())
    }

    /// Splice `text` into line `line` at byte offset `index`.
    ///
    /// The result is `prefix(0..index) + text + suffix(index..)`. `index` may equal
    /// the line length, which appends to the line.
    pub fn insert(&mut self, line: usize, index: usize, text: &str) -> Result<(), BufferError> {
        self.check(line, index)?;
        let target = &mut self.lines[line];
        target.insert_str(index, text);
        trace!(target: "text.buffer", line, index, inserted = text.len(), len = target.len(), "insert");
        Ok(())
    }

    /// Remove up to `length` bytes from line `line` starting at `index`, returning
    /// the removed text.
    ///
    /// `length` is clamped to the end of the line, so an over-long request removes
    /// the suffix and nothing more.
    pub fn delete(
        &mut self,
        line: usize,
        index: usize,
        length: usize,
    ) -> Result<String, BufferError> {
        let end = self.span_end(line, index, length)?;
        let removed: String = self.lines[line].drain(index..end).collect();
        trace!(target: "text.buffer", line, index, requested = length, removed = removed.len(), "delete");
        Ok(removed)
    }

    /// Borrow up to `length` bytes of line `line` starting at `index`, clamped the
    /// same way [`LineBuffer::delete`] clamps.
    pub fn slice(&self, line: usize, index: usize, length: usize) -> Result<&str, BufferError> {
        let end = self.span_end(line, index, length)?;
        Ok(&self.lines[line][index..end])
    }

    /// Overwrite the whole content of line `line`.
    pub fn replace_line(&mut self, line: usize, text: &str) -> Result<(), BufferError> {
        self.check_line(line)?;
        let target = &mut self.lines[line];
        target.clear();
        target.push_str(text);
        trace!(target: "text.buffer", line, len = text.len(), "replace_line");
        Ok(())
    }

    /// Every occurrence of `needle`, line by line, left to right.
    ///
    /// After a match the scan resumes one character past the match start, so
    /// overlapping occurrences are reported. An empty needle matches nothing.
    pub fn search(&self, needle: &str) -> Vec<SearchHit> {
        let hits: Vec<SearchHit> = self
            .lines
            .iter()
            .enumerate()
            .flat_map(|(line, text)| {
                search::scan_line(text, needle).map(move |byte| Position::new(line, byte))
            })
            .collect();
        debug!(target: "text.buffer", needle_len = needle.len(), hits = hits.len(), "search");
        hits
    }

    /// Drop every line and return to the initial capacity.
    pub fn clear(&mut self) {
        self.lines = Vec::with_capacity(INITIAL_CAPACITY);
        self.capacity = INITIAL_CAPACITY;
    }

    fn ensure_capacity(&mut self) -> Result<(), BufferError> {
        if self.lines.len() < self.capacity {
            return Ok(());
        }
        let new_capacity = self.capacity + GROWTH_INCREMENT;
        let additional = new_capacity - self.lines.len();
        self.lines.try_reserve_exact(additional).map_err(|e| {
            tracing::error!(target: "text.buffer", ?e, additional, "line_table_growth_failed");
            BufferError::AllocationFailure {
                requested: additional,
            }
        })?;
        debug!(target: "text.buffer", from = self.capacity, to = new_capacity, "line_table_grown");
        self.capacity = new_capacity;
        Ok(())
    }

    fn check_line(&self, line: usize) -> Result<&String, BufferError> {
        self.lines.get(line).ok_or(BufferError::InvalidLine {
            line,
            total: self.lines.len(),
        })
    }

    fn check(&self, line: usize, index: usize) -> Result<&String, BufferError> {
        let text = self.check_line(line)?;
        if index > text.len() || !text.is_char_boundary(index) {
            return Err(BufferError::InvalidIndex {
                line,
                index,
                len: text.len(),
            });
        }
        Ok(text)
    }

    fn span_end(&self, line: usize, index: usize, length: usize) -> Result<usize, BufferError> {
        let text = self.check(line, index)?;
        let end = index + length.min(text.len() - index);
        if !text.is_char_boundary(end) {
            return Err(BufferError::InvalidIndex {
                line,
                index: end,
                len: text.len(),
            });
        }
        Ok(end)
    }
}
