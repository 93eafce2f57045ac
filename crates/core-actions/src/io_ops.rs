//! Plain-text line I/O.
//!
//! Files are one logical line per physical line, newline terminated, with no
//! header and no escaping. Reading strips the `\n` (and a `\r` before it);
//! writing terminates every line, including the last, with `\n`.
//!
//! [`read_lines`] decodes UTF-8 for the editing buffer. [`read_raw_lines`]
//! keeps the bytes as they are for whole-file transforms, which must not
//! reject or alter bytes they do not understand.
//!
//! Reading hands lines to a sink one at a time. When a read fails midway the
//! lines already delivered stay delivered and the error is returned, so a load
//! stops at the first unreadable line boundary.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use core_text::BufferError;

use crate::SessionError;

/// Stream the lines of `path` into `sink`. Returns the number of lines delivered.
pub fn read_lines<F>(path: &Path, mut sink: F) -> Result<usize, SessionError>
where
    F: FnMut(String) -> Result<(), BufferError>,
{
    let file = File::open(path).map_err(|e| SessionError::io("open", path, e))?;
    let mut count = 0usize;
    for line in BufReader::new(file).lines() {
        let mut line = line.map_err(|e| SessionError::io("read", path, e))?;
        if line.ends_with('\r') {
            line.pop();
        }
        sink(line)?;
        count += 1;
    }
    tracing::debug!(target: "io", file = %path.display(), lines = count, "file_read_ok");
    Ok(count)
}

/// Stream the raw byte lines of `path` into `sink`, with the same line ending
/// handling as [`read_lines`] but no UTF-8 decoding.
pub fn read_raw_lines<F>(path: &Path, mut sink: F) -> Result<usize, SessionError>
where
    F: FnMut(Vec<u8>),
{
    let file = File::open(path).map_err(|e| SessionError::io("open", path, e))?;
    let mut reader = BufReader::new(file);
    let mut count = 0usize;
    loop {
        let mut line = Vec::new();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| SessionError::io("read", path, e))?;
        if read == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        sink(line);
        count += 1;
    }
    tracing::debug!(target: "io", file = %path.display(), lines = count, "file_read_raw_ok");
    Ok(count)
}

/// Write every line of `lines` to `path`, replacing any existing file.
///
/// A failure after the file was created may leave a partial file behind.
pub fn write_lines<I>(path: &Path, lines: I) -> Result<usize, SessionError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let file = File::create(path).map_err(|e| SessionError::io("create", path, e))?;
    let mut out = BufWriter::new(file);
    let mut count = 0usize;
    for line in lines {
        out.write_all(line.as_ref())
            .and_then(|_| out.write_all(b"\n"))
            .map_err(|e| SessionError::io("write", path, e))?;
        count += 1;
    }
    out.flush().map_err(|e| SessionError::io("write", path, e))?;
    tracing::debug!(target: "io", file = %path.display(), lines = count, "file_write_ok");
    Ok(count)
}
