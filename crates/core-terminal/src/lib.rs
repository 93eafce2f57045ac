//! Console backend abstraction and crossterm implementation.
//!
//! The editor runs in the normal (cooked) terminal screen; the backend only
//! needs to clear the visible console and set the window title.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType, SetTitle},
};
use std::io::{Write, stdout};

pub trait ConsoleBackend {
    /// Wipe the visible console and home the cursor.
    fn clear(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

/// Backend writing crossterm commands to stdout.
#[derive(Debug, Default)]
pub struct CrosstermBackend;

impl CrosstermBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ConsoleBackend for CrosstermBackend {
    fn clear(&mut self) -> Result<()> {
        let mut out = stdout();
        execute!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))?;
        out.flush()?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

/// Backend that only counts calls; selected when stdout is not a terminal, and in tests.
#[derive(Debug, Default)]
pub struct NullBackend {
    pub clears: usize,
    pub title: Option<String>,
}

impl ConsoleBackend for NullBackend {
    fn clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }
}
