//! Interactive menu loop: one command per input line until `quit` or EOF.

use anyhow::Result;
use core_actions::{CommandParser, ParsedCommand, Session, dispatch};
use core_terminal::ConsoleBackend;
use std::io::{BufRead, Write};

const PROMPT: &str = "quill> ";

/// Counts reported in the shutdown log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub commands: usize,
    pub errors: usize,
}

pub fn run<R, W>(
    session: &mut Session,
    console: &mut dyn ConsoleBackend,
    input: R,
    mut out: W,
) -> Result<LoopSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = LoopSummary::default();
    print_result(&mut out, &dispatch(ParsedCommand::Help, session, console))?;
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let command = CommandParser::parse(&line?);
        if command == ParsedCommand::Empty {
            continue;
        }
        summary.commands += 1;
        let result = dispatch(command, session, console);
        summary.errors += result
            .messages
            .iter()
            .filter(|m| m.starts_with("error:"))
            .count();
        print_result(&mut out, &result)?;
        if result.quit {
            break;
        }
    }
    Ok(summary)
}

fn print_result<W: Write>(out: &mut W, result: &core_actions::DispatchResult) -> Result<()> {
    for msg in &result.messages {
        writeln!(out, "{msg}")?;
    }
    Ok(())
}
