//! Structured parsing of one menu input line.
//!
//! A line starts with a command word or its menu number, followed by the
//! arguments on the same line. Numeric arguments are whitespace separated;
//! a trailing text argument is everything after the single separator that
//! follows the last number, so leading and embedded spaces survive.
//!
//! Parsing is pure: no session access, no side effects. Malformed input
//! becomes `ParsedCommand::Invalid(reason)` for the dispatcher to report.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Append(String),
    NewLine,
    Save(PathBuf),
    Load(PathBuf),
    Print,
    Insert {
        line: usize,
        index: usize,
        text: String,
    },
    Delete {
        line: usize,
        index: usize,
        length: usize,
    },
    Search(String),
    Clear,
    Undo,
    Redo,
    Cut {
        line: usize,
        index: usize,
        length: usize,
    },
    Copy {
        line: usize,
        index: usize,
        length: usize,
    },
    Paste {
        line: usize,
        index: usize,
    },
    Replace {
        line: usize,
        index: usize,
        text: String,
    },
    Encrypt {
        input: PathBuf,
        output: PathBuf,
        key: i64,
    },
    Decrypt {
        input: PathBuf,
        output: PathBuf,
        key: i64,
    },
    Help,
    Quit,
    Empty,
    Invalid(String),
}

/// Menu numbers in display order.
pub const MENU: &[(&str, &str)] = &[
    ("1", "append <text>"),
    ("2", "newline"),
    ("3", "save <file>"),
    ("4", "load <file>"),
    ("5", "print"),
    ("6", "insert <line> <index> <text>"),
    ("7", "delete <line> <index> <length>"),
    ("8", "search <text>"),
    ("9", "clear"),
    ("10", "undo"),
    ("11", "redo"),
    ("12", "cut <line> <index> <length>"),
    ("13", "copy <line> <index> <length>"),
    ("14", "paste <line> <index>"),
    ("15", "replace <line> <index> <text>"),
    ("16", "encrypt <input> <output> <key>"),
    ("17", "decrypt <input> <output> <key>"),
    ("0", "quit"),
];

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let raw = raw.trim_end_matches(['\r', '\n']);
        let Some((word, rest)) = next_token(raw) else {
            return ParsedCommand::Empty;
        };
        let lowered = word.to_ascii_lowercase();
        let name = canonical_name(&lowered);
        match Self::parse_named(name, rest) {
            Ok(cmd) => cmd,
            Err(reason) => ParsedCommand::Invalid(reason),
        }
    }

    fn parse_named(name: &str, rest: &str) -> Result<ParsedCommand, String> {
        let cmd = match name {
            "append" => ParsedCommand::Append(text_arg(rest).to_string()),
            "newline" => ParsedCommand::NewLine,
            "save" => ParsedCommand::Save(path_arg(rest, name)?),
            "load" => ParsedCommand::Load(path_arg(rest, name)?),
            "print" => ParsedCommand::Print,
            "insert" | "replace" => {
                let (line, rest) = number_arg(rest, "line")?;
                let (index, rest) = number_arg(rest, "index")?;
                let text = text_arg(rest).to_string();
                if name == "insert" {
                    ParsedCommand::Insert { line, index, text }
                } else {
                    ParsedCommand::Replace { line, index, text }
                }
            }
            "delete" | "cut" | "copy" => {
                let (line, rest) = number_arg(rest, "line")?;
                let (index, rest) = number_arg(rest, "index")?;
                let (length, rest) = number_arg(rest, "length")?;
                no_more(rest, name)?;
                match name {
                    "delete" => ParsedCommand::Delete {
                        line,
                        index,
                        length,
                    },
                    "cut" => ParsedCommand::Cut {
                        line,
                        index,
                        length,
                    },
                    _ => ParsedCommand::Copy {
                        line,
                        index,
                        length,
                    },
                }
            }
            "paste" => {
                let (line, rest) = number_arg(rest, "line")?;
                let (index, rest) = number_arg(rest, "index")?;
                no_more(rest, name)?;
                ParsedCommand::Paste { line, index }
            }
            "search" => {
                let needle = text_arg(rest);
                if needle.is_empty() {
                    return Err("search needs text to look for".into());
                }
                ParsedCommand::Search(needle.to_string())
            }
            "encrypt" | "decrypt" => {
                let (input, rest) = next_token(rest).ok_or("missing input file")?;
                let (output, rest) = next_token(rest).ok_or("missing output file")?;
                let (key, rest) = next_token(rest).ok_or("missing key")?;
                no_more(rest, name)?;
                let key: i64 = key.parse().map_err(|_| format!("invalid key `{key}`"))?;
                let (input, output) = (PathBuf::from(input), PathBuf::from(output));
                if name == "encrypt" {
                    ParsedCommand::Encrypt { input, output, key }
                } else {
                    ParsedCommand::Decrypt { input, output, key }
                }
            }
            "clear" => ParsedCommand::Clear,
            "undo" => ParsedCommand::Undo,
            "redo" => ParsedCommand::Redo,
            "help" | "?" => ParsedCommand::Help,
            "quit" | "exit" => ParsedCommand::Quit,
            other => return Err(format!("unknown command `{other}`")),
        };
        Ok(cmd)
    }
}

fn canonical_name(word: &str) -> &str {
    MENU.iter()
        .find(|(number, _)| *number == word)
        .and_then(|(_, usage)| usage.split_whitespace().next())
        .unwrap_or(word)
}

/// Split off the next whitespace-delimited token. The returned rest still
/// starts with the separator.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn number_arg<'a>(s: &'a str, what: &str) -> Result<(usize, &'a str), String> {
    let (token, rest) = next_token(s).ok_or_else(|| format!("missing {what}"))?;
    let n = token
        .parse()
        .map_err(|_| format!("invalid {what} `{token}`"))?;
    Ok((n, rest))
}

fn text_arg(rest: &str) -> &str {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => rest,
    }
}

fn path_arg(rest: &str, name: &str) -> Result<PathBuf, String> {
    let path = rest.trim();
    if path.is_empty() {
        return Err(format!("{name} needs a file name"));
    }
    Ok(PathBuf::from(path))
}

fn no_more(rest: &str, name: &str) -> Result<(), String> {
    if rest.trim().is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected arguments after {name}: `{}`", rest.trim()))
    }
}
