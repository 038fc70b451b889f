//! Line commands typed at the `intake session` prompt.

use shared::domain::{AnswerValue, BlockKind, FileMeta};
use thiserror::Error;
use wizard_core::Command;

pub const HELP: &str = "\
commands:
  set <field> <value...>            enter a text value
  choose <field> <option>           pick a select or radio option
  attach <field> <name:type:bytes>  attach one or more files
  add <account|file>                add a repeatable block
  remove <account|file> <index>     remove a repeatable block
  next | back | jump <step>         move between steps
  submit                            submit from the review step
  summary | status | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Dispatch(Command),
    Summary,
    Status,
    Help,
    Quit,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("unknown command '{0}', type 'help'")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a step number")]
    BadStep(String),
    #[error("'{0}' is not a block index")]
    BadIndex(String),
    #[error("file '{0}' must be written as name:type:bytes")]
    BadFile(String),
    #[error(transparent)]
    Domain(#[from] shared::error::WizardError),
}

pub fn parse_line(raw: &str) -> Result<Line, LineError> {
    let raw = raw.trim();
    let (verb, rest) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
    let rest = rest.trim();

    let line = match verb.to_ascii_lowercase().as_str() {
        "" => Line::Blank,
        "set" => {
            let (field, value) = field_and_rest(rest, "set <field> <value...>")?;
            Line::Dispatch(Command::field(field, AnswerValue::text(value)))
        }
        "choose" => {
            let (field, option) = field_and_rest(rest, "choose <field> <option>")?;
            Line::Dispatch(Command::field(field, AnswerValue::choice(option)))
        }
        "attach" => {
            let (field, specs) = field_and_rest(rest, "attach <field> <name:type:bytes>...")?;
            let files = specs
                .split_whitespace()
                .map(parse_file)
                .collect::<Result<Vec<_>, _>>()?;
            Line::Dispatch(Command::field(field, AnswerValue::Files(files)))
        }
        "add" => {
            if rest.is_empty() {
                return Err(LineError::Usage("add <account|file>"));
            }
            Line::Dispatch(Command::AddBlock(rest.parse::<BlockKind>()?))
        }
        "remove" => {
            let mut words = rest.split_whitespace();
            let (Some(kind), Some(index), None) = (words.next(), words.next(), words.next()) else {
                return Err(LineError::Usage("remove <account|file> <index>"));
            };
            let kind = kind.parse::<BlockKind>()?;
            let index = index
                .parse::<usize>()
                .map_err(|_| LineError::BadIndex(index.to_string()))?;
            Line::Dispatch(Command::RemoveBlock { kind, index })
        }
        "next" => Line::Dispatch(Command::Advance),
        "back" => Line::Dispatch(Command::Retreat),
        "jump" => {
            let step = rest
                .parse::<usize>()
                .map_err(|_| LineError::BadStep(rest.to_string()))?;
            Line::Dispatch(Command::JumpToStep(step))
        }
        "submit" => Line::Dispatch(Command::Submit),
        "summary" => Line::Summary,
        "status" => Line::Status,
        "help" | "?" => Line::Help,
        "quit" | "exit" => Line::Quit,
        other => return Err(LineError::UnknownCommand(other.to_string())),
    };
    Ok(line)
}

fn field_and_rest<'a>(rest: &'a str, usage: &'static str) -> Result<(&'a str, &'a str), LineError> {
    match rest.split_once(char::is_whitespace) {
        Some((field, value)) => Ok((field, value.trim())),
        None if !rest.is_empty() => Ok((rest, "")),
        None => Err(LineError::Usage(usage)),
    }
}

/// `name:type:bytes`, split from the right so names may contain colons.
fn parse_file(spec: &str) -> Result<FileMeta, LineError> {
    let bad = || LineError::BadFile(spec.to_string());
    let (head, size) = spec.rsplit_once(':').ok_or_else(bad)?;
    let (name, mime_type) = head.rsplit_once(':').ok_or_else(bad)?;
    let size = size.parse::<u64>().map_err(|_| bad())?;
    if name.is_empty() || mime_type.is_empty() {
        return Err(bad());
    }
    Ok(FileMeta::new(name, size, mime_type))
}

#[cfg(test)]
#[path = "tests/line_tests.rs"]
mod tests;
