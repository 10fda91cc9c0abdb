//! Parsing of desk command lines.
//!
//! A line is a command word, a single space, and argument text. For `add`, the first argument
//! is the severity code and everything after it is the patient's name, spaces included.

use crate::patient::ArrivalOrder;
use crate::severity::Severity;
use triage_types::{NonEmptyText, TextError};

/// A parsed desk command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add {
        severity: Severity,
        name: NonEmptyText,
    },
    Peek,
    Next,
    List,
    Change {
        arrival: ArrivalOrder,
        severity: Severity,
    },
    Save {
        file: String,
    },
    Load {
        file: String,
    },
    Help,
    Quit,
}

/// Reasons a line could not be turned into a [`Command`].
///
/// These are user mistakes, reported back to the user; they never touch the queue.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("no command given.")]
    NoCommand,
    #[error("unrecognized command: {0}")]
    Unrecognised(String),
    #[error("no priority code given.")]
    NoPriorityCode,
    #[error("unrecognized priority code: {0}")]
    UnknownPriorityCode(String),
    #[error("no patient name given.")]
    NoPatientName,
    #[error("patient name must fit on one line.")]
    MultiLineName,
    #[error("No patient id provided")]
    NoPatientId,
    #[error("no file name given.")]
    NoFileName,
    #[error("unexpected text after {command}: {extra}")]
    TrailingArguments { command: &'static str, extra: String },
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        match word {
            "" => Err(CommandError::NoCommand),
            "add" => parse_add(rest),
            "peek" => Ok(Command::Peek),
            "next" => Ok(Command::Next),
            "list" => Ok(Command::List),
            "change" => parse_change(rest),
            "save" => file_argument(rest).map(|file| Command::Save { file }),
            "load" => file_argument(rest).map(|file| Command::Load { file }),
            "help" => Ok(Command::Help),
            "quit" => Ok(Command::Quit),
            other => Err(CommandError::Unrecognised(other.to_owned())),
        }
    }
}

fn parse_severity(code: &str) -> Result<Severity, CommandError> {
    if code.is_empty() {
        return Err(CommandError::NoPriorityCode);
    }
    Severity::parse(code).map_err(|_| CommandError::UnknownPriorityCode(code.to_owned()))
}

fn parse_add(rest: &str) -> Result<Command, CommandError> {
    let rest = rest.trim_start();
    let (code, name) = rest.split_once(' ').unwrap_or((rest, ""));

    let severity = parse_severity(code)?;
    let name = NonEmptyText::new(name).map_err(|err| match err {
        TextError::Empty => CommandError::NoPatientName,
        TextError::MultiLine => CommandError::MultiLineName,
    })?;

    Ok(Command::Add { severity, name })
}

fn parse_change(rest: &str) -> Result<Command, CommandError> {
    let mut args = rest.split_whitespace();

    let arrival = args
        .next()
        .and_then(|id| id.parse::<ArrivalOrder>().ok())
        .ok_or(CommandError::NoPatientId)?;
    let severity = parse_severity(args.next().unwrap_or(""))?;

    if let Some(extra) = args.next() {
        return Err(CommandError::TrailingArguments {
            command: "change",
            extra: extra.to_owned(),
        });
    }

    Ok(Command::Change { arrival, severity })
}

fn file_argument(rest: &str) -> Result<String, CommandError> {
    let file = rest.trim();
    if file.is_empty() {
        return Err(CommandError::NoFileName);
    }
    Ok(file.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).unwrap()
    }

    #[test]
    fn add_name_absorbs_remaining_text() {
        assert_eq!(
            Command::parse("add urgent Mary  Ann Smith"),
            Ok(Command::Add {
                severity: Severity::Urgent,
                name: text("Mary  Ann Smith"),
            })
        );
    }

    #[test]
    fn add_accepts_minimal_alias() {
        let parsed = Command::parse("add minimal Joe").unwrap();
        assert!(matches!(parsed, Command::Add { severity: Severity::Routine, .. }));
    }

    #[test]
    fn add_reports_missing_pieces_in_order() {
        assert_eq!(Command::parse("add"), Err(CommandError::NoPriorityCode));
        assert_eq!(
            Command::parse("add critical Joe"),
            Err(CommandError::UnknownPriorityCode("critical".into()))
        );
        assert_eq!(Command::parse("add urgent"), Err(CommandError::NoPatientName));
        assert_eq!(Command::parse("add urgent   "), Err(CommandError::NoPatientName));
    }

    #[test]
    fn add_rejects_name_with_line_break() {
        assert_eq!(
            Command::parse("add urgent Jo\rhn"),
            Err(CommandError::MultiLineName)
        );
        assert_eq!(
            CommandError::MultiLineName.to_string(),
            "patient name must fit on one line."
        );
    }

    #[test]
    fn change_parses_id_and_code() {
        assert_eq!(
            Command::parse("change 3 immediate"),
            Ok(Command::Change {
                arrival: ArrivalOrder::new(3).unwrap(),
                severity: Severity::Immediate,
            })
        );
    }

    #[test]
    fn change_rejects_bad_ids_and_codes() {
        assert_eq!(Command::parse("change"), Err(CommandError::NoPatientId));
        assert_eq!(Command::parse("change 0 urgent"), Err(CommandError::NoPatientId));
        assert_eq!(Command::parse("change x urgent"), Err(CommandError::NoPatientId));
        assert_eq!(Command::parse("change 2"), Err(CommandError::NoPriorityCode));
        assert_eq!(
            Command::parse("change 2 soon"),
            Err(CommandError::UnknownPriorityCode("soon".into()))
        );
    }

    #[test]
    fn change_rejects_trailing_text() {
        let err = Command::parse("change 1 routine please").unwrap_err();

        assert_eq!(
            err,
            CommandError::TrailingArguments {
                command: "change",
                extra: "please".into(),
            }
        );
        assert_eq!(err.to_string(), "unexpected text after change: please");
    }

    #[test]
    fn file_commands_need_a_name() {
        assert_eq!(
            Command::parse("save waiting room.txt"),
            Ok(Command::Save {
                file: "waiting room.txt".into()
            })
        );
        assert_eq!(Command::parse("load "), Err(CommandError::NoFileName));
    }

    #[test]
    fn bare_words_and_noise() {
        assert_eq!(Command::parse("peek"), Ok(Command::Peek));
        assert_eq!(Command::parse("next\r"), Ok(Command::Next));
        assert_eq!(Command::parse("   "), Err(CommandError::NoCommand));
        assert_eq!(
            Command::parse("discharge Bob"),
            Err(CommandError::Unrecognised("discharge".into()))
        );
    }
}
