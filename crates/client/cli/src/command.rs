//! Parsing of console lines into commands.
//!
//! One command per line, whitespace separated. Parsing never touches the
//! game service so it can be tested on its own.

use std::path::PathBuf;

use hunt_core::SurveyAnswer;
use hunt_runtime::ConfigKey;
use thiserror::Error;

/// Entries shown by `recent` when no count is given.
pub const DEFAULT_RECENT: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Look a badge up in the directory.
    Badge { code: String },
    Register {
        token: String,
        code: String,
        answers: Vec<SurveyAnswer>,
    },
    Scan { token: String, code: String },
    Clue { token: String },
    History { player_id: String },
    Recent { limit: usize },
    Board,
    Logout { token: String },
    /// Replace one kind of configuration from a RON file.
    Import { key: ConfigKey, path: PathBuf },
    /// Drop cached configuration so the next request reads the store.
    Reload,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not an answer, expected <question>=yes|no|-")]
    BadAnswer(String),

    #[error("'{0}' is not a configuration kind, expected levels, survey or directory")]
    BadKind(String),
}

pub const HELP: &str = "\
commands:
  badge <code>                          look up a badge
  register <token> <code> [q=yes|no|-]  register or re-register a session
  scan <token> <code>                   scan a code as the session's player
  clue <token>                          show the session's current clue
  history <player>                      scans by one player, oldest first
  recent [n]                            latest scans across all players
  board                                 players by progress
  logout <token>                        end a session
  import <levels|survey|directory> <file.ron>
  reload                                drop cached configuration
  help
  quit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("badge", [code]) => Command::Badge {
            code: code.to_string(),
        },
        ("badge", _) => return Err(CommandError::Usage("badge <code>")),

        ("register", [token, code, answers @ ..]) => Command::Register {
            token: token.to_string(),
            code: code.to_string(),
            answers: answers
                .iter()
                .map(|raw| parse_answer(raw))
                .collect::<Result<_, _>>()?,
        },
        ("register", _) => {
            return Err(CommandError::Usage(
                "register <token> <code> [q=yes|no|-]...",
            ));
        }

        ("scan", [token, code]) => Command::Scan {
            token: token.to_string(),
            code: code.to_string(),
        },
        ("scan", _) => return Err(CommandError::Usage("scan <token> <code>")),

        ("clue", [token]) => Command::Clue {
            token: token.to_string(),
        },
        ("clue", _) => return Err(CommandError::Usage("clue <token>")),

        ("history", [player_id]) => Command::History {
            player_id: player_id.to_string(),
        },
        ("history", _) => return Err(CommandError::Usage("history <player>")),

        ("recent", []) => Command::Recent {
            limit: DEFAULT_RECENT,
        },
        ("recent", [limit]) => Command::Recent {
            limit: limit
                .parse()
                .map_err(|_| CommandError::Usage("recent [n]"))?,
        },
        ("recent", _) => return Err(CommandError::Usage("recent [n]")),

        ("board", []) => Command::Board,
        ("board", _) => return Err(CommandError::Usage("board")),

        ("logout", [token]) => Command::Logout {
            token: token.to_string(),
        },
        ("logout", _) => return Err(CommandError::Usage("logout <token>")),

        ("import", [kind, path]) => Command::Import {
            key: kind
                .parse()
                .map_err(|_| CommandError::BadKind(kind.to_string()))?,
            path: PathBuf::from(path),
        },
        ("import", _) => {
            return Err(CommandError::Usage(
                "import <levels|survey|directory> <file.ron>",
            ));
        }

        ("reload", _) => Command::Reload,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };

    Ok(Some(command))
}

/// `3=yes`, `3=no` or `3=-` (left blank).
fn parse_answer(raw: &str) -> Result<SurveyAnswer, CommandError> {
    let bad = || CommandError::BadAnswer(raw.to_string());
    let (question, value) = raw.split_once('=').ok_or_else(bad)?;
    let question_id = question.parse().map_err(|_| bad())?;
    let answer = match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Some(true),
        "no" | "n" | "false" => Some(false),
        "-" | "" => None,
        _ => return Err(bad()),
    };
    Ok(SurveyAnswer::new(question_id, answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn register_with_answers() {
        let command = parse("register tok qr-1 1=yes 2=no 3=-").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Register {
                token: "tok".into(),
                code: "qr-1".into(),
                answers: vec![
                    SurveyAnswer::new(1, Some(true)),
                    SurveyAnswer::new(2, Some(false)),
                    SurveyAnswer::new(3, None),
                ],
            }
        );
    }

    #[test]
    fn bad_answers_are_rejected() {
        assert_eq!(
            parse("register tok qr-1 1=maybe"),
            Err(CommandError::BadAnswer("1=maybe".into()))
        );
        assert_eq!(
            parse("register tok qr-1 one=yes"),
            Err(CommandError::BadAnswer("one=yes".into()))
        );
    }

    #[test]
    fn recent_defaults_its_limit() {
        assert_eq!(
            parse("recent").unwrap(),
            Some(Command::Recent {
                limit: DEFAULT_RECENT
            })
        );
        assert_eq!(parse("RECENT 3").unwrap(), Some(Command::Recent { limit: 3 }));
        assert!(matches!(parse("recent lots"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn import_accepts_both_level_names() {
        for kind in ["levels", "questions"] {
            let command = parse(&format!("import {kind} hunt.ron")).unwrap().unwrap();
            assert_eq!(
                command,
                Command::Import {
                    key: ConfigKey::Questions,
                    path: PathBuf::from("hunt.ron"),
                }
            );
        }
        assert_eq!(
            parse("import players p.ron"),
            Err(CommandError::BadKind("players".into()))
        );
    }

    #[test]
    fn wrong_arity_and_unknown_commands() {
        assert!(matches!(parse("scan tok"), Err(CommandError::Usage(_))));
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
    }
}
