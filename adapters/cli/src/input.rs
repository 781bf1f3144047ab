//! Line-command parsing for the interactive prompt.

use std::{num::ParseIntError, time::Duration};

use thiserror::Error;
use track_builder_core::CellCoord;

/// Help text listing every accepted command.
pub(crate) const HELP: &str = "\
commands:
  place <col> <row>  place the current piece on a cell
  store              move the current piece into storage
  swap               exchange the current and stored pieces
  wait <seconds>     let time pass
  go                 end the build phase and start the train
  run                tick until the round concludes
  new                start a new game
  next               advance to the next level after a win
  help               show this message
  quit               leave the game";

/// Command entered at the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Place(CellCoord),
    Store,
    Swap,
    Wait(Duration),
    Go,
    Run,
    New,
    Next,
    Help,
    Quit,
}

/// Reasons a prompt line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("empty line")]
    Empty,
    #[error("unknown command `{0}`; type `help` for a list")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{command}` takes no argument `{extra}`")]
    UnexpectedArgument { command: &'static str, extra: String },
    #[error("`{value}` is not a valid cell index: {source}")]
    InvalidIndex {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("`{0}` is not a valid number of seconds")]
    InvalidDuration(String),
}

/// Parses one prompt line into an [`Input`].
pub(crate) fn parse(line: &str) -> Result<Input, InputError> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Err(InputError::Empty);
    };

    let input = match keyword.to_ascii_lowercase().as_str() {
        "place" | "p" => {
            let column = index(words.next(), "place")?;
            let row = index(words.next(), "place")?;
            Input::Place(CellCoord::new(column, row))
        }
        "wait" | "w" => {
            let Some(value) = words.next() else {
                return Err(InputError::MissingArgument {
                    command: "wait",
                    expected: "a number of seconds",
                });
            };
            Input::Wait(seconds(value)?)
        }
        "store" | "s" => Input::Store,
        "swap" | "x" => Input::Swap,
        "go" | "g" => Input::Go,
        "run" | "r" => Input::Run,
        "new" => Input::New,
        "next" | "n" => Input::Next,
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => return Err(InputError::UnknownCommand(other.to_owned())),
    };

    if let Some(extra) = words.next() {
        return Err(InputError::UnexpectedArgument {
            command: name(input),
            extra: extra.to_owned(),
        });
    }

    Ok(input)
}

fn index(word: Option<&str>, command: &'static str) -> Result<u32, InputError> {
    let value = word.ok_or(InputError::MissingArgument {
        command,
        expected: "a column and a row",
    })?;
    value.parse().map_err(|source| InputError::InvalidIndex {
        value: value.to_owned(),
        source,
    })
}

fn seconds(value: &str) -> Result<Duration, InputError> {
    value
        .parse::<f64>()
        .ok()
        .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
        .ok_or_else(|| InputError::InvalidDuration(value.to_owned()))
}

const fn name(input: Input) -> &'static str {
    match input {
        Input::Place(_) => "place",
        Input::Store => "store",
        Input::Swap => "swap",
        Input::Wait(_) => "wait",
        Input::Go => "go",
        Input::Run => "run",
        Input::New => "new",
        Input::Next => "next",
        Input::Help => "help",
        Input::Quit => "quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placement() {
        assert_eq!(
            parse("place 3 4"),
            Ok(Input::Place(CellCoord::new(3, 4)))
        );
        assert_eq!(parse("  P 0 11 "), Ok(Input::Place(CellCoord::new(0, 11))));
    }

    #[test]
    fn parses_keywords_case_insensitively() {
        assert_eq!(parse("GO"), Ok(Input::Go));
        assert_eq!(parse("Store"), Ok(Input::Store));
        assert_eq!(parse("q"), Ok(Input::Quit));
    }

    #[test]
    fn parses_fractional_wait() {
        assert_eq!(parse("wait 1.5"), Ok(Input::Wait(Duration::from_millis(1_500))));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse("   "), Err(InputError::Empty));
        assert_eq!(
            parse("jump"),
            Err(InputError::UnknownCommand("jump".to_owned()))
        );
        assert_eq!(
            parse("place 3"),
            Err(InputError::MissingArgument {
                command: "place",
                expected: "a column and a row",
            })
        );
        assert!(matches!(
            parse("place -1 2"),
            Err(InputError::InvalidIndex { value, .. }) if value == "-1"
        ));
        assert_eq!(
            parse("wait -2"),
            Err(InputError::InvalidDuration("-2".to_owned()))
        );
        assert_eq!(
            parse("go now"),
            Err(InputError::UnexpectedArgument {
                command: "go",
                extra: "now".to_owned(),
            })
        );
    }

    #[test]
    fn errors_read_as_sentences() {
        let error = parse("wait").unwrap_err();
        assert_eq!(error.to_string(), "`wait` expects a number of seconds");
    }
}
