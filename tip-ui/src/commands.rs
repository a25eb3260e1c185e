//! Line commands understood by the terminal screen.
//!
//! | Command            | Effect                               |
//! |--------------------|--------------------------------------|
//! | `bill <text>`      | Types `<text>` into the bill field   |
//! | `tip none`         | Clears the tip selection             |
//! | `tip 10\|15\|20`   | Selects a percentage tip             |
//! | `tip custom <n>`   | Enters a custom flat tip             |
//! | `split +` / `-`    | Adds or removes a person             |
//! | `logo`             | Taps the logo (reset)                |
//! | `wait <ms>`        | Lets the screen run for `<ms>`       |
//! | `log <filter>`     | Changes the log filter               |
//! | `help`             | Shows this list                      |
//! | `quit`             | Leaves                               |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tip_core::Tip;

pub const USAGE: &str = "commands: bill <amount> | tip none|10|15|20 | tip custom <n> | split +|- | logo | wait <ms> | log <filter> | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bill(String),
    Tip(Tip),
    CustomTip(String),
    SplitUp,
    SplitDown,
    Logo,
    Wait(Duration),
    LogLevel(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{command}' does not accept '{value}'")]
    InvalidArgument {
        command: &'static str,
        value: String,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name.to_ascii_lowercase().as_str() {
            "bill" => Ok(Command::Bill(rest.to_string())),
            "tip" => parse_tip(rest),
            "split" => match rest {
                "+" => Ok(Command::SplitUp),
                "-" => Ok(Command::SplitDown),
                "" => Err(CommandError::MissingArgument {
                    command: "split",
                    expected: "'+' or '-'",
                }),
                other => Err(CommandError::InvalidArgument {
                    command: "split",
                    value: other.to_string(),
                }),
            },
            "logo" => Ok(Command::Logo),
            "wait" => rest
                .parse::<u64>()
                .map(|ms| Command::Wait(Duration::from_millis(ms)))
                .map_err(|_| CommandError::InvalidArgument {
                    command: "wait",
                    value: rest.to_string(),
                }),
            "log" if rest.is_empty() => Err(CommandError::MissingArgument {
                command: "log",
                expected: "a level or filter",
            }),
            "log" => Ok(Command::LogLevel(rest.to_string())),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_tip(rest: &str) -> Result<Command, CommandError> {
    let (kind, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    match kind.trim_end_matches('%') {
        "none" | "0" => Ok(Command::Tip(Tip::None)),
        "10" => Ok(Command::Tip(Tip::TenPercent)),
        "15" => Ok(Command::Tip(Tip::FifteenPercent)),
        "20" => Ok(Command::Tip(Tip::TwentyPercent)),
        "custom" => Ok(Command::CustomTip(value.trim().to_string())),
        "" => Err(CommandError::MissingArgument {
            command: "tip",
            expected: "none, 10, 15, 20 or custom <n>",
        }),
        other => Err(CommandError::InvalidArgument {
            command: "tip",
            value: other.to_string(),
        }),
    }
}
