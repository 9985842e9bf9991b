//! Command-line argument parsing for chatline.

use thiserror::Error;

pub const USAGE: &str = "\
Usage:
  chatline [--conversation <id>] <message...>   send a message and stream the reply
  chatline --list [--offset <n>]                list conversations
  chatline --history <id>                       print a conversation
  chatline --version                            print the version";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// List conversations starting at `offset`
    List { offset: u32 },
    /// Print the stored history of one conversation
    History { conversation_id: String },
    /// Send a message, optionally into an existing conversation
    Send {
        conversation_id: Option<String>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: String },
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown option: {0}")]
    UnknownFlag(String),
    #[error("no message given")]
    EmptyMessage,
}

/// Parse command-line arguments, including the program name.
///
/// ```
/// use chatline::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatline".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut conversation_id = None;
    let mut list = false;
    let mut offset = 0u32;
    let mut words: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--list" | "-l" => list = true,
            "--history" => {
                let conversation_id = required_value(&mut args, &arg)?;
                return Ok(CliCommand::History { conversation_id });
            }
            "--conversation" | "-c" => {
                conversation_id = Some(required_value(&mut args, &arg)?);
            }
            "--offset" => {
                let value = required_value(&mut args, &arg)?;
                offset = value.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: arg.clone(),
                    value,
                })?;
            }
            "--" => {
                words.extend(args.by_ref());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgsError::UnknownFlag(flag.to_string()));
            }
            _ => words.push(arg),
        }
    }

    if list {
        return Ok(CliCommand::List { offset });
    }

    let message = words.join(" ");
    if message.trim().is_empty() {
        if conversation_id.is_none() {
            return Ok(CliCommand::Help);
        }
        return Err(ArgsError::EmptyMessage);
    }

    Ok(CliCommand::Send {
        conversation_id,
        message,
    })
}

fn required_value<I>(args: &mut I, flag: &str) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ArgsError::MissingValue {
            flag: flag.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut all = vec!["chatline".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_no_args_is_help() {
        assert_eq!(parse(&[]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_send_joins_words() {
        assert_eq!(
            parse(&["what", "is", "rust?"]),
            Ok(CliCommand::Send {
                conversation_id: None,
                message: "what is rust?".to_string()
            })
        );
    }

    #[test]
    fn test_parse_send_into_conversation() {
        assert_eq!(
            parse(&["--conversation", "c1", "hello"]),
            Ok(CliCommand::Send {
                conversation_id: Some("c1".to_string()),
                message: "hello".to_string()
            })
        );
    }

    #[test]
    fn test_double_dash_allows_leading_dash() {
        assert_eq!(
            parse(&["--", "-1", "is", "negative"]),
            Ok(CliCommand::Send {
                conversation_id: None,
                message: "-1 is negative".to_string()
            })
        );
    }

    #[test]
    fn test_parse_list_with_offset() {
        assert_eq!(parse(&["--list"]), Ok(CliCommand::List { offset: 0 }));
        assert_eq!(
            parse(&["--list", "--offset", "40"]),
            Ok(CliCommand::List { offset: 40 })
        );
        assert!(matches!(
            parse(&["--list", "--offset", "x"]),
            Err(ArgsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_history() {
        assert_eq!(
            parse(&["--history", "c9"]),
            Ok(CliCommand::History {
                conversation_id: "c9".to_string()
            })
        );
        assert_eq!(
            parse(&["--history"]),
            Err(ArgsError::MissingValue {
                flag: "--history".to_string()
            })
        );
    }

    #[test]
    fn test_conversation_without_message() {
        assert_eq!(
            parse(&["--conversation", "c1"]),
            Err(ArgsError::EmptyMessage)
        );
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(
            parse(&["--verbose"]),
            Err(ArgsError::UnknownFlag("--verbose".to_string()))
        );
    }
}
