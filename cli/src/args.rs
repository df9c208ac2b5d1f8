use std::path::PathBuf;

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: truernd <COMMAND> [OPTIONS]

Commands:
  probe [--json]             Report architecture and hardware RNG support
  selftest [--config FILE]   Run the hardware RNG test suite
  stream [--limit BYTES]     Write hardware random bytes to stdout

Examples:
  truernd stream | dieharder -a -g 200
  truernd stream --limit 1048576 > sample.bin

Logging is controlled by RUST_LOG (default: warn).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Probe { json: bool },
    SelfTest { config: Option<PathBuf> },
    Stream { limit: Option<u64> },
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "probe" => {
            let mut json = false;
            for arg in args {
                match arg.as_str() {
                    "--json" => json = true,
                    other => return Err(unexpected(other)),
                }
            }
            Ok(Command::Probe { json })
        }
        "selftest" => {
            let mut config = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "-c" | "--config" => config = Some(PathBuf::from(value(&arg, args.next())?)),
                    other => return Err(unexpected(other)),
                }
            }
            Ok(Command::SelfTest { config })
        }
        "stream" => {
            let mut limit = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "-n" | "--limit" => {
                        let raw = value(&arg, args.next())?;
                        let bytes = raw.parse::<u64>().map_err(|_| {
                            CliError::Usage(format!("--limit expects a byte count, got '{raw}'"))
                        })?;
                        limit = Some(bytes);
                    }
                    other => return Err(unexpected(other)),
                }
            }
            Ok(Command::Stream { limit })
        }
        other => Err(CliError::Usage(format!("unknown command '{other}'"))),
    }
}

fn value(flag: &str, next: Option<String>) -> Result<String, CliError> {
    next.ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
}

fn unexpected(arg: &str) -> CliError {
    CliError::Usage(format!("unexpected argument '{arg}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> Result<Command, CliError> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_is_help() {
        assert_eq!(parse_strs(&[]).unwrap(), Command::Help);
        assert_eq!(parse_strs(&["--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn probe_flags() {
        assert_eq!(parse_strs(&["probe"]).unwrap(), Command::Probe { json: false });
        assert_eq!(
            parse_strs(&["probe", "--json"]).unwrap(),
            Command::Probe { json: true }
        );
    }

    #[test]
    fn selftest_config() {
        assert_eq!(
            parse_strs(&["selftest", "--config", "suite.yaml"]).unwrap(),
            Command::SelfTest {
                config: Some(PathBuf::from("suite.yaml"))
            }
        );
        assert!(matches!(
            parse_strs(&["selftest", "--config"]),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn stream_limit() {
        assert_eq!(
            parse_strs(&["stream", "-n", "4096"]).unwrap(),
            Command::Stream { limit: Some(4096) }
        );
        assert!(parse_strs(&["stream", "--limit", "lots"]).is_err());
    }

    #[test]
    fn unknown_input_is_usage_error() {
        let err = parse_strs(&["entropy"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(parse_strs(&["probe", "--yaml"]).is_err());
    }
}
