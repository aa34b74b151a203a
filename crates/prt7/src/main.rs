mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "prt7", version, about = "PRT-7 rotor-cipher decoder")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level for decoder events (stderr). `PRT7_LOG` takes full
    /// filter directives and overrides this.
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        env = "PRT7_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::try_parse_from([
            "prt7",
            "decode",
            "--port",
            "/dev/ttyUSB0",
            "--baud",
            "9600",
            "--count",
            "50",
        ])
        .expect("decode args should parse");

        match cli.command {
            Command::Decode(args) => {
                assert_eq!(args.count, Some(50));
                assert_eq!(args.baud, 9600);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_conflicting_sources() {
        let err = Cli::try_parse_from([
            "prt7",
            "decode",
            "--port",
            "/dev/ttyUSB0",
            "--input",
            "capture.txt",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_negative_rotations_for_encode() {
        let cli = Cli::try_parse_from(["prt7", "encode", "HOLA", "--rotate", "3,-1"])
            .expect("encode args should parse");

        match cli.command {
            Command::Encode(args) => assert_eq!(args.rotate, vec![3, -1]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_requires_a_line() {
        let err = Cli::try_parse_from(["prt7", "parse"]).expect_err("missing lines should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
