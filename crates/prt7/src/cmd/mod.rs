use clap::{Args, Subcommand};
use std::path::PathBuf;

use prt7_frame::DEFAULT_MAX_LINE;
use prt7_transport::DEFAULT_BAUD_RATE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod envinfo;
pub mod parse;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a transmission from a serial port, file, or stdin.
    Decode(DecodeArgs),
    /// Parse frame lines and show how they would be interpreted.
    Parse(ParseArgs),
    /// Print a frame script that decodes to the given text.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Parse(args) => parse::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Serial device to read from (e.g. /dev/ttyUSB0).
    #[arg(long, env = "PRT7_PORT", conflicts_with = "input")]
    pub port: Option<PathBuf>,
    /// Capture file to read from. Default: stdin.
    #[arg(long, conflicts_with = "port")]
    pub input: Option<PathBuf>,
    /// Serial baud rate.
    #[arg(long, env = "PRT7_BAUD", default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Stop after N received lines. Default: until end of stream.
    #[arg(long)]
    pub count: Option<usize>,
    /// Longest accepted line in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_LINE)]
    pub max_line: usize,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Frame lines to parse (e.g. "L,H" "M,-2").
    #[arg(required = true, allow_hyphen_values = true)]
    pub lines: Vec<String>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Text the script should decode to.
    pub text: String,
    /// Rotations to emit before each character, cycled (comma-separated).
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub rotate: Vec<i64>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
