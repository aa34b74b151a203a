use prt7_frame::{ALPHABET, DEFAULT_MAX_LINE, LOAD_TAG, ROTATE_TAG, ROTOR_SIZE, SPACE_TOKEN};
use prt7_transport::{DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES};

use crate::cmd::envinfo::{active_features, target_triple};
use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("prt7 {}", env!("CARGO_PKG_VERSION"));
    if args.extended {
        for (key, value) in extended_fields() {
            println!("{key}: {value}");
        }
    }
    Ok(SUCCESS)
}

/// What this build decodes and which sources it can read.
fn extended_fields() -> Vec<(&'static str, String)> {
    let alphabet: String = ALPHABET.iter().collect();
    let frames = format!("{LOAD_TAG},<char> {LOAD_TAG},{SPACE_TOKEN} {ROTATE_TAG},<signed int>");
    let rates: Vec<String> = SUPPORTED_BAUD_RATES.iter().map(u32::to_string).collect();

    vec![
        ("target", target_triple()),
        ("rotor", format!("{ROTOR_SIZE} symbols {alphabet:?}")),
        ("frames", frames),
        ("max_line", DEFAULT_MAX_LINE.to_string()),
        ("transports", transports().join(", ")),
        ("baud_rates", format!("{} (default {DEFAULT_BAUD_RATE})", rates.join(" "))),
        ("features", active_features().join(", ")),
    ]
}

fn transports() -> Vec<&'static str> {
    let mut transports = Vec::new();
    if cfg!(unix) {
        transports.push("serial (termios 8N1, cancellable reads)");
    }
    transports.push("file");
    transports.push("stdin");
    transports
}
