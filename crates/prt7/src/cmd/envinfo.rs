use std::collections::BTreeMap;

use prt7_frame::{ALPHABET, DEFAULT_MAX_LINE, ROTOR_SIZE};
use prt7_transport::{DEFAULT_BAUD_RATE, SUPPORTED_BAUD_RATES};
use serde::Serialize;

use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct PlatformInfo {
    os: String,
    arch: String,
    serial_supported: bool,
}

#[derive(Serialize)]
struct DecoderInfo {
    rotor_size: usize,
    alphabet: String,
    default_baud_rate: u32,
    supported_baud_rates: Vec<u32>,
    default_max_line: usize,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    version: String,
    target: String,
    platform: PlatformInfo,
    decoder: DecoderInfo,
    features: Vec<String>,
    environment: BTreeMap<String, Option<String>>,
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let mut env = BTreeMap::new();
    for key in ["PRT7_PORT", "PRT7_BAUD", "PRT7_LOG_LEVEL", crate::logging::LOG_FILTER_ENV] {
        env.insert(key.to_string(), std::env::var(key).ok());
    }

    let output = EnvInfoOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        target: target_triple(),
        platform: PlatformInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            serial_supported: cfg!(unix),
        },
        decoder: DecoderInfo {
            rotor_size: ROTOR_SIZE,
            alphabet: ALPHABET.iter().collect(),
            default_baud_rate: DEFAULT_BAUD_RATE,
            supported_baud_rates: SUPPORTED_BAUD_RATES.to_vec(),
            default_max_line: DEFAULT_MAX_LINE,
        },
        features: active_features(),
        environment: env,
    };

    print_envinfo(&output, format);
    Ok(SUCCESS)
}

pub(crate) fn target_triple() -> String {
    if let Some(target) = option_env!("PRT7_BUILD_TARGET") {
        return target.to_string();
    }

    match (std::env::consts::ARCH, std::env::consts::OS) {
        ("aarch64", "macos") => "aarch64-apple-darwin".to_string(),
        ("x86_64", "macos") => "x86_64-apple-darwin".to_string(),
        ("aarch64", "linux") => "aarch64-unknown-linux-gnu".to_string(),
        ("x86_64", "linux") => "x86_64-unknown-linux-gnu".to_string(),
        (arch, os) => format!("{arch}-unknown-{os}"),
    }
}

fn print_envinfo(output: &EnvInfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("prt7 environment\n");
            println!("  Version:    {}", output.version);
            println!("  Target:     {}", output.target);
            println!(
                "  Platform:   {} ({}), serial={}",
                output.platform.os, output.platform.arch, output.platform.serial_supported
            );
            println!("  Features:   {}", output.features.join(", "));
            println!("\n  Decoder:");
            println!("    rotor size   {}", output.decoder.rotor_size);
            println!("    alphabet     {:?}", output.decoder.alphabet);
            println!("    default baud {}", output.decoder.default_baud_rate);
            println!("    max line     {}", output.decoder.default_max_line);
            println!("\n  Environment:");
            for (k, v) in &output.environment {
                println!("    {:<20} {}", k, v.as_deref().unwrap_or("(not set)"));
            }
        }
        OutputFormat::Raw => println!("{}", output.version),
    }
}

pub(crate) fn active_features() -> Vec<String> {
    let mut features = Vec::new();
    if cfg!(feature = "async") {
        features.push("async".to_string());
    }
    if cfg!(feature = "cli") {
        features.push("cli".to_string());
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_looks_like_triple() {
        let target = target_triple();
        assert!(target.split('-').count() >= 3);
    }

    #[test]
    fn decoder_section_serializes_alphabet() {
        let info = DecoderInfo {
            rotor_size: ROTOR_SIZE,
            alphabet: ALPHABET.iter().collect(),
            default_baud_rate: DEFAULT_BAUD_RATE,
            supported_baud_rates: SUPPORTED_BAUD_RATES.to_vec(),
            default_max_line: DEFAULT_MAX_LINE,
        };

        let json = serde_json::to_value(&info).expect("decoder info should serialize");
        assert_eq!(json["rotor_size"], 27);
        assert_eq!(json["alphabet"], "ABCDEFGHIJKLMNOPQRSTUVWXYZ ");
    }
}
