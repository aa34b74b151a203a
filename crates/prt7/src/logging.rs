use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Full filter directives, `RUST_LOG` syntax. Overrides `--log-level`.
pub const LOG_FILTER_ENV: &str = "PRT7_LOG";

/// Crates whose events `--log-level` controls. Everything else stays at `warn`.
const DECODER_TARGETS: [&str; 3] = ["prt7", "prt7_frame", "prt7_transport"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Verbosity of the decoder's own events.
///
/// `info` reports session start and stop, `warn` rejected lines. `debug` adds
/// every received line, decoded character and rotor movement; `trace` adds a
/// full rotor dump after each rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn shows_targets(self) -> bool {
        matches!(self, LogLevel::Debug | LogLevel::Trace)
    }
}

/// `warn` globally, `level` for the decoder crates.
pub fn default_directives(level: LogLevel) -> String {
    DECODER_TARGETS
        .iter()
        .fold(String::from("warn"), |mut directives, target| {
            directives.push_str(&format!(",{target}={}", level.as_str()));
            directives
        })
}

fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Install the stderr subscriber. Stdout stays reserved for command output.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(level))
        .with_ansi(false)
        .with_target(level.shows_targets());

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
