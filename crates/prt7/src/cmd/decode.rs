use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use prt7_frame::{DecodeSession, LineConfig, LineReader, StopPolicy};
use prt7_transport::{DeviceStream, SerialConfig, SerialDevice};
use tracing::{info, warn};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_summary, DecodeSummary, OutputFormat};

// How often an idle source wakes the loop to look at the Ctrl-C flag.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.max_line == 0 {
        return Err(CliError::new(USAGE, "--max-line must be greater than zero"));
    }

    let mut stream = open_source(&args)?;
    let source = stream.kind().as_str();
    if let Err(err) = stream.set_read_timeout(Some(CANCEL_POLL_INTERVAL)) {
        warn!(error = %err, "read timeout unavailable, Ctrl-C waits for the next line");
    }

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let config = LineConfig {
        max_line_length: args.max_line,
    };
    let policy = StopPolicy {
        max_lines: args.count,
    };
    let mut reader = LineReader::with_config(stream, config);
    let mut session = DecodeSession::new();

    info!(source, limit = ?args.count, "waiting for frames");
    let reason = session
        .run(&mut reader, &policy, || running.load(Ordering::SeqCst))
        .map_err(|err| frame_error("read failed", err))?;

    info!(
        stop = reason.as_str(),
        lines = session.stats().lines_received,
        "data stream finished"
    );
    print_summary(&DecodeSummary::from_session(&session, reason, source), format);
    Ok(SUCCESS)
}

fn open_source(args: &DecodeArgs) -> CliResult<DeviceStream> {
    if let Some(port) = &args.port {
        let config = SerialConfig::with_baud_rate(args.baud);
        return SerialDevice::open(port, &config)
            .map_err(|err| transport_error("serial open failed", err));
    }
    if let Some(path) = &args.input {
        return prt7_transport::open_file(path)
            .map_err(|err| transport_error("input open failed", err));
    }
    prt7_transport::stdin().map_err(|err| transport_error("stdin unavailable", err))
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
