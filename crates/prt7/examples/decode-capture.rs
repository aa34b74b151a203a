//! Decode a captured transmission.
//!
//! Usage:
//!   cargo run -p prt7 --example decode-capture [capture.txt]
//!
//! Without an argument a built-in capture is decoded.

use std::io::Cursor;

use prt7::frame::{DecodeSession, LineReader, StopPolicy};

const SAMPLE: &str = "L,H\nL,O\nL,L\nL,A\nL,Space\nM,2\nL,K\nL,S\nL,L\nL,C\nL,M\nL,B\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = DecodeSession::new();

    let reason = match std::env::args().nth(1) {
        Some(path) => {
            let mut reader = LineReader::new(prt7::transport::open_file(&path)?);
            session.run(&mut reader, &StopPolicy::default(), || true)?
        }
        None => {
            let mut reader = LineReader::new(Cursor::new(SAMPLE));
            session.run(&mut reader, &StopPolicy::default(), || true)?
        }
    };

    let stats = session.stats();
    println!(
        "{} lines ({} rejected), stopped: {}",
        stats.lines_received,
        stats.frames_rejected,
        reason.as_str()
    );
    println!("rotor: {}", session.rotor());
    println!("message: {}", session.message());
    Ok(())
}
