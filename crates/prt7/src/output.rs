use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use prt7_frame::{DecodeSession, Frame, ParseError, StopReason};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

const EMPTY_MESSAGE: &str = "[empty message]";

#[derive(Debug, Serialize)]
pub struct DecodeSummary {
    pub message: String,
    pub source: &'static str,
    pub stop_reason: &'static str,
    pub lines_received: usize,
    pub frames_applied: usize,
    pub frames_rejected: usize,
    pub loads: usize,
    pub rotations: usize,
    pub final_offset: usize,
    pub rotor_head: char,
}

impl DecodeSummary {
    pub fn from_session(session: &DecodeSession, reason: StopReason, source: &'static str) -> Self {
        let stats = session.stats();
        Self {
            message: session.message(),
            source,
            stop_reason: reason.as_str(),
            lines_received: stats.lines_received,
            frames_applied: stats.frames_applied,
            frames_rejected: stats.frames_rejected,
            loads: stats.loads,
            rotations: stats.rotations,
            final_offset: session.rotor().offset(),
            rotor_head: session.rotor().head(),
        }
    }

    fn display_message(&self) -> &str {
        if self.message.is_empty() {
            EMPTY_MESSAGE
        } else {
            &self.message
        }
    }
}

pub fn print_summary(summary: &DecodeSummary, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MESSAGE", "LINES", "APPLIED", "REJECTED", "OFFSET", "STOP"])
                .add_row(vec![
                    summary.display_message().to_string(),
                    summary.lines_received.to_string(),
                    summary.frames_applied.to_string(),
                    summary.frames_rejected.to_string(),
                    summary.final_offset.to_string(),
                    summary.stop_reason.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("---");
            println!(
                "Data stream finished ({}, {} of {} lines applied).",
                summary.stop_reason, summary.frames_applied, summary.lines_received
            );
            println!("HIDDEN MESSAGE:");
            println!("{}", summary.display_message());
            println!("---");
        }
        OutputFormat::Raw => print_raw(summary.message.as_bytes()),
    }
}

#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub line: String,
    pub ok: bool,
    pub kind: Option<&'static str>,
    pub frame: Option<String>,
    pub error: Option<String>,
}

impl ParseReport {
    pub fn new(line: &str, result: &Result<Frame, ParseError>) -> Self {
        match result {
            Ok(frame) => Self {
                line: line.to_string(),
                ok: true,
                kind: Some(frame.kind()),
                frame: Some(frame.to_string()),
                error: None,
            },
            Err(err) => Self {
                line: line.to_string(),
                ok: false,
                kind: None,
                frame: None,
                error: Some(err.to_string()),
            },
        }
    }

    fn detail(&self) -> &str {
        self.frame
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }
}

pub fn print_parse_reports(reports: &[ParseReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&reports),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["LINE", "RESULT", "DETAIL"]);
            for report in reports {
                table.add_row(vec![
                    format!("{:?}", report.line),
                    report.kind.unwrap_or("ERROR").to_string(),
                    report.detail().to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for report in reports {
                println!(
                    "{:?} -> {} {}",
                    report.line,
                    report.kind.unwrap_or("ERROR"),
                    report.detail()
                );
            }
        }
        OutputFormat::Raw => {
            for report in reports {
                match &report.frame {
                    Some(frame) => println!("{frame}"),
                    None => println!("!{}", report.detail()),
                }
            }
        }
    }
}

pub fn print_script(frames: &[Frame], format: OutputFormat) {
    let lines: Vec<String> = frames.iter().map(ToString::to_string).collect();
    match format {
        OutputFormat::Json => print_json(&lines),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "FRAME", "KIND"]);
            for (index, (frame, line)) in frames.iter().zip(&lines).enumerate() {
                table.add_row(vec![index.to_string(), line.clone(), frame.kind().to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for line in &lines {
                println!("{line}");
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use prt7_frame::MalformedReason;

    #[test]
    fn parse_report_for_frame() {
        let report = ParseReport::new("L,Space", &Ok(Frame::Load(' ')));
        assert!(report.ok);
        assert_eq!(report.kind, Some("LOAD"));
        assert_eq!(report.detail(), "L,Space");
    }

    #[test]
    fn parse_report_for_error() {
        let report = ParseReport::new(
            "M,",
            &Err(ParseError::MalformedFrame(MalformedReason::MissingValue)),
        );
        assert!(!report.ok);
        assert_eq!(report.kind, None);
        assert_eq!(report.detail(), "malformed frame: missing value");
    }

    #[test]
    fn summary_serializes_counters() {
        let mut session = DecodeSession::new();
        let _ = session.feed_line("M,2");
        let _ = session.feed_line("L,H");
        let _ = session.feed_line("nope");

        let summary = DecodeSummary::from_session(&session, StopReason::EndOfStream, "stdin");
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["message"], "J");
        assert_eq!(json["frames_rejected"], 1);
        assert_eq!(json["final_offset"], 2);
        assert_eq!(json["rotor_head"], "C");
        assert_eq!(json["stop_reason"], "end_of_stream");
    }

    #[test]
    fn empty_message_placeholder() {
        let session = DecodeSession::new();
        let summary = DecodeSummary::from_session(&session, StopReason::Cancelled, "serial");
        assert_eq!(summary.display_message(), "[empty message]");
    }
}
