//! Async line-to-frame decoding with `tokio_util::codec`.

use bytes::BytesMut;
use futures_util::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::{Decoder, FramedRead};
use tracing::debug;

use crate::error::{FrameError, ParseError, Result};
use crate::frame::Frame;
use crate::line::{LineConfig, LineSplitter};
use crate::parser::parse_frame;
use crate::session::{DecodeSession, StopPolicy, StopReason};

/// One line cut from the stream, together with its parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub line: String,
    pub frame: std::result::Result<Frame, ParseError>,
}

impl ParsedLine {
    fn parse(line: String) -> Self {
        let frame = parse_frame(&line);
        Self { line, frame }
    }
}

/// Items produced by [`LineFrameCodec`].
///
/// Parse failures and oversized lines are items rather than stream errors so
/// a consumer keeps receiving lines after a bad one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Parsed(ParsedLine),
    Oversized { size: usize, max: usize },
}

/// `Decoder` that cuts lines and parses each into a frame.
#[derive(Debug, Default)]
pub struct LineFrameCodec {
    splitter: LineSplitter,
    config: LineConfig,
}

impl LineFrameCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LineConfig) -> Self {
        Self {
            splitter: LineSplitter::new(),
            config,
        }
    }

    fn lift(result: Result<Option<String>>) -> Result<Option<LineEvent>> {
        match result {
            Ok(line) => Ok(line.map(|line| LineEvent::Parsed(ParsedLine::parse(line)))),
            Err(FrameError::LineTooLong { size, max }) => {
                Ok(Some(LineEvent::Oversized { size, max }))
            }
            Err(err) => Err(err),
        }
    }
}

impl Decoder for LineFrameCodec {
    type Item = LineEvent;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        Self::lift(self.splitter.split_line(src, self.config.max_line_length))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        Self::lift(self.splitter.finish(src, self.config.max_line_length))
    }
}

impl DecodeSession {
    /// Async counterpart of [`DecodeSession::run`].
    pub async fn run_async<S, F>(
        &mut self,
        source: S,
        config: LineConfig,
        policy: &StopPolicy,
        mut should_continue: F,
    ) -> Result<StopReason>
    where
        S: AsyncRead + Unpin,
        F: FnMut() -> bool,
    {
        let mut framed = FramedRead::new(source, LineFrameCodec::with_config(config));

        loop {
            if let Some(reason) = self.check_stop(policy, &mut should_continue) {
                return Ok(reason);
            }

            match framed.next().await {
                None => {
                    debug!("line source exhausted");
                    return Ok(StopReason::EndOfStream);
                }
                Some(Err(err)) => return Err(err),
                Some(Ok(LineEvent::Oversized { size, max })) => self.reject_oversized(size, max),
                Some(Ok(LineEvent::Parsed(parsed))) => {
                    debug!(line = %parsed.line.escape_debug(), "frame received");
                    let _ = self.feed_line(&parsed.line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures_util::StreamExt;

    use super::*;
    use crate::error::MalformedReason;

    #[tokio::test]
    async fn framed_read_yields_parsed_lines() {
        let input: &[u8] = b"M,2\r\nL,H\nQ,1\nL,";
        let mut framed = FramedRead::new(input, LineFrameCodec::new());

        let mut events = Vec::new();
        while let Some(event) = framed.next().await {
            events.push(event.unwrap());
        }

        assert_eq!(
            events,
            vec![
                LineEvent::Parsed(ParsedLine {
                    line: "M,2".into(),
                    frame: Ok(Frame::Rotate(2)),
                }),
                LineEvent::Parsed(ParsedLine {
                    line: "L,H".into(),
                    frame: Ok(Frame::Load('H')),
                }),
                LineEvent::Parsed(ParsedLine {
                    line: "Q,1".into(),
                    frame: Err(ParseError::UnknownFrameType('Q')),
                }),
                LineEvent::Parsed(ParsedLine {
                    line: "L,".into(),
                    frame: Err(ParseError::MalformedFrame(MalformedReason::MissingPayload)),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn oversized_line_is_an_item() {
        let input: &[u8] = b"L,ABCDEFGHIJ\nL,A\n";
        let codec = LineFrameCodec::with_config(LineConfig { max_line_length: 4 });
        let mut framed = FramedRead::new(input, codec);

        assert_eq!(
            framed.next().await.unwrap().unwrap(),
            LineEvent::Oversized { size: 12, max: 4 }
        );
        assert!(matches!(
            framed.next().await.unwrap().unwrap(),
            LineEvent::Parsed(ParsedLine { frame: Ok(Frame::Load('A')), .. })
        ));
    }

    #[tokio::test]
    async fn run_async_matches_blocking_run() {
        let input: &[u8] = b"M,2\nL,H\nL,Space\nZ,9\nM,-3\nL,A\n";
        let mut session = DecodeSession::new();

        let reason = session
            .run_async(input, LineConfig::default(), &StopPolicy::default(), || true)
            .await
            .unwrap();

        assert_eq!(reason, StopReason::EndOfStream);
        assert_eq!(session.message(), "JB ");
        assert_eq!(session.stats().frames_rejected, 1);
        assert_eq!(session.rotor().offset(), 26);
    }

    #[tokio::test]
    async fn run_async_respects_limit() {
        let input: &[u8] = b"L,A\nL,B\nL,C\n";
        let mut session = DecodeSession::new();

        let reason = session
            .run_async(input, LineConfig::default(), &StopPolicy::max_lines(2), || true)
            .await
            .unwrap();

        assert_eq!(reason, StopReason::LimitReached);
        assert_eq!(session.message(), "AB");
    }
}
