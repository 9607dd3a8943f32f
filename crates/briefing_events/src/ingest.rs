use std::io::BufRead;

use serde_json::error::Category;
use tracing::warn;

use crate::config::{CaptureRaw, IngestConfig};
use crate::error::{DecodeErrorCode, LineRecord, LineRecordError};
use crate::raw::RawAgentEvent;
use crate::reader::{BoundedLine, BoundedLineReader};

/// Decodes a newline-delimited stream of raw agent events.
///
/// Blank lines are skipped. Every other line yields one [`LineRecord`]; a
/// line that cannot be decoded is reported without stopping iteration.
/// Admission is not applied here: heartbeats decode like any other frame.
pub struct EventIngestor<R: BufRead> {
    reader: BoundedLineReader<R>,
    config: IngestConfig,
}

impl<R: BufRead> EventIngestor<R> {
    pub fn new(reader: R, config: IngestConfig) -> Self {
        Self {
            reader: BoundedLineReader::new(reader, config.limits.max_line_bytes),
            config,
        }
    }

    fn failed(line_number: usize, err: LineRecordError) -> LineRecord<RawAgentEvent> {
        LineRecord {
            line_number,
            captured_raw: None,
            outcome: Err(err),
        }
    }

    fn decode(&self, line_number: usize, line: &str) -> LineRecord<RawAgentEvent> {
        let captured_raw = match self.config.capture_raw {
            CaptureRaw::None => None,
            CaptureRaw::Line => Some(line.to_string()),
        };
        let outcome = serde_json::from_str::<RawAgentEvent>(line).map_err(|err| {
            let code = match err.classify() {
                Category::Data => DecodeErrorCode::Shape,
                Category::Io | Category::Syntax | Category::Eof => DecodeErrorCode::JsonParse,
            };
            // Only position information is logged; the line itself may carry
            // agent output.
            warn!(line_number, ?code, column = err.column(), "undecodable agent event line");
            LineRecordError::Decode {
                code,
                summary: format!("{code:?} error at column {}", err.column()),
            }
        });
        LineRecord {
            line_number,
            captured_raw,
            outcome,
        }
    }
}

impl<R: BufRead> Iterator for EventIngestor<R> {
    type Item = LineRecord<RawAgentEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.next()? {
                BoundedLine::IoError { line_number } => {
                    return Some(Self::failed(line_number, LineRecordError::Io));
                }
                BoundedLine::LineTooLong {
                    line_number,
                    observed_bytes,
                    max_line_bytes,
                } => {
                    return Some(Self::failed(
                        line_number,
                        LineRecordError::LineTooLong {
                            observed_bytes,
                            max_line_bytes,
                        },
                    ));
                }
                BoundedLine::Line { line_number, bytes } => {
                    let Ok(text) = String::from_utf8(bytes) else {
                        return Some(Self::failed(line_number, LineRecordError::InvalidUtf8));
                    };
                    let line = text.strip_suffix('\r').unwrap_or(&text);
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(self.decode(line_number, line));
                }
            }
        }
    }
}
