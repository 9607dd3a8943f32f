use thiserror::Error;

/// Why a stream line could not be decoded into a raw agent event.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecodeErrorCode {
    /// The line is not valid JSON.
    JsonParse,
    /// Valid JSON whose shape does not fit a raw agent event.
    Shape,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LineRecordError {
    #[error("I/O error while reading agent event stream")]
    Io,
    #[error("invalid UTF-8 in agent event stream")]
    InvalidUtf8,
    #[error("line too long (observed_bytes={observed_bytes}, max_line_bytes={max_line_bytes})")]
    LineTooLong {
        observed_bytes: usize,
        max_line_bytes: usize,
    },
    #[error("could not decode agent event ({code:?}): {summary}")]
    Decode {
        code: DecodeErrorCode,
        summary: String,
    },
}

/// One line of an event stream and what became of it.
#[derive(Debug, Clone)]
pub struct LineRecord<T> {
    /// 1-based, counting blank lines.
    pub line_number: usize,
    pub captured_raw: Option<String>,
    pub outcome: Result<T, LineRecordError>,
}
