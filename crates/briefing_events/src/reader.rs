use std::io::{BufRead, ErrorKind};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum BoundedLine {
    Line {
        line_number: usize,
        bytes: Vec<u8>,
    },
    LineTooLong {
        line_number: usize,
        observed_bytes: usize,
        max_line_bytes: usize,
    },
    IoError {
        line_number: usize,
    },
}

/// Newline-delimited reader that never buffers more than `max_line_bytes`
/// of a single line. Oversized lines are drained and reported, and reading
/// continues with the next line.
pub(crate) struct BoundedLineReader<R: BufRead> {
    reader: R,
    max_line_bytes: usize,
    line_number: usize,
    done: bool,
}

impl<R: BufRead> BoundedLineReader<R> {
    pub(crate) fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader,
            max_line_bytes,
            line_number: 0,
            done: false,
        }
    }

    fn finish(&mut self, bytes: Vec<u8>, observed_bytes: usize) -> BoundedLine {
        self.line_number += 1;
        if observed_bytes > self.max_line_bytes {
            BoundedLine::LineTooLong {
                line_number: self.line_number,
                observed_bytes,
                max_line_bytes: self.max_line_bytes,
            }
        } else {
            BoundedLine::Line {
                line_number: self.line_number,
                bytes,
            }
        }
    }
}

impl<R: BufRead> Iterator for BoundedLineReader<R> {
    type Item = BoundedLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut line = Vec::new();
        let mut observed = 0usize;
        let mut started = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(_) => {
                    self.done = true;
                    self.line_number += 1;
                    return Some(BoundedLine::IoError {
                        line_number: self.line_number,
                    });
                }
            };

            if available.is_empty() {
                self.done = true;
                return started.then(|| self.finish(line, observed));
            }
            started = true;

            let (chunk_len, consumed, ended) = match available.iter().position(|b| *b == b'\n') {
                Some(idx) => (idx, idx + 1, true),
                None => (available.len(), available.len(), false),
            };
            observed = observed.saturating_add(chunk_len);
            if observed > self.max_line_bytes {
                line.clear();
            } else {
                line.extend_from_slice(&available[..chunk_len]);
            }
            self.reader.consume(consumed);

            if ended {
                return Some(self.finish(line, observed));
            }
        }
    }
}
