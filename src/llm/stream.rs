//! Server-sent events reader for streamed completions.

use std::io::{BufRead, BufReader, Read};

use crate::transport::TransportError;

const DONE_MARKER: &str = "[DONE]";

/// Iterator over the `data:` payloads of an SSE stream.
///
/// Ends at EOF or at the `[DONE]` sentinel. Comments, event names and blank
/// separators are skipped.
pub(super) struct SseStream<R: Read> {
    reader: BufReader<R>,
    buffer: String,
    done: bool,
}

impl<R: Read> SseStream<R> {
    pub(super) fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            buffer: String::new(),
            done: false,
        }
    }
}

impl<R: Read> Iterator for SseStream<R> {
    type Item = Result<String, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buffer.clear();

            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    let line = self.buffer.trim_end_matches(['\r', '\n']);
                    let Some(payload) = line.strip_prefix("data:") else {
                        continue;
                    };
                    let payload = payload.trim_start();
                    if payload == DONE_MARKER {
                        self.done = true;
                        return None;
                    }
                    if payload.is_empty() {
                        continue;
                    }
                    return Some(Ok(payload.to_string()));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(TransportError::Io(e)));
                }
            }
        }
    }
}
