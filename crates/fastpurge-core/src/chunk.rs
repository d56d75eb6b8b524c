//! Lazy, size-bounded chunking of the invalidation object stream.
//!
//! Both chunkers are single-pass, non-restartable iterators. Structural
//! errors (an unparseable line, a malformed JSON document mid-stream)
//! end the sequence; iteration after an error yields `None`.

use std::io::{BufRead, Lines, Read};

use url::Url;

use crate::body::{JSON_OVERHEAD, LINE_OVERHEAD, MAX_BODY_SIZE, RequestBody};
use crate::error::ChunkError;

/// Base used to resolve relative cache-key ARLs (`S/...`, `L/...`).
/// Lines are only checked for parseability, never rewritten.
const RELATIVE_BASE: &str = "https://cache-key.invalid/";

fn check_parseable(line: &str) -> Result<(), url::ParseError> {
    match Url::parse(line) {
        Ok(_) => Ok(()),
        // ARLs are relative references, accepted like absolute URLs.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(RELATIVE_BASE)?.join(line).map(drop)
        }
        Err(source) => Err(source),
    }
}

/// Greedy single-pass packer turning text lines into request bodies
/// that respect [`MAX_BODY_SIZE`].
///
/// A running byte budget starts at `MAX_BODY_SIZE - JSON_OVERHEAD` and
/// is charged `len + LINE_OVERHEAD` per line. While the budget stays
/// positive the line joins the open chunk; the line that drives it
/// non-positive closes the chunk and opens the next one with a freshly
/// reset budget already charged for that line. The final non-empty
/// chunk is emitted at end of input.
///
/// Concatenating the `objects` of all emitted chunks reproduces the
/// input in order; a single object is never split across chunks, even
/// when it alone exceeds the budget.
pub struct TextChunker<R> {
    lines: Lines<R>,
    open: Vec<String>,
    budget: i64,
    line_no: u64,
    done: bool,
}

impl<R: BufRead> TextChunker<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            open: Vec::new(),
            budget: (MAX_BODY_SIZE - JSON_OVERHEAD) as i64,
            line_no: 0,
            done: false,
        }
    }

    fn fail(&mut self, err: ChunkError) -> Option<Result<RequestBody, ChunkError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for TextChunker<R> {
    type Item = Result<RequestBody, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_no += 1;
                    if let Err(source) = check_parseable(&line) {
                        let line = self.line_no;
                        return self.fail(ChunkError::MalformedUrl { line, source });
                    }

                    let cost = (line.len() + LINE_OVERHEAD) as i64;
                    self.budget -= cost;
                    if self.budget > 0 {
                        self.open.push(line);
                        continue;
                    }

                    let closed = std::mem::take(&mut self.open);
                    self.budget = (MAX_BODY_SIZE - JSON_OVERHEAD) as i64 - cost;
                    self.open.push(line);

                    // A line can overflow an already-empty chunk; there
                    // is nothing to emit for it yet.
                    if !closed.is_empty() {
                        return Some(Ok(RequestBody::new(closed)));
                    }
                }
                Some(Err(err)) => return self.fail(err.into()),
                None => {
                    self.done = true;
                    if self.open.is_empty() {
                        return None;
                    }
                    return Some(Ok(RequestBody::new(std::mem::take(&mut self.open))));
                }
            }
        }
    }
}

/// Chunker for JSON-mode input: every well-formed top-level document in
/// the stream becomes its own chunk, forwarded verbatim (no re-packing
/// across documents). Clean end of stream terminates the sequence; a
/// decode failure anywhere else aborts the run.
pub struct JsonChunker<R: Read> {
    stream: serde_json::StreamDeserializer<'static, serde_json::de::IoRead<R>, serde_json::Value>,
    done: bool,
}

impl<R: Read> JsonChunker<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: serde_json::Deserializer::from_reader(reader).into_iter(),
            done: false,
        }
    }
}

impl<R: Read> Iterator for JsonChunker<R> {
    type Item = Result<Vec<u8>, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.stream.next() {
            Some(Ok(document)) => Some(serde_json::to_vec(&document).map_err(ChunkError::from)),
            Some(Err(err)) => {
                self.done = true;
                Some(Err(ChunkError::Json(err)))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
