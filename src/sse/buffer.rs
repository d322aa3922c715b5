//! Text accumulator that yields complete frames.

/// Accumulates decoded text and hands back complete frames one at a time.
///
/// Line terminators are normalised to `\n` as text is pushed, so `\r\n` and
/// bare `\r` work the same as `\n`, including a `\r\n` split across two
/// chunks. A byte-order mark at the very start of the stream is dropped. A
/// frame ends at the first blank line. Extracted text is drained from the
/// front so the buffer only ever holds the unfinished tail.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    /// Normalised text not yet resolved into a frame
    text: String,
    /// Last pushed character was `\r` (a following `\n` is part of the same terminator)
    after_cr: bool,
    /// Offset before which no boundary can start
    scan_from: usize,
    /// Some text has been pushed
    started: bool,
}

const BOUNDARY: &str = "\n\n";

impl FrameBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text.
    pub fn push(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }

        let chunk = if self.started {
            chunk
        } else {
            self.started = true;
            chunk.strip_prefix('\u{FEFF}').unwrap_or(chunk)
        };

        if !self.after_cr && !chunk.contains('\r') {
            self.text.push_str(chunk);
            return;
        }

        for c in chunk.chars() {
            match c {
                '\r' => {
                    self.text.push('\n');
                    self.after_cr = true;
                }
                '\n' if self.after_cr => {
                    self.after_cr = false;
                }
                _ => {
                    self.text.push(c);
                    self.after_cr = false;
                }
            }
        }
    }

    /// Remove and return the earliest complete frame, without its boundary.
    pub fn next_frame(&mut self) -> Option<String> {
        match self.text[self.scan_from..].find(BOUNDARY) {
            Some(offset) => {
                let end = self.scan_from + offset;
                let mut frame: String = self.text.drain(..end + BOUNDARY.len()).collect();
                frame.truncate(end);
                self.scan_from = 0;
                Some(frame)
            }
            None => {
                // A boundary may still complete on the last buffered newline
                self.scan_from = if self.text.ends_with('\n') {
                    self.text.len() - 1
                } else {
                    self.text.len()
                };
                None
            }
        }
    }

    /// Drop whatever is left, returning how many bytes were discarded.
    pub fn discard(&mut self) -> usize {
        let discarded = self.text.len();
        self.text.clear();
        self.after_cr = false;
        self.scan_from = 0;
        discarded
    }

    /// Bytes currently buffered.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
