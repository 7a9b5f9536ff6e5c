//! The engine's I/O boundary.
//!
//! `:::` reads through [`Host::read_line`] and `~` writes through
//! [`Host::write_line`].  The CLI runs against the process's stdin/stdout
//! via [`StreamHost::stdio`]; tests script the input and capture the output
//! with [`BufferHost`].

use std::collections::VecDeque;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented input source and output sink.
pub trait Host {
    /// Block until a line is available.  `Ok(None)` means the source is
    /// exhausted.  The line terminator is not included.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Emit one line.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

// ── Streams ───────────────────────────────────────────────────────────────────

/// A host over any buffered reader and writer.
pub struct StreamHost<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamHost<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl StreamHost<StdinLock<'static>, Stdout> {
    /// A host over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Host for StreamHost<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        // Output may interleave with a blocking read; don't leave it buffered.
        self.writer.flush()
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// Scripted input lines and captured output lines.
#[derive(Debug, Default)]
pub struct BufferHost {
    input: VecDeque<String>,
    /// Every line written so far, in order.
    pub output: Vec<String>,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that will yield `lines` in order, then report exhaustion.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }
}

impl Host for BufferHost {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_owned());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
