//! Line-oriented output sinks for a sync run
//!
//! A run reports on two channels: progress (one line per operation attempted)
//! and errors (one line per failure).

use std::io::{self, Stderr, Stdout, Write};

/// Destination for the progress and error lines of a run.
pub trait Transcript {
    /// Record one progress line.
    fn progress(&mut self, line: &str);

    /// Record one error line.
    fn error(&mut self, line: &str);
}

/// Transcript writing each channel to its own stream. Write failures are
/// ignored.
#[derive(Debug)]
pub struct StreamTranscript<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> StreamTranscript<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consume the transcript and return the underlying streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl StreamTranscript<Stdout, Stderr> {
    /// Transcript over the process's standard output and error.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Transcript for StreamTranscript<O, E> {
    fn progress(&mut self, line: &str) {
        let _ = writeln!(self.out, "{}", line);
    }

    fn error(&mut self, line: &str) {
        let _ = writeln!(self.err, "{}", line);
    }
}

/// Transcript that keeps every line in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTranscript {
    pub progress: Vec<String>,
    pub errors: Vec<String>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.progress.is_empty() && self.errors.is_empty()
    }

    /// Progress lines starting with `prefix`.
    pub fn progress_starting_with<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.progress
            .iter()
            .map(String::as_str)
            .filter(move |line| line.starts_with(prefix))
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.progress.clear();
        self.errors.clear();
    }
}

impl Transcript for MemoryTranscript {
    fn progress(&mut self, line: &str) {
        self.progress.push(line.to_string());
    }

    fn error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }
}
