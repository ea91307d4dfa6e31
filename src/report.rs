//! Progress and error sinks for the aggregator

use crate::tasks::Task;
use crate::upload::UploadError;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Receives one call per finished task, in completion order
pub trait Reporter: Send + 'static {
    /// `done` counts successes so far, including this one
    fn uploaded(&mut self, task: &Task, done: usize, total: usize);

    fn failed(&mut self, task: &Task, error: &UploadError);
}

pub fn success_line(task: &Task, done: usize, total: usize) -> String {
    format!("{task} is uploaded ({done}/{total})")
}

pub fn failure_line(task: &Task, error: &UploadError) -> String {
    format!("{task}: {error}")
}

/// Writes success lines to one writer and failure lines to another
pub struct WriterReporter<O, E> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> WriterReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O, E> Reporter for WriterReporter<O, E>
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    fn uploaded(&mut self, task: &Task, done: usize, total: usize) {
        if let Err(e) = writeln!(self.out, "{}", success_line(task, done, total)) {
            warn!(error = %e, "Failed to write progress line");
        }
    }

    fn failed(&mut self, task: &Task, error: &UploadError) {
        if let Err(e) = writeln!(self.err, "{}", failure_line(task, error)) {
            warn!(error = %e, "Failed to write error line");
        }
    }
}

/// Progress on stdout, failures on stderr
pub type ConsoleReporter = WriterReporter<io::Stdout, io::Stderr>;

impl ConsoleReporter {
    pub fn console() -> Self {
        WriterReporter::new(io::stdout(), io::stderr())
    }
}

/// A line recorded by [`MemoryReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Uploaded(String),
    Failed(String),
}

/// Keeps every line in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    lines: Arc<Mutex<Vec<Line>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn uploaded_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Uploaded(s) => Some(s),
                Line::Failed(_) => None,
            })
            .collect()
    }

    pub fn failed_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Failed(s) => Some(s),
                Line::Uploaded(_) => None,
            })
            .collect()
    }

    fn push(&self, line: Line) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl Reporter for MemoryReporter {
    fn uploaded(&mut self, task: &Task, done: usize, total: usize) {
        self.push(Line::Uploaded(success_line(task, done, total)));
    }

    fn failed(&mut self, task: &Task, error: &UploadError) {
        self.push(Line::Failed(failure_line(task, error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_reporter_splits_streams() {
        let mut reporter = WriterReporter::new(Vec::new(), Vec::new());
        reporter.uploaded(&Task::new("dump/a.json"), 1, 2);
        reporter.failed(&Task::new("dump/b.json"), &UploadError::Timeout);

        let (out, err) = reporter.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "dump/a.json is uploaded (1/2)\n");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "dump/b.json: update query timed out\n"
        );
    }

    #[test]
    fn test_memory_reporter_clones_share_lines() {
        let reporter = MemoryReporter::new();
        let mut handle = reporter.clone();
        handle.uploaded(&Task::new("a.json"), 1, 1);

        assert_eq!(reporter.uploaded_lines(), vec!["a.json is uploaded (1/1)"]);
        assert!(reporter.failed_lines().is_empty());
    }
}
