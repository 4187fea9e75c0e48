//! Line destinations.
//!
//! A [`Sink`] receives one fully rendered line per call, trailing newline
//! included, and is responsible for writing it without interleaving with
//! concurrent writers.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A destination for rendered log lines.
pub trait Sink: Send + Sync {
    /// Write one complete line atomically.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Serializes lines into any [`Write`] implementation behind a mutex.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = lock(&self.inner);
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

/// Writes to the process standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.flush()
    }
}

/// Writes to the process standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        io::stderr().lock().write_all(line.as_bytes())
    }
}

/// Accepts and drops every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<String>,
}

impl MemorySink {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        lock(&self.buffer).clone()
    }

    /// Written lines without their trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.buffer).lines().map(str::to_owned).collect()
    }

    /// Drains the buffer, returning what it held.
    pub fn take(&self) -> String {
        std::mem::take(&mut *lock(&self.buffer))
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        lock(&self.buffer).push_str(line);
        Ok(())
    }
}

// A panic while holding the lock cannot leave a half-written line behind,
// so a poisoned lock is still safe to use.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
