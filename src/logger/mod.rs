//! The chainable line logger.
//!
//! A [`Logger`] is an immutable value: a namespace prefix, an ordered list of
//! `key=value` attribute tokens, a shared [`Sink`] and an optional start
//! instant. Every derivation returns a new `Logger`; only [`Logger::log`],
//! [`Logger::error`] and [`Logger::success`] (and their `*f` forms) write,
//! exactly one line per call.

mod render;
mod tokens;

use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use crate::context::Context;
use crate::error::Result;
use crate::sink::{DiscardSink, Sink, StdoutSink, WriterSink};

pub use tokens::pair;

const AT: &str = "at";
const STEP: &str = "step";

#[derive(Clone)]
pub struct Logger {
    namespace: Arc<str>,
    attributes: Arc<[String]>,
    sink: Arc<dyn Sink>,
    started_at: Option<Instant>,
}

/// Private carrier key; only this module can bind or read it.
struct Carried(Logger);

impl Logger {
    /// Creates a logger writing to the process standard output.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_sink(namespace, Arc::new(StdoutSink))
    }

    /// Creates a logger writing to `writer`, one locked write per line.
    pub fn with_writer<W>(namespace: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_sink(namespace, Arc::new(WriterSink::new(writer)))
    }

    /// Creates a logger writing to an existing, possibly shared, sink.
    pub fn with_sink(namespace: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        Self {
            namespace: Arc::from(namespace.into()),
            attributes: Arc::from(Vec::new()),
            sink,
            started_at: None,
        }
    }

    /// A logger that renders nothing anywhere.
    pub fn discard() -> Self {
        Self::with_sink("", Arc::new(DiscardSink))
    }

    pub fn prefix(&self) -> &str {
        &self.namespace
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Appends the whitespace-separated `key=value` tokens of `kv`.
    pub fn namespace(&self, kv: &str) -> Self {
        let added = tokens::split(kv);
        if added.is_empty() {
            return self.clone();
        }
        let mut next = self.attributes.to_vec();
        next.extend(added);
        self.derive(next)
    }

    /// Appends `fragment` as a single opaque token.
    pub fn append(&self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        if fragment.is_empty() {
            return self.clone();
        }
        let mut next = self.attributes.to_vec();
        next.push(fragment);
        self.derive(next)
    }

    /// Swaps the value of the first `key=` token, keeping its position.
    /// When no token carries `key`, one is appended.
    pub fn replace(&self, key: &str, value: impl fmt::Display) -> Self {
        self.set(key, value)
    }

    /// Sets the single `at=` slot.
    pub fn at(&self, target: impl fmt::Display) -> Self {
        self.set(AT, target)
    }

    /// Sets the single `step=` slot.
    pub fn step(&self, target: impl fmt::Display) -> Self {
        self.set(STEP, target)
    }

    /// Records the current instant; a later success line reports `elapsed=`.
    pub fn start(&self) -> Self {
        Self {
            started_at: Some(Instant::now()),
            ..self.clone()
        }
    }

    pub fn log(&self, message: impl fmt::Display) -> Result<()> {
        self.logf(format_args!("{}", message))
    }

    pub fn logf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let message = render::message(args);
        self.emit([message.as_str()])
    }

    /// Writes `state=error error="<message>"`.
    pub fn error<E>(&self, err: &E) -> Result<()>
    where
        E: std::error::Error + ?Sized,
    {
        let segment = render::error_segment(&err.to_string());
        self.emit([segment.as_str()])
    }

    pub fn success(&self, message: impl fmt::Display) -> Result<()> {
        self.successf(format_args!("{}", message))
    }

    /// Writes `state=success`, then `elapsed=` when timing was started, then
    /// the rendered message.
    pub fn successf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let elapsed = self
            .started_at
            .map(|started| render::elapsed_token(started.elapsed()))
            .unwrap_or_default();
        let message = render::message(args);
        self.emit(["state=success", elapsed.as_str(), message.as_str()])
    }

    /// Derives a carrier holding this logger.
    pub fn with_context(&self, cx: &Context) -> Context {
        cx.with_value(Carried(self.clone()))
    }

    /// Retrieves the logger bound by [`Logger::with_context`], or a discarding
    /// logger when the carrier holds none.
    pub fn from_context(cx: &Context) -> Self {
        cx.value::<Carried>()
            .map(|carried| carried.0.clone())
            .unwrap_or_else(Self::discard)
    }

    fn set(&self, key: &str, value: impl fmt::Display) -> Self {
        let token = tokens::pair(key, &value.to_string());
        self.derive(tokens::upsert(&self.attributes, key, token))
    }

    fn derive(&self, attributes: Vec<String>) -> Self {
        Self {
            attributes: Arc::from(attributes),
            ..self.clone()
        }
    }

    fn emit<'a>(&'a self, tail: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let line = render::line(&self.namespace, &self.attributes, tail);
        self.sink.write_line(&line)?;
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("namespace", &self.namespace)
            .field("attributes", &self.attributes)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
