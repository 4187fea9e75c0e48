/// Formats and writes one line through [`Logger::logf`](crate::Logger::logf).
///
/// ```
/// use kvlog::{logf, Logger, MemorySink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::default());
/// let log = Logger::with_sink("ns=test", sink.clone());
/// logf!(log, "string={:?} int={} float={:.2}", "foo", 42, 3.14159).unwrap();
/// assert_eq!(sink.contents(), "ns=test string=\"foo\" int=42 float=3.14\n");
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf(::std::format_args!($($arg)+))
    };
}

/// Formats and writes one `state=success` line through
/// [`Logger::successf`](crate::Logger::successf).
#[macro_export]
macro_rules! successf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.successf(::std::format_args!($($arg)+))
    };
}
