// Diagnostics about kvlog itself, separate from the lines it produces.
use env_logger::{Builder, Env, Target};
use std::io::Write;

pub const FILTER_ENV: &str = "KVLOG_LOG";

/// Routes `log` records to stderr as `[LEVEL file:line] message`.
///
/// The filter comes from `KVLOG_LOG`, falling back to `debug` in debug builds
/// and `off` in release builds. Calling it twice keeps the first setup.
pub fn init() {
    let env = if cfg!(debug_assertions) {
        Env::new().filter_or(FILTER_ENV, "debug")
    } else {
        Env::new().filter_or(FILTER_ENV, "off")
    };

    let mut builder = Builder::from_env(env);

    builder.target(Target::Stderr).format(|buf, record| {
        writeln!(
            buf,
            "[{:>5} {}:{}] {}",
            record.level(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    });

    if builder.try_init().is_err() {
        log::debug!("diagnostics already initialized");
    }
}

#[allow(unused_imports)]
pub use log::{debug, error, info, trace, warn};
