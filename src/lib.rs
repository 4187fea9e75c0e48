#![doc = include_str!("../README.md")]

pub mod cli;
pub mod completions;
pub mod context;
pub mod diag;
mod error;
mod logger;
mod macros;
pub mod sink;

pub use context::Context;
pub use error::{Error, Result};
pub use logger::{pair, Logger};
pub use sink::{DiscardSink, MemorySink, Sink, StderrSink, StdoutSink, WriterSink};

use cli::{Cli, Commands, ExecOptions, ScopeOptions};
use diag::*;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

/// Exit code reported when `exec` cannot start its program.
pub const SPAWN_FAILED: i32 = 127;

/// A message given on the command line, reported as an error.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Reported(String);

pub fn run() -> Result<i32> {
    run_with_cli(cli::parse_args())
}

pub fn run_with_cli(cli: Cli) -> Result<i32> {
    diag::init();
    info!("start");
    debug!("cli args: {:?}", cli);

    if let Commands::Completions(opts) = &cli.cmd {
        completions::print(opts.shell, &mut io::stdout());
        info!("{} end", env!("CARGO_PKG_NAME"));
        return Ok(0);
    }

    let log = scoped_logger(&cli.scope)?;
    let code = dispatcher(cli.cmd, &log)?;
    info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(code)
}

/// Builds the logger described by the global command-line options.
pub fn scoped_logger(scope: &ScopeOptions) -> Result<Logger> {
    let sink: Arc<dyn Sink> = match &scope.output {
        Some(path) => Arc::new(WriterSink::new(open_output(path)?)),
        None if scope.stderr => Arc::new(StderrSink),
        None => Arc::new(StdoutSink),
    };

    let mut log = Logger::with_sink(scope.namespace.as_str(), sink);
    for kv in &scope.attrs {
        log = log.namespace(kv);
    }
    if let Some(at) = &scope.at {
        log = log.at(at);
    }
    if let Some(step) = &scope.step {
        log = log.step(step);
    }
    Ok(log)
}

fn open_output(path: &Path) -> Result<std::fs::File> {
    debug!("opening output {}", path.display());
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        })
}

fn dispatcher(cmd: Commands, log: &Logger) -> Result<i32> {
    debug!("dispatching command: {:?}", cmd);
    match cmd {
        Commands::Log(opts) => log.log(opts.text())?,
        Commands::Success(opts) => log.success(opts.text())?,
        Commands::Error(opts) => log.error(&Reported(opts.text()))?,
        Commands::Exec(opts) => return exec(log, &opts),
        Commands::Completions(_) => unreachable!("handled earlier in run_with_cli"),
    }
    Ok(0)
}

/// Runs the program under a started logger and reports how it ended. The
/// returned exit code mirrors the child's.
fn exec(log: &Logger, opts: &ExecOptions) -> Result<i32> {
    info!("Executing '{}' with {} argument(s)", opts.program, opts.args.len());
    let timed = log.start();

    let status = match Command::new(&opts.program).args(&opts.args).status() {
        Ok(status) => status,
        Err(source) => {
            let err = Error::Spawn {
                program: opts.program.clone(),
                source,
            };
            warn!("{}", err);
            timed.error(&err)?;
            return Ok(SPAWN_FAILED);
        }
    };

    if status.success() {
        timed.success(pair("program", &opts.program))?;
        return Ok(0);
    }

    let code = status.code().unwrap_or(1);
    let err = Error::ChildFailed {
        program: opts.program.clone(),
        status,
    };
    error!("{}", err);
    timed.error(&err)?;
    Ok(code)
}
