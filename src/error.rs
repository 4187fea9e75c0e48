use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The sink refused a rendered line.
    #[error("log sink write failed: {0}")]
    Sink(#[from] io::Error),

    #[error("unable to open log output '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited unsuccessfully ({status})")]
    ChildFailed { program: String, status: ExitStatus },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
