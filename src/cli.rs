use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

pub const NAMESPACE_ENV: &str = "KVLOG_NAMESPACE";

#[derive(Parser, Debug)]
#[command(
    name = "kvlog",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub scope: ScopeOptions,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ScopeOptions {
    /// Namespace prefix written at the start of every line
    #[arg(
        short,
        long,
        value_name = "NS",
        env = NAMESPACE_ENV,
        default_value = "app=kvlog",
        global = true
    )]
    pub namespace: String,

    /// Extra key=value attributes (repeatable)
    #[arg(short, long = "attr", value_name = "KV", global = true)]
    pub attrs: Vec<String>,

    /// Value of the at= attribute
    #[arg(long, value_name = "TARGET", global = true)]
    pub at: Option<String>,

    /// Value of the step= attribute
    #[arg(long, value_name = "STEP", global = true)]
    pub step: Option<String>,

    /// Append lines to FILE instead of writing to stdout
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Write lines to stderr instead of stdout
    #[arg(long, global = true, conflicts_with = "output")]
    pub stderr: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a plain line
    Log(MessageOptions),
    /// Write a state=success line
    Success(MessageOptions),
    /// Write a state=error line carrying MESSAGE as the error
    Error(MessageOptions),
    /// Run a program and report its outcome with elapsed time
    Exec(ExecOptions),
    /// Print a shell completion script
    Completions(CompletionsOptions),
}

#[derive(Args, Debug)]
pub struct MessageOptions {
    /// Message words, joined with single spaces
    #[arg(name = "MESSAGE")]
    pub message: Vec<String>,
}

impl MessageOptions {
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}

#[derive(Args, Debug)]
#[command(trailing_var_arg = true)]
pub struct ExecOptions {
    /// Program to run
    #[arg(name = "PROGRAM")]
    pub program: String,

    /// Arguments passed to the program
    #[arg(name = "ARGS", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsOptions {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from<I, T>(items: I) -> Cli
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::parse_from(items)
    }

    #[test]
    fn parse_log_with_scope_options() {
        let cli = parse_from([
            "kvlog",
            "-n",
            "ns=deploy",
            "--attr",
            "region=eu",
            "-a",
            "zone=b",
            "--at",
            "fetch",
            "log",
            "bytes=42",
            "ok=true",
        ]);
        assert_eq!(cli.scope.namespace, "ns=deploy");
        assert_eq!(cli.scope.attrs, vec!["region=eu", "zone=b"]);
        assert_eq!(cli.scope.at.as_deref(), Some("fetch"));
        assert!(cli.scope.step.is_none());
        match cli.cmd {
            Commands::Log(opts) => assert_eq!(opts.text(), "bytes=42 ok=true"),
            other => panic!("expected log command, got {:?}", other),
        }
    }

    #[test]
    fn global_options_may_follow_subcommand() {
        let cli = parse_from(["kvlog", "success", "--step", "upload", "files=3"]);
        assert_eq!(cli.scope.step.as_deref(), Some("upload"));
        match cli.cmd {
            Commands::Success(opts) => assert_eq!(opts.text(), "files=3"),
            other => panic!("expected success command, got {:?}", other),
        }
    }

    #[test]
    fn parse_exec_keeps_program_arguments() {
        let cli = parse_from([
            "kvlog",
            "-o",
            "/tmp/out.log",
            "exec",
            "cargo",
            "build",
            "--release",
            "-p",
            "core",
        ]);
        assert_eq!(cli.scope.output, Some(PathBuf::from("/tmp/out.log")));
        match cli.cmd {
            Commands::Exec(opts) => {
                assert_eq!(opts.program, "cargo");
                assert_eq!(opts.args, vec!["build", "--release", "-p", "core"]);
            }
            other => panic!("expected exec command, got {:?}", other),
        }
    }

    #[test]
    fn stderr_conflicts_with_output() {
        let cli = parse_from(["kvlog", "--stderr", "error", "boom"]);
        assert!(cli.scope.stderr);

        let err = Cli::try_parse_from(["kvlog", "--stderr", "-o", "out.log", "log", "x=1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parse_completions_shell() {
        let cli = parse_from(["kvlog", "completions", "zsh"]);
        match cli.cmd {
            Commands::Completions(opts) => assert_eq!(opts.shell, Shell::Zsh),
            other => panic!("expected completions command, got {:?}", other),
        }
    }
}
