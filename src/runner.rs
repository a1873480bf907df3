//! Process execution seam.
//!
//! Engines never spawn processes themselves, they hand a program name and arguments to a
//! [`Runner`]. [`SystemRunner`] is the real thing. Tests plug in a runner that replays canned
//! output.
use std::{fmt, io, process::Command};

/// Whatever the command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code. `None` if the process was killed by a signal.
    pub code:   Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Zero exit code.
    pub fn success(&self) -> bool { self.code == Some(0) }
}

impl From<std::process::Output> for CommandOutput {
    fn from(out: std::process::Output) -> Self {
        CommandOutput { code: out.status.code(), stdout: out.stdout, stderr: out.stderr }
    }
}

/// Run `program` with `args` to completion. Arguments are passed as is, no shell involved.
pub trait Runner: fmt::Debug + Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    prefix: Vec<String>,
}

impl SystemRunner {
    pub fn new() -> Self { SystemRunner::default() }

    /// Run everything through `sudo -n`. Fails instead of prompting for a password.
    pub fn sudo() -> Self { SystemRunner { prefix: vec![String::from("sudo"), String::from("-n")] } }

    fn command(&self, program: &str, args: &[String]) -> Command {
        let mut cmd = match self.prefix.split_first() {
            Some((wrapper, wrapper_args)) => {
                let mut cmd = Command::new(wrapper);
                cmd.args(wrapper_args);
                cmd.arg(program);
                cmd
            },
            None => Command::new(program),
        };
        cmd.args(args);
        cmd
    }
}

impl Runner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        self.command(program, args).output().map(CommandOutput::from)
    }
}
