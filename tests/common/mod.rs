#![allow(dead_code)]
use std::{collections::VecDeque,
          io,
          sync::{Arc, Mutex}};

use rand::Rng;
use slog::{o, Drain, Logger};
use zetta_ctl::runner::{CommandOutput, Runner};

/// Replays canned output in order and remembers what it was asked to run. Once the script runs
/// out every command succeeds with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    replies: Mutex<VecDeque<io::Result<CommandOutput>>>,
    calls:   Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn new() -> Arc<ScriptedRunner> { Arc::new(ScriptedRunner::default()) }

    pub fn stdout(&self, stdout: &[u8]) -> &Self {
        self.push(Ok(CommandOutput { code: Some(0), stdout: stdout.to_vec(), stderr: Vec::new() }))
    }

    pub fn fail(&self, code: i32, stderr: &[u8]) -> &Self {
        self.push(Ok(CommandOutput { code: Some(code), stdout: Vec::new(), stderr: stderr.to_vec() }))
    }

    pub fn spawn_error(&self, kind: io::ErrorKind) -> &Self { self.push(Err(io::Error::new(kind, "scripted"))) }

    fn push(&self, reply: io::Result<CommandOutput>) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Programs that were run.
    pub fn programs(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(program, _)| program.clone()).collect()
    }

    /// Arguments of every invocation, oldest first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().iter().map(|(_, args)| args.clone()).collect()
    }

    /// Arguments of the only invocation.
    pub fn single_call(&self) -> Vec<String> {
        let calls = self.calls();
        assert_eq!(1, calls.len(), "expected exactly one invocation, got {:?}", calls);
        calls.into_iter().next().unwrap()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        self.calls.lock().unwrap().push((program.to_string(), args.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput { code: Some(0), ..CommandOutput::default() }))
    }
}

/// Unique fixture names. Each test owns its generator.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    prefix:  String,
    counter: u64,
}

impl NameGenerator {
    pub fn new<S: Into<String>>(prefix: S, counter: u64) -> Self { NameGenerator { prefix: prefix.into(), counter } }

    /// Counter seeded from `rand` so parallel runs against the same system don't collide.
    pub fn random<S: Into<String>>(prefix: S) -> Self { NameGenerator::new(prefix, rand::thread_rng().gen::<u32>().into()) }

    pub fn next_name(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }
}

// Only used for debugging
pub fn get_logger() -> Logger {
    let plain = slog_term::PlainSyncDecorator::new(std::io::stdout());
    Logger::root(slog_term::FullFormat::new(plain).use_original_order().build().fuse(), o!())
}

pub fn discard_logger() -> Logger { Logger::root(slog::Discard, o!()) }
