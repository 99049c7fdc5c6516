//! Test helpers for dockhand.
//!
//! [`FakeExecutor`] stands in for the engine: it records every command line it
//! is asked to run and answers from a queue of scripted outputs.

use async_trait::async_trait;
use dockhand::{
    CommandLine, DockhandError, DockhandResult, OutputChunk, ProcessExecutor, ProcessOutput,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// A typical 64-character container identifier.
pub const CONTAINER_ID: &str = "4f66ad9a0b2e3c1d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d";

type Handler = Box<dyn Fn(&CommandLine) -> ProcessOutput + Send + Sync>;

enum Reply {
    Output(ProcessOutput),
    Timeout,
}

/// Scripted, recording [`ProcessExecutor`].
///
/// Replies are consumed in order. When the queue is empty the optional
/// handler answers; without one, every command succeeds with empty output.
#[derive(Default)]
pub struct FakeExecutor {
    replies: Mutex<VecDeque<Reply>>,
    handler: Option<Handler>,
    calls: Mutex<Vec<CommandLine>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer unscripted commands with `handler`.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&CommandLine) -> ProcessOutput + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Self::default()
        }
    }

    /// Queue a reply.
    pub fn push(&self, output: ProcessOutput) -> &Self {
        self.replies.lock().push_back(Reply::Output(output));
        self
    }

    /// Queue a successful reply printing `stdout`.
    pub fn push_success(&self, stdout: impl Into<String>) -> &Self {
        self.push(ProcessOutput::new(0, stdout, ""))
    }

    /// Queue a failing reply with `exit_code` and `stderr`.
    pub fn push_failure(&self, exit_code: i32, stderr: impl Into<String>) -> &Self {
        self.push(ProcessOutput::new(exit_code, "", stderr))
    }

    /// Queue a timeout for the next streaming run.
    pub fn push_timeout(&self) -> &Self {
        self.replies.lock().push_back(Reply::Timeout);
        self
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().clone()
    }

    /// Display form of every command line run so far.
    pub fn rendered_calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(ToString::to_string).collect()
    }

    pub fn last_call(&self) -> Option<CommandLine> {
        self.calls.lock().last().cloned()
    }

    fn next_reply(&self, command: &CommandLine) -> Reply {
        self.calls.lock().push(command.clone());
        if let Some(reply) = self.replies.lock().pop_front() {
            return reply;
        }
        match &self.handler {
            Some(handler) => Reply::Output(handler(command)),
            None => Reply::Output(ProcessOutput::default()),
        }
    }
}

#[async_trait]
impl ProcessExecutor for FakeExecutor {
    async fn run(&self, command: &CommandLine) -> DockhandResult<ProcessOutput> {
        match self.next_reply(command) {
            Reply::Output(output) => Ok(output),
            Reply::Timeout => Err(DockhandError::Timeout {
                command: command.to_string(),
                timeout: Duration::ZERO,
            }),
        }
    }

    async fn run_streaming(
        &self,
        command: &CommandLine,
        on_output: &mut (dyn FnMut(OutputChunk) + Send),
        timeout: Duration,
    ) -> DockhandResult<ProcessOutput> {
        match self.next_reply(command) {
            Reply::Output(output) => {
                for line in output.stdout.lines() {
                    on_output(OutputChunk::stdout(line));
                }
                for line in output.stderr.lines() {
                    on_output(OutputChunk::stderr(line));
                }
                Ok(output)
            }
            Reply::Timeout => Err(DockhandError::Timeout {
                command: command.to_string(),
                timeout,
            }),
        }
    }
}

/// A fresh fake plus the same fake as a trait object for spec builders.
pub fn fake_executor() -> (Arc<FakeExecutor>, Arc<dyn ProcessExecutor>) {
    let fake = Arc::new(FakeExecutor::new());
    let executor: Arc<dyn ProcessExecutor> = fake.clone();
    (fake, executor)
}
