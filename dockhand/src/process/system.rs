//! Subprocess executor backed by `tokio::process`.

use super::{OutputChunk, OutputStream, ProcessExecutor, ProcessOutput};
use crate::command::CommandLine;
use crate::errors::{DockhandError, DockhandResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin};
use tokio::sync::mpsc;

/// Spawns engine commands as real child processes.
///
/// Children are spawned with `kill_on_drop`, so a cancelled future never
/// leaves a process behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }

    fn spawn(command: &CommandLine) -> DockhandResult<Child> {
        tracing::debug!(command = %command, "Spawning engine process");
        command.to_command().spawn().map_err(|e| {
            tracing::debug!(program = command.program(), error = %e, "Spawn failed");
            DockhandError::Io(e)
        })
    }
}

/// Write the stdin payload and close the pipe.
///
/// A child that exits without reading stdin closes its end early; that is
/// not an error for the caller, who still gets the exit code.
async fn feed_stdin(stdin: Option<ChildStdin>, payload: Option<Vec<u8>>) {
    let (Some(mut stdin), Some(payload)) = (stdin, payload) else {
        return;
    };
    if let Err(e) = stdin.write_all(&payload).await {
        tracing::debug!(error = %e, "Child closed stdin early");
        return;
    }
    let _ = stdin.shutdown().await;
}

/// Decode one raw line, dropping its `\n` or `\r\n` terminator.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Forward lines from `reader` into `tx` until EOF.
///
/// Lines are decoded lossily so invalid UTF-8 never stops the pipe from
/// being drained.
fn spawn_line_reader<R>(
    reader: R,
    tx: mpsc::UnboundedSender<OutputChunk>,
    stream: OutputStream,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    if tx.send(OutputChunk { stream, line }).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, ?stream, "Failed to read process output");
                    break;
                }
            }
        }
    });
}

#[async_trait]
impl ProcessExecutor for SystemExecutor {
    async fn run(&self, command: &CommandLine) -> DockhandResult<ProcessOutput> {
        let mut child = Self::spawn(command)?;

        let stdin = child.stdin.take();
        let (_, output) = tokio::join!(
            feed_stdin(stdin, command.stdin_bytes()),
            child.wait_with_output()
        );
        let output = ProcessOutput::from(output?);

        tracing::debug!(
            command = %command,
            exit_code = output.exit_code,
            "Engine process finished"
        );
        Ok(output)
    }

    async fn run_streaming(
        &self,
        command: &CommandLine,
        on_output: &mut (dyn FnMut(OutputChunk) + Send),
        timeout: Duration,
    ) -> DockhandResult<ProcessOutput> {
        let mut child = Self::spawn(command)?;

        let stdin = child.stdin.take();
        let payload = command.stdin_bytes();
        tokio::spawn(feed_stdin(stdin, payload));

        let (tx, mut rx) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_line_reader(stdout, tx.clone(), OutputStream::Stdout);
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_line_reader(stderr, tx.clone(), OutputStream::Stderr);
        }
        // Channel closes once both readers hit EOF.
        drop(tx);

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        let mut output = ProcessOutput::default();
        let mut streams_open = true;
        let status = loop {
            tokio::select! {
                chunk = rx.recv(), if streams_open => match chunk {
                    Some(chunk) => {
                        let buffer = match chunk.stream {
                            OutputStream::Stdout => &mut output.stdout,
                            OutputStream::Stderr => &mut output.stderr,
                        };
                        buffer.push_str(&chunk.line);
                        buffer.push('\n');
                        on_output(chunk);
                    }
                    None => streams_open = false,
                },
                status = child.wait(), if !streams_open => break status?,
                _ = &mut deadline => {
                    tracing::warn!(
                        command = %command,
                        timeout = ?timeout,
                        "Engine process exceeded timeout, killing"
                    );
                    if let Err(e) = child.kill().await {
                        tracing::warn!(error = %e, "Failed to kill timed out process");
                    }
                    return Err(DockhandError::Timeout {
                        command: command.to_string(),
                        timeout,
                    });
                }
            }
        };

        output.exit_code = status.code().unwrap_or(-1);
        tracing::debug!(
            command = %command,
            exit_code = output.exit_code,
            "Streaming engine process finished"
        );
        Ok(output)
    }
}
