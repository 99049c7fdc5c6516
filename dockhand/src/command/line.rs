//! Argv-style command line for the engine.
//!
//! Commands are executed directly (no shell), so user-supplied values are
//! never re-interpreted. The `Display` form reproduces the single-line shell
//! rendering used in logs and error messages. Arguments that would split or
//! expand differently in a shell are single-quoted there, and arguments added
//! with [`CommandLine::secret_arg`] are masked.

use std::fmt;
use std::process::Stdio;

/// Builder for one engine invocation: program, arguments and optional stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
    stdin: Option<String>,
    secrets: Vec<usize>,
}

const REDACTED: &str = "********";

/// Characters that would change how a displayed argument splits or expands.
const SHELL_SPECIAL: &[char] = &[
    '\'', '"', '\\', '|', '&', ';', '<', '>', '(', ')', '$', '`', '*', '?', '[', '#', '~',
];

/// Plain words (including `KEY=VALUE` and `host:port`) are shown as is.
fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || SHELL_SPECIAL.contains(&c))
}

impl CommandLine {
    /// Create a command line for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            secrets: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an argument that is masked when the command line is displayed.
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secrets.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    /// Feed `input` to the process on stdin, followed by a newline.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Text written to stdin, if any.
    pub fn stdin_payload(&self) -> Option<&str> {
        self.stdin.as_deref()
    }

    /// Program followed by every argument.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// Bytes written to the child's stdin.
    pub(crate) fn stdin_bytes(&self) -> Option<Vec<u8>> {
        self.stdin.as_ref().map(|input| {
            let mut bytes = input.clone().into_bytes();
            bytes.push(b'\n');
            bytes
        })
    }

    /// Build the tokio command with piped stdout/stderr.
    pub(crate) fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(input) = &self.stdin {
            write!(f, "echo \"{}\" | ", input)?;
        }
        f.write_str(&self.program)?;
        for (index, arg) in self.args.iter().enumerate() {
            if self.secrets.contains(&index) {
                write!(f, " {}", REDACTED)?;
            } else if needs_quoting(arg) {
                write!(f, " {}", shell_words::quote(arg))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
