use std::io::{self, Read};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandFailure {
    #[error("failed launching {program}: {reason}")]
    Launch { program: String, reason: String },
    #[error("{program} exited with {}", exit_label(.code))]
    Exit { program: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Merged stdout/stderr of one finished command.
///
/// `text` is populated on failure as well so diagnostics survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub failure: Option<CommandFailure>,
}

impl CommandOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failure: None,
        }
    }

    pub fn failed(text: impl Into<String>, failure: CommandFailure) -> Self {
        Self {
            text: text.into(),
            failure: Some(failure),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_result(self) -> Result<String, CommandFailure> {
        match self.failure {
            None => Ok(self.text),
            Some(failure) => Err(failure),
        }
    }
}

pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput;
}

/// Runs commands on the host, blocking until each one exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        match run_merged(program, args) {
            Ok((text, status)) if status.success() => CommandOutput::success(text),
            Ok((text, status)) => CommandOutput::failed(
                text,
                CommandFailure::Exit {
                    program: program.to_string(),
                    code: status.code(),
                },
            ),
            Err(err) => CommandOutput::failed(
                String::new(),
                CommandFailure::Launch {
                    program: program.to_string(),
                    reason: err.to_string(),
                },
            ),
        }
    }
}

// Both streams share one pipe so the captured text keeps the child's ordering.
fn run_merged(program: &str, args: &[&str]) -> io::Result<(String, ExitStatus)> {
    let (mut reader, writer) = io::pipe()?;
    let mut child = {
        let mut command = Command::new(program);
        command.args(args).stdout(writer.try_clone()?).stderr(writer);
        command.spawn()?
    };

    let mut raw = Vec::new();
    let read_result = reader.read_to_end(&mut raw);
    let status = child.wait()?;
    read_result?;

    // Invalid UTF-8 in the child's output is replaced with U+FFFD, so the
    // logged text is not byte-identical to what the command emitted.
    Ok((String::from_utf8_lossy(&raw).into_owned(), status))
}
