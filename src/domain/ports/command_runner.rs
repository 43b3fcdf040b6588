//! CommandRunner port - executes host commands
//!
//! The service reconciler issues `service <name> start|stop` through this
//! port. Implementations must bound execution time.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of a command that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Short description of how the command exited
    pub fn exit_info(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{}: {}", status, stderr)
        }
    }
}

/// Command execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Spawn failure or non-zero exit
    #[error("`{command}` failed: {exit_info}")]
    ExecutionFailed { command: String, exit_info: String },

    /// Still running when the deadline passed; the process was killed
    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },
}

/// Abstract command execution
pub trait CommandRunner {
    /// Run `command`, killing it if it outlives `timeout`.
    ///
    /// A non-zero exit is NOT an error at this level; callers decide.
    fn run(&self, command: &CommandSpec, timeout: Duration) -> Result<CommandOutput, CommandError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &CommandSpec, timeout: Duration) -> Result<CommandOutput, CommandError> {
        (**self).run(command, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display_joins_args() {
        let spec = CommandSpec::new("service").arg("smt").arg("start");
        assert_eq!(spec.to_string(), "service smt start");
    }

    #[test]
    fn exit_info_includes_stderr() {
        let output = CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "smt does not exist in /etc/rc.d\n".to_string(),
        };
        assert!(!output.success());
        assert_eq!(
            output.exit_info(),
            "exit status 1: smt does not exist in /etc/rc.d"
        );
    }

    #[test]
    fn timeout_display() {
        let err = CommandError::Timeout {
            command: "service smt stop".to_string(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "`service smt stop` timed out after 30s");
    }
}
