//! System Command Runner
//!
//! Runs host commands with a hard deadline.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::domain::ports::{CommandError, CommandOutput, CommandRunner, CommandSpec};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const REAP_TIMEOUT: Duration = Duration::from_secs(2);
const MAX_CAPTURED_BYTES: u64 = 64 * 1024;

/// Executes commands as child processes
///
/// Output is captured into anonymous temp files rather than pipes. `service
/// smt start` forks a daemon that inherits the child's descriptors, and a pipe
/// reader would wait for that daemon to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandSpec, timeout: Duration) -> Result<CommandOutput, CommandError> {
        let failed = |message: String| CommandError::ExecutionFailed {
            command: command.to_string(),
            exit_info: message,
        };

        let mut stdout = tempfile::tempfile().map_err(|e| failed(e.to_string()))?;
        let mut stderr = tempfile::tempfile().map_err(|e| failed(e.to_string()))?;

        let spawn_stdout = stdout.try_clone().map_err(|e| failed(e.to_string()))?;
        let spawn_stderr = stderr.try_clone().map_err(|e| failed(e.to_string()))?;

        tracing::debug!(command = %command, timeout_secs = timeout.as_secs(), "spawning");
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(spawn_stdout))
            .stderr(Stdio::from(spawn_stderr))
            .spawn()
            .map_err(|e| failed(format!("could not start {}: {}", command.program, e)))?;

        let status = match wait_with_deadline(&mut child, timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                tracing::warn!(command = %command, "command timed out, killing");
                let _ = child.kill();
                let _ = reap(&mut child);
                return Err(CommandError::Timeout {
                    command: command.to_string(),
                    timeout,
                });
            }
            Err(e) => {
                let _ = child.kill();
                let _ = reap(&mut child);
                return Err(failed(e.to_string()));
            }
        };

        Ok(CommandOutput {
            code: status.code(),
            stdout: read_captured(&mut stdout),
            stderr: read_captured(&mut stderr),
        })
    }
}

/// Poll until the child exits or `timeout` elapses (`Ok(None)`)
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Collect a killed child without blocking forever
fn reap(child: &mut Child) -> Option<ExitStatus> {
    let deadline = Instant::now() + REAP_TIMEOUT;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() < deadline => std::thread::sleep(POLL_INTERVAL),
            _ => return None,
        }
    }
}

fn read_captured(file: &mut File) -> String {
    let mut buf = Vec::new();
    if file.seek(SeekFrom::Start(0)).is_ok() {
        let _ = file.by_ref().take(MAX_CAPTURED_BYTES).read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}
