//! Service Reconciler Domain Service
//!
//! Pushes the SMT service toward the declared enabled/disabled intent.
//! This is a one-way push: the current service state is never queried, so a
//! service that is already running gets `start` again.

use std::time::Duration;

use crate::domain::ports::{CommandError, CommandRunner, CommandSpec};
use crate::domain::value_objects::ServiceAction;

/// The service to control and the tool that controls it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTarget {
    /// Service manager executable, e.g. `service`
    pub program: String,
    /// Service name, e.g. `smt`
    pub name: String,
}

impl ServiceTarget {
    pub fn new(program: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            name: name.into(),
        }
    }
}

/// Issues start/stop commands for one service
pub struct ServiceReconciler<CR: CommandRunner> {
    runner: CR,
    target: ServiceTarget,
    timeout: Duration,
}

impl<CR: CommandRunner> ServiceReconciler<CR> {
    pub fn new(runner: CR, target: ServiceTarget, timeout: Duration) -> Self {
        Self {
            runner,
            target,
            timeout,
        }
    }

    /// Command that realizes `desired_enabled`
    pub fn command_for(&self, desired_enabled: bool) -> CommandSpec {
        let verb = if desired_enabled { "start" } else { "stop" };
        CommandSpec::new(self.target.program.as_str())
            .arg(self.target.name.as_str())
            .arg(verb)
    }

    /// Start or stop the service. Exactly one attempt, no retries.
    pub fn apply(&self, desired_enabled: bool) -> Result<ServiceAction, CommandError> {
        let command = self.command_for(desired_enabled);
        tracing::info!(command = %command, "reconciling service");

        let output = self.runner.run(&command, self.timeout)?;
        if !output.success() {
            return Err(CommandError::ExecutionFailed {
                command: command.to_string(),
                exit_info: output.exit_info(),
            });
        }

        Ok(if desired_enabled {
            ServiceAction::Started
        } else {
            ServiceAction::Stopped
        })
    }
}
