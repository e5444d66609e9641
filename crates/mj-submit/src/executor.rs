use std::io::ErrorKind;
use std::process::{Command, ExitStatus, Stdio};

use mj_core::JobDescriptor;
use mj_core::descriptor::shell_quote;
use tracing::{debug, info};

use crate::error::SubmitError;

/// Hands a job to the platform CLI and reports its exit status.
/// The child's output is passed through untouched.
#[derive(Debug, Clone)]
pub struct JobSubmitter {
    program: String,
    leading_args: Vec<String>,
}

impl JobSubmitter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Split a whitespace-separated command such as `gcloud --quiet`
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts.next()?;
        Some(Self {
            leading_args: parts.collect(),
            ..Self::new(program)
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Shell rendering of the full invocation
    pub fn command_line(&self, job: &JobDescriptor) -> String {
        let mut line = shell_quote(&self.program);
        for arg in self.leading_args.iter().chain(job.to_args().iter()) {
            line.push(' ');
            line.push_str(&shell_quote(arg));
        }
        line
    }

    /// Blocks until the submission tool exits. The remote job itself is not awaited.
    pub fn submit(&self, job: &JobDescriptor) -> Result<SubmitOutcome, SubmitError> {
        info!("Submitting {} job {}", job.variant.id(), job.job_name);
        debug!("Running {}", self.command_line(job));

        let status = Command::new(&self.program)
            .args(&self.leading_args)
            .args(job.to_args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => SubmitError::ProgramNotFound(self.program.clone()),
                ErrorKind::PermissionDenied => SubmitError::PermissionDenied(self.program.clone()),
                _ => SubmitError::Spawn {
                    program: self.program.clone(),
                    source,
                },
            })?;

        Ok(SubmitOutcome { status })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SubmitOutcome {
    status: ExitStatus,
}

impl SubmitOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The child's exit code; a signal-terminated child maps to `128 + signal`
    pub fn exit_code(&self) -> i32 {
        self.status
            .code()
            .unwrap_or_else(|| signal_exit_code(&self.status))
    }
}

#[cfg(unix)]
fn signal_exit_code(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map_or(1, |signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: &ExitStatus) -> i32 {
    1
}
