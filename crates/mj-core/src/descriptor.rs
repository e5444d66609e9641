use serde::Serialize;

use crate::job_name::JobName;
use crate::variant::JobVariant;

/// Subcommand path of the platform CLI that submits a training job
pub const SUBMIT_COMMAND: [&str; 4] = ["ai-platform", "jobs", "submit", "training"];

/// Everything needed to submit one job. Built once, submitted once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptor {
    pub variant: JobVariant,
    pub job_name: JobName,
    pub python_version: String,
    pub runtime_version: String,
    pub scale_tier: String,
    pub package_path: String,
    pub module_name: String,
    pub region: String,
    pub job_dir: String,
    pub hypertune_config_path: Option<String>,
    /// Passed to the trainer entry point after `--`
    pub extra_args: Vec<String>,
}

impl JobDescriptor {
    /// Argument list for the platform CLI, without the program itself
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = SUBMIT_COMMAND.iter().map(|s| s.to_string()).collect();
        args.push(self.job_name.to_string());

        let flags = [
            ("--python-version", &self.python_version),
            ("--runtime-version", &self.runtime_version),
            ("--scale-tier", &self.scale_tier),
            ("--package-path", &self.package_path),
            ("--module-name", &self.module_name),
            ("--region", &self.region),
            ("--job-dir", &self.job_dir),
        ];
        for (flag, value) in flags {
            args.push(flag.to_string());
            args.push(value.clone());
        }

        if let Some(config) = &self.hypertune_config_path {
            args.push("--config".to_string());
            args.push(config.clone());
        }

        if !self.extra_args.is_empty() {
            args.push("--".to_string());
            args.extend(self.extra_args.iter().cloned());
        }

        args
    }
}

/// Quote `arg` for a POSIX shell when it holds anything beyond plain word characters
pub fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
