use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber { key: String, value: String },
    #[error("Failed to load env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Submission tool `{0}` not found, is it installed and on PATH?")]
    ProgramNotFound(String),
    #[error("Submission tool `{0}` is not executable")]
    PermissionDenied(String),
    #[error("Failed to start submission tool `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

impl SubmitError {
    /// Exit status a shell would report for the same failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ProgramNotFound(_) => 127,
            Self::PermissionDenied(_) => 126,
            Self::Spawn { .. } => 1,
        }
    }
}
