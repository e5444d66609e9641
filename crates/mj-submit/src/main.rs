mod cli;
mod config;
mod error;
mod executor;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mj_core::JobVariant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::SubmitConfig;
use crate::error::SubmitError;
use crate::executor::JobSubmitter;

fn main() -> ExitCode {
    // stdout belongs to the submission tool
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            let code = e.downcast_ref::<SubmitError>().map_or(1, SubmitError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = SubmitConfig::load().context("Failed to load configuration")?;
    let variant = JobVariant::from(cli.command);

    let job = config
        .job_builder(variant)
        .build()
        .with_context(|| format!("Failed to build {} job", variant.id()))?;
    let submitter = JobSubmitter::from_command_line(&config.submitter)
        .context("MJ_SUBMITTER names no program")?;

    if cli.dry_run {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&job)?);
        } else {
            println!("{}", submitter.command_line(&job));
        }
        return Ok(ExitCode::SUCCESS);
    }

    info!("{}: {}", variant.name(), variant.description());
    let outcome = submitter.submit(&job)?;
    let code = outcome.exit_code();

    if outcome.success() {
        info!("Job {} accepted", job.job_name);
    } else {
        warn!("{} exited with status {}", submitter.program(), code);
    }

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
