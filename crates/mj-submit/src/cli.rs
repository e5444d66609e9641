use clap::{Parser, Subcommand};
use mj_core::JobVariant;

/// Submit MNIST training jobs to the cloud ML platform
#[derive(Parser, Debug)]
#[command(name = "mj-submit", version)]
pub struct Cli {
    /// Print the submission command instead of running it
    #[arg(long, global = true)]
    pub dry_run: bool,
    /// With --dry-run, print the job descriptor as JSON
    #[arg(long, global = true, requires = "dry_run")]
    pub json: bool,
    #[command(subcommand)]
    pub command: JobCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCommand {
    /// Plain training run (EPOCHS, BATCH_SIZE)
    Train,
    /// Hyperparameter tuning against the fixed bucket
    Hypertune,
    /// Hyperparameter tuning against the bucket named by BUCKET
    HypertuneBucket,
}

impl From<JobCommand> for JobVariant {
    fn from(command: JobCommand) -> Self {
        match command {
            JobCommand::Train => JobVariant::Train,
            JobCommand::Hypertune => JobVariant::Hypertune,
            JobCommand::HypertuneBucket => JobVariant::HypertuneBucket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommand_names_match_variant_ids() {
        for variant in JobVariant::all() {
            let cli = Cli::try_parse_from(["mj-submit", variant.id()]).unwrap();
            assert_eq!(JobVariant::from(cli.command), variant);
            assert!(!cli.dry_run);
        }
    }

    #[test]
    fn test_dry_run_flags() {
        let cli = Cli::try_parse_from(["mj-submit", "hypertune", "--dry-run", "--json"]).unwrap();
        assert!(cli.dry_run && cli.json);
        assert_eq!(cli.command, JobCommand::Hypertune);
    }

    #[test]
    fn test_json_requires_dry_run() {
        assert!(Cli::try_parse_from(["mj-submit", "train", "--json"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["mj-submit"]).is_err());
    }
}
