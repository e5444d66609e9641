use std::env;
use std::path::PathBuf;

use mj_core::{JobBuilder, JobSettings, JobVariant, TrainingParams};
use tracing::{debug, info};

use crate::error::ConfigError;

const DEFAULT_SUBMITTER: &str = "gcloud";

#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Program (and leading arguments) that performs the submission
    pub submitter: String,
    pub settings: JobSettings,
    pub params: TrainingParams,
    /// Bucket for the variant that reads it from the environment
    pub bucket: Option<String>,
}

impl SubmitConfig {
    /// Read the optional env file, then the process environment
    pub fn load() -> Result<Self, ConfigError> {
        load_env_file()?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset; others are kept as given.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let defaults = JobSettings::default();
        let settings = JobSettings {
            python_version: get("MJ_PYTHON_VERSION").unwrap_or(defaults.python_version),
            runtime_version: get("MJ_RUNTIME_VERSION").unwrap_or(defaults.runtime_version),
            scale_tier: get("MJ_SCALE_TIER").unwrap_or(defaults.scale_tier),
            package_path: get("MJ_PACKAGE_PATH").unwrap_or(defaults.package_path),
            module_name: get("MJ_MODULE_NAME").unwrap_or(defaults.module_name),
            region: get("MJ_REGION").unwrap_or(defaults.region),
            fixed_bucket: get("MJ_FIXED_BUCKET").unwrap_or(defaults.fixed_bucket),
            hypertune_config_path: get("MJ_HYPERTUNE_CONFIG")
                .unwrap_or(defaults.hypertune_config_path),
            job_prefix: get("MJ_JOB_PREFIX"),
        };

        let default_params = TrainingParams::default();
        let params = TrainingParams {
            epochs: parse_number("EPOCHS", get("EPOCHS"))?.unwrap_or(default_params.epochs),
            batch_size: parse_number("BATCH_SIZE", get("BATCH_SIZE"))?
                .unwrap_or(default_params.batch_size),
        };

        Ok(Self {
            submitter: get("MJ_SUBMITTER").unwrap_or_else(|| DEFAULT_SUBMITTER.to_string()),
            settings,
            params,
            bucket: get("BUCKET"),
        })
    }

    /// Builder for `variant` carrying the configured values
    pub fn job_builder(&self, variant: JobVariant) -> JobBuilder {
        let builder = JobBuilder::new(variant, self.settings.clone()).params(self.params);
        match (&self.bucket, variant.requires_bucket()) {
            (Some(bucket), true) => builder.bucket(bucket.clone()),
            _ => builder,
        }
    }
}

fn parse_number(key: &str, value: Option<String>) -> Result<Option<u32>, ConfigError> {
    value
        .map(|v| {
            v.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                key: key.to_string(),
                value: v,
            })
        })
        .transpose()
}

fn load_env_file() -> Result<(), ConfigError> {
    let explicit = env::var_os("MJ_ENV_FILE").map(PathBuf::from);
    let path = explicit.clone().unwrap_or_else(|| PathBuf::from(".env"));

    match dotenvy::from_path(&path) {
        Ok(()) => {
            info!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() && explicit.is_none() => {
            debug!("No env file at {}", path.display());
            Ok(())
        }
        Err(source) => Err(ConfigError::EnvFile { path, source }),
    }
}
