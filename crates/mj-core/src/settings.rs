use serde::Serialize;

/// Static flags passed to every submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSettings {
    pub python_version: String,
    pub runtime_version: String,
    pub scale_tier: String,
    pub package_path: String,
    pub module_name: String,
    pub region: String,
    /// Bucket used by the variants that do not take one from the environment
    pub fixed_bucket: String,
    pub hypertune_config_path: String,
    /// Replaces the variant's own job-name prefix when set
    pub job_prefix: Option<String>,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            python_version: "3.7".into(),
            runtime_version: "2.1".into(),
            scale_tier: "BASIC".into(),
            package_path: "trainer".into(),
            module_name: "trainer.task".into(),
            region: "europe-west1".into(),
            fixed_bucket: "mnist-training-bucket".into(),
            hypertune_config_path: "hptuning_config.yaml".into(),
            job_prefix: None,
        }
    }
}

/// Hyperparameters forwarded to the trainer on plain training runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingParams {
    pub epochs: u32,
    pub batch_size: u32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 30,
            batch_size: 1024,
        }
    }
}
