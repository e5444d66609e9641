use log::debug;

use crate::descriptor::JobDescriptor;
use crate::error::BuildError;
use crate::job_name::JobName;
use crate::settings::{JobSettings, TrainingParams};
use crate::variant::JobVariant;

/// Assembles a [`JobDescriptor`] from static settings, per-run values and the clock
#[derive(Debug, Clone)]
pub struct JobBuilder {
    variant: JobVariant,
    settings: JobSettings,
    bucket: Option<String>,
    params: TrainingParams,
    timestamp: Option<i64>,
}

impl JobBuilder {
    pub fn new(variant: JobVariant, settings: JobSettings) -> Self {
        Self {
            variant,
            settings,
            bucket: None,
            params: TrainingParams::default(),
            timestamp: None,
        }
    }

    /// Bucket to use instead of the fixed one. Required for [`JobVariant::HypertuneBucket`].
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    pub fn params(mut self, params: TrainingParams) -> Self {
        self.params = params;
        self
    }

    /// Pin the job-name timestamp instead of reading the clock
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn build(self) -> Result<JobDescriptor, BuildError> {
        let variant = self.variant;
        let settings = self.settings;

        let bucket = match (self.bucket, variant.requires_bucket()) {
            (Some(bucket), _) => bucket,
            (None, false) => settings.fixed_bucket.clone(),
            (None, true) => return Err(BuildError::MissingBucket(variant.id().to_string())),
        };
        validate_bucket(&bucket)?;

        let prefix = settings
            .job_prefix
            .clone()
            .unwrap_or_else(|| variant.job_prefix().to_string());
        let job_name = match self.timestamp {
            Some(ts) => JobName::new(prefix, ts),
            None => JobName::now(prefix),
        };

        let mut extra_args = Vec::new();
        if variant == JobVariant::Train {
            extra_args.extend([
                "--epochs".to_string(),
                self.params.epochs.to_string(),
                "--batch-size".to_string(),
                self.params.batch_size.to_string(),
            ]);
        }
        if variant.forwards_model_output() {
            extra_args.push("--model-output-path".to_string());
            extra_args.push(format!("gs://{bucket}/model"));
        }
        if variant.is_tuning() {
            extra_args.push("--hypertune".to_string());
        }

        let descriptor = JobDescriptor {
            variant,
            job_name,
            python_version: settings.python_version,
            runtime_version: settings.runtime_version,
            scale_tier: settings.scale_tier,
            package_path: settings.package_path,
            module_name: settings.module_name,
            region: settings.region,
            job_dir: format!("gs://{bucket}/tmp"),
            hypertune_config_path: variant.is_tuning().then_some(settings.hypertune_config_path),
            extra_args,
        };

        debug!("Built {} job {}", variant.id(), descriptor.job_name);

        Ok(descriptor)
    }
}

fn validate_bucket(bucket: &str) -> Result<(), BuildError> {
    if bucket.is_empty() || bucket.contains('/') || bucket.chars().any(char::is_whitespace) {
        return Err(BuildError::InvalidBucket(bucket.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1700000000;

    fn build(variant: JobVariant) -> JobDescriptor {
        JobBuilder::new(variant, JobSettings::default())
            .bucket("my-bucket")
            .timestamp(TS)
            .build()
            .unwrap()
    }

    fn count(args: &[String], flag: &str) -> usize {
        args.iter().filter(|a| *a == flag).count()
    }

    fn value_of<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        let pos = args.iter().position(|a| a == flag)?;
        args.get(pos + 1).map(String::as_str)
    }

    #[test]
    fn test_fixed_flags_appear_once() {
        for variant in JobVariant::all() {
            let args = build(variant).to_args();
            let expected = [
                ("--python-version", "3.7"),
                ("--runtime-version", "2.1"),
                ("--scale-tier", "BASIC"),
                ("--package-path", "trainer"),
                ("--module-name", "trainer.task"),
                ("--region", "europe-west1"),
            ];
            for (flag, value) in expected {
                assert_eq!(count(&args, flag), 1, "{flag} in {}", variant.id());
                assert_eq!(value_of(&args, flag), Some(value));
            }
            assert_eq!(count(&args, "--job-dir"), 1);
        }
    }

    #[test]
    fn test_job_name_pattern() {
        let before = chrono::Utc::now().timestamp();
        let job = JobBuilder::new(JobVariant::Train, JobSettings::default())
            .build()
            .unwrap();
        let after = chrono::Utc::now().timestamp();

        let rendered = job.job_name.to_string();
        let parsed = JobName::parse(&rendered).unwrap();
        assert_eq!(parsed.prefix(), "mnist_train");
        assert!(parsed.timestamp() >= before && parsed.timestamp() <= after);
    }

    #[test]
    fn test_train_forwards_params() {
        let job = JobBuilder::new(JobVariant::Train, JobSettings::default())
            .params(TrainingParams { epochs: 5, batch_size: 32 })
            .timestamp(TS)
            .build()
            .unwrap();

        assert_eq!(
            job.extra_args,
            vec![
                "--epochs", "5",
                "--batch-size", "32",
                "--model-output-path", "gs://mnist-training-bucket/model",
            ]
        );
        assert!(job.hypertune_config_path.is_none());
        assert_eq!(count(&job.to_args(), "--hypertune"), 0);
    }

    #[test]
    fn test_train_defaults() {
        let job = JobBuilder::new(JobVariant::Train, JobSettings::default())
            .timestamp(TS)
            .build()
            .unwrap();
        let args = job.to_args();

        assert_eq!(value_of(&args, "--epochs"), Some("30"));
        assert_eq!(value_of(&args, "--batch-size"), Some("1024"));
    }

    #[test]
    fn test_tuning_variants_forward_hypertune_only() {
        for variant in [JobVariant::Hypertune, JobVariant::HypertuneBucket] {
            let args = build(variant).to_args();
            assert_eq!(count(&args, "--hypertune"), 1);
            assert_eq!(count(&args, "--epochs"), 0);
            assert_eq!(count(&args, "--batch-size"), 0);
            assert_eq!(value_of(&args, "--config"), Some("hptuning_config.yaml"));
        }
    }

    #[test]
    fn test_fixed_bucket_hypertune_uses_fixed_bucket() {
        let job = JobBuilder::new(JobVariant::Hypertune, JobSettings::default())
            .timestamp(TS)
            .build()
            .unwrap();

        assert_eq!(job.job_dir, "gs://mnist-training-bucket/tmp");
        assert_eq!(
            job.extra_args,
            vec!["--model-output-path", "gs://mnist-training-bucket/model", "--hypertune"]
        );
    }

    #[test]
    fn test_parameterized_bucket() {
        let job = build(JobVariant::HypertuneBucket);
        let args = job.to_args();

        assert_eq!(job.job_dir, "gs://my-bucket/tmp");
        assert_eq!(job.extra_args, vec!["--hypertune"]);
        assert!(
            args.iter()
                .filter(|a| a.starts_with("gs://"))
                .all(|a| a.starts_with("gs://my-bucket/"))
        );
    }

    #[test]
    fn test_parameterized_bucket_required() {
        let err = JobBuilder::new(JobVariant::HypertuneBucket, JobSettings::default())
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::MissingBucket("hypertune-bucket".into()));
    }

    #[test]
    fn test_invalid_bucket_rejected() {
        for bad in ["", "a/b", "my bucket"] {
            let err = JobBuilder::new(JobVariant::HypertuneBucket, JobSettings::default())
                .bucket(bad)
                .build()
                .unwrap_err();
            assert_eq!(err, BuildError::InvalidBucket(bad.into()));
        }
    }

    #[test]
    fn test_prefix_override() {
        let settings = JobSettings {
            job_prefix: Some("nightly".into()),
            ..JobSettings::default()
        };
        let job = JobBuilder::new(JobVariant::Hypertune, settings)
            .timestamp(TS)
            .build()
            .unwrap();
        assert_eq!(job.job_name.to_string(), "nightly_1700000000");
    }
}
