use serde::Serialize;

/// The three submission flavours shipped with the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobVariant {
    Train,
    Hypertune,
    HypertuneBucket,
}

impl JobVariant {
    /// Name for display in logs
    pub fn name(&self) -> &str {
        match self {
            Self::Train => "Training",
            Self::Hypertune => "Hyperparameter tuning",
            Self::HypertuneBucket => "Hyperparameter tuning (bucket from env)",
        }
    }

    /// Identifier used as the CLI subcommand
    pub fn id(&self) -> &str {
        match self {
            Self::Train => "train",
            Self::Hypertune => "hypertune",
            Self::HypertuneBucket => "hypertune-bucket",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        match self {
            Self::Train => "Plain training run with fixed epochs and batch size",
            Self::Hypertune => "Tuning run against the fixed project bucket",
            Self::HypertuneBucket => "Tuning run against the bucket named by BUCKET",
        }
    }

    /// Default prefix of the generated job name
    pub fn job_prefix(&self) -> &str {
        match self {
            Self::Train => "mnist_train",
            Self::Hypertune | Self::HypertuneBucket => "mnist_hypertune",
        }
    }

    pub fn is_tuning(&self) -> bool {
        matches!(self, Self::Hypertune | Self::HypertuneBucket)
    }

    /// Whether the bucket must be supplied by the caller instead of the fixed one
    pub fn requires_bucket(&self) -> bool {
        matches!(self, Self::HypertuneBucket)
    }

    /// Whether the trainer is told where to write the exported model
    pub fn forwards_model_output(&self) -> bool {
        matches!(self, Self::Train | Self::Hypertune)
    }

    /// All available variants
    pub fn all() -> [JobVariant; 3] {
        [Self::Train, Self::Hypertune, Self::HypertuneBucket]
    }
}
