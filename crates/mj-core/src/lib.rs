pub mod builder;
pub mod descriptor;
pub mod error;
mod job_name;
mod settings;
mod variant;

pub use builder::JobBuilder;
pub use descriptor::JobDescriptor;
pub use error::BuildError;
pub use job_name::JobName;
pub use settings::{JobSettings, TrainingParams};
pub use variant::JobVariant;
