use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildError {
    #[error("Variant `{0}` needs a bucket name but none was given")]
    MissingBucket(String),
    #[error("Invalid bucket name `{0}`")]
    InvalidBucket(String),
}
