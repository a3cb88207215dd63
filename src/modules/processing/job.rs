use super::error::JobError;
use crate::infrastructure::storage::{BucketRole, StorageGateway};
use std::path::PathBuf;
use uuid::Uuid;

pub const OUTPUT_KEY_PREFIX: &str = "processed-";

/// Key of the processed object for a raw video key.
pub fn output_key(input_key: &str) -> String {
    format!("{}{}", OUTPUT_KEY_PREFIX, input_key)
}

/// One raw video to transcode, with every name derived from its key.
#[derive(Debug, Clone)]
pub struct Job {
    /// Correlation id for logs and responses.
    pub id: Uuid,
    pub input_key: String,
    pub output_key: String,
    pub local_input_path: PathBuf,
    pub local_output_path: PathBuf,
}

impl Job {
    pub fn new(input_key: &str, storage: &StorageGateway) -> Result<Self, JobError> {
        validate_key(input_key)?;

        let output_key = output_key(input_key);
        Ok(Self {
            id: Uuid::new_v4(),
            local_input_path: storage.local_path(BucketRole::Raw, input_key),
            local_output_path: storage.local_path(BucketRole::Processed, &output_key),
            input_key: input_key.to_string(),
            output_key,
        })
    }
}

/// The key doubles as a local filename, so it must not be able to leave the
/// staging directory.
pub fn validate_key(key: &str) -> Result<(), JobError> {
    if key.trim().is_empty() {
        return Err(JobError::invalid("missing filename"));
    }
    if key == "." || key == ".." {
        return Err(JobError::invalid(format!("'{}' is not a filename", key)));
    }
    if key.contains(['/', '\\', '\0']) {
        return Err(JobError::invalid(format!(
            "'{}' must be a plain filename without path separators",
            key
        )));
    }
    Ok(())
}
