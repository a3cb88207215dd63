use crate::infrastructure::media::TranscodeError;
use crate::infrastructure::storage::StorageError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

impl JobError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Download,
    Transcode,
    Upload,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::Download => "download",
            Stage::Transcode => "transcode",
            Stage::Upload => "upload",
        };
        f.write_str(name)
    }
}

/// A failure tagged with the pipeline stage that produced it.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    pub source: JobError,
}

impl StageError {
    pub fn new(stage: Stage, source: impl Into<JobError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

pub trait StageResultExt<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T, E: Into<JobError>> StageResultExt<T> for Result<T, E> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|e| StageError::new(stage, e))
    }
}
