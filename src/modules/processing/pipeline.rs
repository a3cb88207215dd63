use super::error::{JobError, Stage, StageError, StageResultExt};
use super::job::Job;
use super::locks::KeyedLocks;
use crate::infrastructure::media::{TranscodeProfile, Transcoder};
use crate::infrastructure::storage::{BucketRole, StorageGateway};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};

/// Terminal result of one job execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { output_key: String },
    InvalidInput { reason: String },
    DownloadFailure { reason: String },
    TranscodeFailure { reason: String },
    UploadFailure { reason: String },
}

impl From<StageError> for Outcome {
    fn from(err: StageError) -> Self {
        let reason = err.source.to_string();
        match err.stage {
            Stage::Validate => Outcome::InvalidInput { reason },
            Stage::Download => Outcome::DownloadFailure { reason },
            Stage::Transcode => Outcome::TranscodeFailure { reason },
            Stage::Upload => Outcome::UploadFailure { reason },
        }
    }
}

/// Download → transcode → upload → cleanup for a single raw video.
///
/// Whatever stage fails, both staging files are removed before the outcome is
/// reported. Jobs sharing an input key are serialized; the second one starts
/// after the first has cleaned up.
#[derive(Clone)]
pub struct JobPipeline {
    storage: StorageGateway,
    transcoder: Arc<dyn Transcoder>,
    profile: TranscodeProfile,
    locks: KeyedLocks,
}

impl JobPipeline {
    pub fn new(storage: StorageGateway, transcoder: Arc<dyn Transcoder>) -> Self {
        Self {
            storage,
            transcoder,
            profile: TranscodeProfile::P360,
            locks: KeyedLocks::new(),
        }
    }

    pub fn profile(&self) -> &TranscodeProfile {
        &self.profile
    }

    /// Validates the key and derives the job's names. Touches nothing.
    pub fn prepare(&self, input_key: &str) -> Result<Job, JobError> {
        Job::new(input_key, &self.storage)
    }

    pub async fn execute(&self, input_key: &str) -> Outcome {
        match self.prepare(input_key) {
            Ok(job) => self.run(&job).await,
            Err(e) => {
                warn!("Rejected job for {:?}: {}", input_key, e);
                StageError::new(Stage::Validate, e).into()
            }
        }
    }

    /// The job runs on its own task, so dropping the caller never interrupts
    /// it between download and cleanup.
    pub async fn run(&self, job: &Job) -> Outcome {
        let span = info_span!("job", id = %job.id, key = %job.input_key);
        let pipeline = self.clone();
        let owned = job.clone();
        let handle =
            tokio::spawn(async move { pipeline.run_locked(&owned).await }.instrument(span));

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Job task for {} did not finish: {}", job.input_key, e);
                Outcome::TranscodeFailure {
                    reason: format!("job task aborted: {}", e),
                }
            }
        }
    }

    async fn run_locked(&self, job: &Job) -> Outcome {
        let _guard = self.locks.acquire(&job.input_key).await;

        if let Err(e) = self.check_pending(job).await {
            warn!("Job not started: {}", e);
            return e.into();
        }

        info!("Processing {} -> {}", job.input_key, job.output_key);
        let result = self.run_stages(job).await;
        self.cleanup(job).await;

        match result {
            Ok(()) => {
                info!("✅ Job completed: {}", job.output_key);
                Outcome::Success {
                    output_key: job.output_key.clone(),
                }
            }
            Err(e) => {
                error!("❌ Job failed: {}", e);
                e.into()
            }
        }
    }

    /// The raw object has to exist before anything is written locally.
    async fn check_pending(&self, job: &Job) -> Result<(), StageError> {
        let exists = self
            .storage
            .exists(BucketRole::Raw, &job.input_key)
            .await
            .at(Stage::Download)?;

        if !exists {
            return Err(StageError::new(
                Stage::Validate,
                JobError::invalid(format!("no pending video named '{}'", job.input_key)),
            ));
        }
        Ok(())
    }

    async fn run_stages(&self, job: &Job) -> Result<(), StageError> {
        self.storage
            .fetch(BucketRole::Raw, &job.input_key)
            .await
            .at(Stage::Download)?;

        self.transcoder
            .transcode(&job.local_input_path, &job.local_output_path, &self.profile)
            .await
            .at(Stage::Transcode)?;

        self.storage
            .store(BucketRole::Processed, &job.local_output_path, &job.output_key)
            .await
            .at(Stage::Upload)?;

        Ok(())
    }

    /// Best effort: a leftover staging file is logged, never escalated.
    async fn cleanup(&self, job: &Job) {
        let (input, output) = tokio::join!(
            self.storage.delete_local(&job.local_input_path),
            self.storage.delete_local(&job.local_output_path),
        );

        for (path, result) in [(&job.local_input_path, input), (&job.local_output_path, output)] {
            if let Err(e) = result {
                warn!("Failed to delete {}: {}", path.display(), e);
            }
        }
    }
}
