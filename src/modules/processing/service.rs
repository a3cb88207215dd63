use super::dto::{JobResponse, LocalTranscodeRequest, LocalTranscodeResponse, VideoEvent};
use super::error::JobError;
use super::pipeline::Outcome;
use crate::state::AppState;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use validator::Validate;

pub struct ProcessingService;

impl ProcessingService {
    /// Extracts the input key from a base64 `{"name": ...}` event payload.
    pub fn decode_event(data: &str) -> Result<String, JobError> {
        let raw = STANDARD
            .decode(data.trim())
            .map_err(|e| JobError::invalid(format!("message data is not valid base64: {}", e)))?;

        let event: VideoEvent = serde_json::from_slice(&raw)
            .map_err(|e| JobError::invalid(format!("message data is not a valid event: {}", e)))?;

        if event.name.trim().is_empty() {
            return Err(JobError::invalid("missing filename"));
        }
        Ok(event.name)
    }

    pub async fn process(state: AppState, input_key: &str) -> Result<JobResponse, Outcome> {
        let job = state
            .pipeline
            .prepare(input_key)
            .map_err(|e| Outcome::InvalidInput {
                reason: e.to_string(),
            })?;

        match state.pipeline.run(&job).await {
            Outcome::Success { output_key } => Ok(JobResponse {
                job_id: job.id,
                input_key: job.input_key,
                output_key,
            }),
            failed => Err(failed),
        }
    }

    /// Transcodes between two caller-supplied local paths, bypassing storage.
    pub async fn transcode_local(
        state: AppState,
        req: LocalTranscodeRequest,
    ) -> Result<LocalTranscodeResponse, JobError> {
        req.validate()
            .map_err(|_| JobError::invalid("Input and output file paths are required"))?;

        state
            .transcoder
            .transcode(
                Path::new(&req.input_file_path),
                Path::new(&req.output_file_path),
                state.pipeline.profile(),
            )
            .await?;

        Ok(LocalTranscodeResponse {
            input_file_path: req.input_file_path,
            output_file_path: req.output_file_path,
        })
    }
}
