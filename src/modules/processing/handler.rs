use super::dto::{JobResponse, LocalTranscodeRequest, LocalTranscodeResponse, PushRequest};
use super::error::JobError;
use super::pipeline::Outcome;
use super::service::ProcessingService;
use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

/// Process a raw video announced by a storage notification
#[utoipa::path(
    post,
    path = "/api/v1/process-video",
    request_body = PushRequest,
    responses(
        (status = 200, description = "Video processed", body = ApiResponse<JobResponse>),
        (status = 400, description = "Missing or invalid input"),
        (status = 500, description = "Download, transcode or upload failed")
    ),
    tag = "Processing"
)]
pub async fn process_video(
    State(state): State<AppState>,
    payload: Result<Json<PushRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            return ApiError::bad_request(format!("Bad Request: {}", e.body_text())).into_response();
        }
    };

    info!(
        message_id = ?req.message.message_id,
        subscription = ?req.subscription,
        "📦 Received processing request"
    );

    let input_key = match ProcessingService::decode_event(&req.message.data) {
        Ok(key) => key,
        Err(e) => return ApiError::bad_request(format!("Bad Request: {}", e)).into_response(),
    };

    match ProcessingService::process(state, &input_key).await {
        Ok(job) => ApiSuccess(
            ApiResponse::success(job, "Processing finished successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(outcome) => outcome_error(outcome).into_response(),
    }
}

/// Transcode a local file to 360p
#[utoipa::path(
    post,
    path = "/api/v1/process-video/local",
    request_body = LocalTranscodeRequest,
    responses(
        (status = 200, description = "Video processed", body = ApiResponse<LocalTranscodeResponse>),
        (status = 400, description = "Input and output file paths are required"),
        (status = 500, description = "Error processing video")
    ),
    tag = "Processing"
)]
pub async fn process_local_video(
    State(state): State<AppState>,
    payload: Result<Json<LocalTranscodeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(e) => {
            return ApiError::bad_request(format!("Bad Request: {}", e.body_text())).into_response();
        }
    };

    match ProcessingService::transcode_local(state, req).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "Processing finished successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(JobError::InvalidInput(msg)) => ApiError::bad_request(msg).into_response(),
        Err(e) => ApiError::internal(format!("Error processing video: {}", e)).into_response(),
    }
}

pub fn outcome_status(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Success { .. } => StatusCode::OK,
        Outcome::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        Outcome::DownloadFailure { .. }
        | Outcome::TranscodeFailure { .. }
        | Outcome::UploadFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn outcome_error(outcome: Outcome) -> Response {
    let status = outcome_status(&outcome);
    let message = match &outcome {
        Outcome::Success { output_key } => format!("Processed {}", output_key),
        Outcome::InvalidInput { reason } => format!("Bad Request: {}", reason),
        Outcome::DownloadFailure { reason } => format!("Error downloading video: {}", reason),
        Outcome::TranscodeFailure { reason } => format!("Error processing video: {}", reason),
        Outcome::UploadFailure { reason } => format!("Error uploading video: {}", reason),
    };
    ApiError(message, status).into_response()
}
