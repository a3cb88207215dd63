use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- EVENT-DRIVEN MODE ---

/// Push delivery wrapping a storage notification.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PushRequest {
    pub message: PushMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Base64-encoded JSON object carrying the uploaded object's `name`.
    pub data: String,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Decoded `message.data`.
#[derive(Debug, Deserialize)]
pub struct VideoEvent {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub job_id: Uuid,
    pub input_key: String,
    pub output_key: String,
}

// --- SIMPLE MODE ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalTranscodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "inputFilePath is required"))]
    pub input_file_path: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "outputFilePath is required"))]
    pub output_file_path: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalTranscodeResponse {
    pub input_file_path: String,
    pub output_file_path: String,
}
