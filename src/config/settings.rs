use crate::config::env::{self, EnvKey};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_RAW_DIR: &str = "./raw-videos";
pub const DEFAULT_PROCESSED_DIR: &str = "./processed-videos";

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub storage: StorageConfig,
    pub staging: StagingConfig,
    pub ffmpeg_path: PathBuf,
    pub amqp_url: Option<String>,
    pub transcode_queue: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    /// Custom S3 endpoint (MinIO and friends). `None` uses the regional AWS endpoint.
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub raw_bucket: String,
    pub processed_bucket: String,
}

/// Local directories holding a job's files while it runs.
#[derive(Clone, Debug, Deserialize)]
pub struct StagingConfig {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            storage: StorageConfig {
                endpoint: env::get_opt(EnvKey::S3Endpoint),
                region: env::get_or(EnvKey::S3Region, "us-east-1"),
                access_key: env::get(EnvKey::S3AccessKey)?,
                secret_key: env::get(EnvKey::S3SecretKey)?,
                raw_bucket: env::get(EnvKey::RawBucket)?,
                processed_bucket: env::get(EnvKey::ProcessedBucket)?,
            },
            staging: StagingConfig {
                raw_dir: env::get_or(EnvKey::RawDir, DEFAULT_RAW_DIR).into(),
                processed_dir: env::get_or(EnvKey::ProcessedDir, DEFAULT_PROCESSED_DIR).into(),
            },
            ffmpeg_path: env::get_or(EnvKey::FfmpegPath, "ffmpeg").into(),
            amqp_url: env::get_opt(EnvKey::AmqpUrl),
            transcode_queue: env::get_or(EnvKey::TranscodeQueue, "video_uploads"),
        })
    }
}
