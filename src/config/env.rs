use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    S3Endpoint,
    S3Region,
    S3AccessKey,
    S3SecretKey,
    RawBucket,
    ProcessedBucket,
    RawDir,
    ProcessedDir,
    FfmpegPath,
    AmqpUrl,
    TranscodeQueue,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::S3Region => "S3_REGION",
            EnvKey::S3AccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::S3SecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::RawBucket => "RAW_VIDEO_BUCKET",
            EnvKey::ProcessedBucket => "PROCESSED_VIDEO_BUCKET",
            EnvKey::RawDir => "RAW_VIDEO_DIR",
            EnvKey::ProcessedDir => "PROCESSED_VIDEO_DIR",
            EnvKey::FfmpegPath => "FFMPEG_PATH",
            EnvKey::AmqpUrl => "AMQP_URL",
            EnvKey::TranscodeQueue => "TRANSCODE_QUEUE",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

/// Unset and blank values are both treated as absent.
pub fn get_opt(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
