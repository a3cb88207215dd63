use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Transcode failed: {reason}")]
pub struct TranscodeError {
    /// Diagnostic text from the underlying tool.
    pub reason: String,
}

impl TranscodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Target parameters for a transcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeProfile {
    pub target_height: u32,
    pub preserve_aspect_ratio: bool,
}

impl TranscodeProfile {
    pub const P360: Self = Self {
        target_height: 360,
        preserve_aspect_ratio: true,
    };

    /// ffmpeg `-vf` expression for this profile.
    ///
    /// `-2` lets ffmpeg compute the width from the aspect ratio, rounded to an
    /// even number so H.264 encoders accept it.
    pub fn video_filter(&self) -> String {
        if self.preserve_aspect_ratio {
            format!("scale=-2:{}", self.target_height)
        } else {
            format!("scale=iw:{}", self.target_height)
        }
    }
}

impl Default for TranscodeProfile {
    fn default() -> Self {
        Self::P360
    }
}

/// Turns a local input file into a local output file.
///
/// A failed call may leave a truncated or empty file at `output`.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        profile: &TranscodeProfile,
    ) -> Result<(), TranscodeError>;
}
