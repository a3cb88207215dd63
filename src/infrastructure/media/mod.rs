pub mod completion;
pub mod ffmpeg;
pub mod transcoder;

pub use ffmpeg::FfmpegTranscoder;
pub use transcoder::{TranscodeError, TranscodeProfile, Transcoder};
