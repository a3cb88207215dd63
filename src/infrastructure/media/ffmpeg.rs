use super::completion::Completion;
use super::transcoder::{TranscodeError, TranscodeProfile, Transcoder};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Lines of ffmpeg stderr kept for the failure diagnostic.
const STDERR_TAIL_LINES: usize = 20;

type TranscodeResult = Result<(), TranscodeError>;

/// Runs the `ffmpeg` binary as a child process.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn build_args(input: &Path, output: &Path, profile: &TranscodeProfile) -> Vec<OsString> {
        vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-i".into(),
            input.into(),
            "-vf".into(),
            profile.video_filter().into(),
            output.into(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        profile: &TranscodeProfile,
    ) -> TranscodeResult {
        let args = Self::build_args(input, output, profile);
        debug!("Running {} {:?}", self.binary.display(), args);

        let child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                TranscodeError::new(format!("Failed to start {}: {}", self.binary.display(), e))
            })?;

        info!(
            "🎥 Transcoding {} -> {} ({})",
            input.display(),
            output.display(),
            profile.video_filter()
        );

        let (completion, done) = Completion::new();
        tokio::spawn(supervise(child, output.to_path_buf(), completion));

        done.await.unwrap_or_else(|_| {
            Err(TranscodeError::new(
                "ffmpeg supervisor stopped without reporting a result",
            ))
        })
    }
}

/// Drains stderr, waits for exit and reports exactly one result.
async fn supervise(mut child: Child, output: PathBuf, completion: Completion<TranscodeResult>) {
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);

    if let Some(stderr) = child.stderr.take() {
        let mut lines = BufReader::new(stderr).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    debug!(target: "ffmpeg", "{}", line);
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read ffmpeg stderr: {}", e);
                    break;
                }
            }
        }
    }

    let result = match child.wait().await {
        Ok(status) if status.success() => match tokio::fs::metadata(&output).await {
            Ok(_) => {
                info!("✅ Processing finished successfully");
                Ok(())
            }
            Err(_) => Err(TranscodeError::new(format!(
                "ffmpeg exited successfully but produced no file at {}",
                output.display()
            ))),
        },
        Ok(status) => Err(TranscodeError::new(diagnostic(&tail, status))),
        Err(e) => Err(TranscodeError::new(format!("Failed to wait for ffmpeg: {}", e))),
    };

    if let Err(e) = &result {
        warn!("❌ Error processing video: {}", e.reason);
    }
    completion.settle(result);
}

fn diagnostic(tail: &VecDeque<String>, status: ExitStatus) -> String {
    let stderr = tail
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if stderr.is_empty() {
        format!("ffmpeg exited with {}", status)
    } else {
        format!("ffmpeg exited with {}: {}", status, stderr)
    }
}
