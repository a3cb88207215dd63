//! Fakes and fixtures shared by the processing tests.

use super::pipeline::JobPipeline;
use crate::config::settings::StagingConfig;
use crate::infrastructure::media::{TranscodeError, TranscodeProfile, Transcoder};
use crate::infrastructure::storage::StorageGateway;
use crate::infrastructure::storage::memory::MemoryObjectStore;
use crate::state::AppState;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
pub enum TranscodeMode {
    /// Writes `transcoded:<input bytes>` to the output.
    Succeed,
    /// Leaves a truncated output file behind, then fails.
    FailAfterPartialWrite,
    FailWithoutOutput,
    /// Leaves a directory where the output file should be, then fails.
    FailLeavingDirectory,
}

pub struct ScriptedTranscoder {
    mode: TranscodeMode,
    delay: Duration,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedTranscoder {
    pub fn new(mode: TranscodeMode, delay: Duration) -> Self {
        Self {
            mode,
            delay,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    async fn produce(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        match self.mode {
            TranscodeMode::Succeed => {
                let raw = tokio::fs::read(input)
                    .await
                    .map_err(|e| TranscodeError::new(format!("{}: {}", input.display(), e)))?;
                let mut body = b"transcoded:".to_vec();
                body.extend_from_slice(&raw);
                tokio::fs::write(output, body)
                    .await
                    .map_err(|e| TranscodeError::new(e.to_string()))
            }
            TranscodeMode::FailAfterPartialWrite => {
                tokio::fs::write(output, [0u8; 16])
                    .await
                    .map_err(|e| TranscodeError::new(e.to_string()))?;
                Err(TranscodeError::new(
                    "Invalid data found when processing input",
                ))
            }
            TranscodeMode::FailWithoutOutput => Err(TranscodeError::new("moov atom not found")),
            TranscodeMode::FailLeavingDirectory => {
                tokio::fs::create_dir(output)
                    .await
                    .map_err(|e| TranscodeError::new(e.to_string()))?;
                Err(TranscodeError::new("Conversion failed!"))
            }
        }
    }
}

#[async_trait]
impl Transcoder for ScriptedTranscoder {
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        _profile: &TranscodeProfile,
    ) -> Result<(), TranscodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let result = self.produce(input, output).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub struct Fixture {
    pub root: TempDir,
    pub store: Arc<MemoryObjectStore>,
    pub transcoder: Arc<ScriptedTranscoder>,
    pub pipeline: JobPipeline,
}

impl Fixture {
    pub async fn new(mode: TranscodeMode) -> Self {
        Self::with_delay(mode, Duration::ZERO).await
    }

    pub async fn with_delay(mode: TranscodeMode, delay: Duration) -> Self {
        let root = TempDir::new().unwrap();
        let store = Arc::new(MemoryObjectStore::new());
        let transcoder = Arc::new(ScriptedTranscoder::new(mode, delay));

        let storage = StorageGateway::new(
            store.clone(),
            "raw",
            "processed",
            StagingConfig {
                raw_dir: root.path().join("raw-videos"),
                processed_dir: root.path().join("processed-videos"),
            },
        );
        storage.ensure_staging_dirs().await.unwrap();

        let pipeline = JobPipeline::new(storage, transcoder.clone());

        Self {
            root,
            store,
            transcoder,
            pipeline,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.pipeline.clone(), self.transcoder.clone())
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.root.path().join("raw-videos")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.root.path().join("processed-videos")
    }

    pub fn staging_is_empty(&self) -> bool {
        [self.raw_dir(), self.processed_dir()]
            .iter()
            .all(|dir| std::fs::read_dir(dir).unwrap().next().is_none())
    }
}
