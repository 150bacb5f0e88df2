//! Pipeline orchestration.
//!
//! Runs Read → Synthesize → Upload → Cleanup strictly in sequence. A failing
//! stage stops the run; later stages are never attempted. Configuration is
//! validated before a [`Pipeline`] can be built, so it is not a stage here.
//!
//! The local audio file is only removed after a successful upload. When the
//! upload fails the file stays on disk for inspection.

use std::path::Path;

use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::core::{
    AudioUploader, ObjectMetadata, SpeechSynthesizer, object_url, read_text_file,
    synthesize_to_file, text::char_count,
};
use crate::errors::PipelineResult;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub characters: usize,
    pub audio_bytes: u64,
    pub bucket: String,
    pub key: String,
    /// Whether the local audio file was removed after upload
    pub cleaned_up: bool,
}

impl PipelineReport {
    pub fn object_url(&self) -> String {
        object_url(&self.bucket, &self.key)
    }
}

pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    synthesizer: &'a dyn SpeechSynthesizer,
    uploader: &'a dyn AudioUploader,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a PipelineConfig,
        synthesizer: &'a dyn SpeechSynthesizer,
        uploader: &'a dyn AudioUploader,
    ) -> Self {
        Self {
            config,
            synthesizer,
            uploader,
        }
    }

    pub async fn run(&self) -> PipelineResult<PipelineReport> {
        let output_path = self.config.output_path();
        let key = self.config.object_key();

        let text = read_text_file(self.config.input_path()).await?;

        let audio_bytes = synthesize_to_file(self.synthesizer, &text, output_path).await?;

        self.uploader
            .upload(output_path, &key, &ObjectMetadata::default())
            .await?;

        let cleaned_up = cleanup(output_path).await;

        Ok(PipelineReport {
            characters: char_count(&text),
            audio_bytes,
            bucket: self.uploader.bucket().to_string(),
            key,
            cleaned_up,
        })
    }
}

/// Remove the local audio file. Failures are logged and never fail the run.
async fn cleanup(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            info!(path = %path.display(), "Cleaned up local file");
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to clean up local file");
            false
        }
    }
}
