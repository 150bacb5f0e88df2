use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use super::aws_polly::{DEFAULT_VOICE, PollyEngine, PollyOutputFormat};
use crate::core::text::char_count;

/// Result type for speech synthesis
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Errors raised by a speech synthesizer or while persisting its audio.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// The service answered without any audio payload
    #[error("No audio stream in synthesis response")]
    NoAudioStream,

    /// The service call itself failed
    #[error("Synthesis request failed: {0}")]
    Provider(String),

    /// The audio stream could not be read to the end
    #[error("Failed to read audio stream: {0}")]
    AudioStream(String),

    /// The audio could not be written to disk
    #[error("Failed to write audio to {}: {source}", .path.display())]
    WriteAudio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parameters of a single synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub engine: PollyEngine,
    pub output_format: PollyOutputFormat,
}

impl SynthesisRequest {
    /// Request with the fixed voice, engine and format used by the pipeline.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: DEFAULT_VOICE.to_string(),
            engine: PollyEngine::Neural,
            output_format: PollyOutputFormat::Mp3,
        }
    }
}

/// A text-to-speech backend that turns text into encoded audio bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Perform one synthesis call and return the complete audio payload.
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult<Bytes>;
}

/// Synthesize `text` and write the audio verbatim to `output_path`.
///
/// Returns the size of the written file in bytes. The file may be left
/// partially written if the write itself fails.
pub async fn synthesize_to_file(
    synthesizer: &dyn SpeechSynthesizer,
    text: &str,
    output_path: &Path,
) -> SynthesisResult<u64> {
    let request = SynthesisRequest::new(text);

    info!(
        voice = %request.voice,
        engine = %request.engine,
        format = %request.output_format,
        text_len = char_count(text),
        "Synthesizing speech"
    );

    let audio = synthesizer.synthesize(&request).await?;
    if audio.is_empty() {
        return Err(SynthesisError::NoAudioStream);
    }

    let write_err = |source| SynthesisError::WriteAudio {
        path: output_path.to_path_buf(),
        source,
    };

    tokio::fs::write(output_path, &audio).await.map_err(write_err)?;
    let size = tokio::fs::metadata(output_path)
        .await
        .map_err(write_err)?
        .len();

    debug!(audio_bytes = audio.len(), "Audio payload received");
    info!(
        output = %output_path.display(),
        size_bytes = size,
        "Audio synthesized successfully"
    );

    Ok(size)
}
