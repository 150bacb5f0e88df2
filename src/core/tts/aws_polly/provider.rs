//! Amazon Polly synthesizer implementation.
//!
//! Implements [`SpeechSynthesizer`] on top of Polly's SynthesizeSpeech API via
//! the AWS SDK for Rust. The client is built from a shared [`SdkConfig`], so
//! Polly and S3 resolve region and credentials from the same provider chain.

use std::error::Error as StdError;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, OutputFormat, VoiceId};
use bytes::Bytes;
use tracing::{debug, error};

use super::config::{PollyEngine, PollyOutputFormat};
use crate::core::tts::base::{SpeechSynthesizer, SynthesisError, SynthesisRequest, SynthesisResult};

/// Convert PollyEngine to AWS SDK Engine type
fn engine_to_sdk(engine: PollyEngine) -> Engine {
    match engine {
        PollyEngine::Neural => Engine::Neural,
    }
}

/// Convert PollyOutputFormat to AWS SDK OutputFormat type
fn output_format_to_sdk(format: PollyOutputFormat) -> OutputFormat {
    match format {
        PollyOutputFormat::Mp3 => OutputFormat::Mp3,
    }
}

/// Render an SDK error together with its whole source chain.
///
/// The top-level `Display` of an `SdkError` is only the failure category
/// ("dispatch failure", "service error"); the cause lives in `source()`.
pub(super) fn error_chain<E: StdError>(err: &E) -> String {
    DisplayErrorContext(err).to_string()
}

/// Speech synthesizer backed by Amazon Polly.
///
/// Constructing the synthesizer performs no I/O; credentials are resolved on
/// the first request.
#[derive(Debug, Clone)]
pub struct PollySynthesizer {
    client: PollyClient,
}

impl PollySynthesizer {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: PollyClient::new(sdk_config),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult<Bytes> {
        debug!(
            region = ?self.client.config().region(),
            text_len = request.text.len(),
            voice = %request.voice,
            engine = %request.engine,
            "Sending SynthesizeSpeech request to Amazon Polly"
        );

        let response = self
            .client
            .synthesize_speech()
            .text(&request.text)
            .voice_id(VoiceId::from(request.voice.as_str()))
            .engine(engine_to_sdk(request.engine))
            .output_format(output_format_to_sdk(request.output_format))
            .send()
            .await
            .map_err(|e| {
                let detail = error_chain(&e);
                error!(error = %detail, "Polly API error");
                SynthesisError::Provider(format!("Polly API error: {}", detail))
            })?;

        let audio_bytes = response.audio_stream.collect().await.map_err(|e| {
            let detail = error_chain(&e);
            error!(error = %detail, "Failed to read audio stream");
            SynthesisError::AudioStream(detail)
        })?;

        let bytes = audio_bytes.into_bytes();
        if bytes.is_empty() {
            return Err(SynthesisError::NoAudioStream);
        }

        debug!(audio_bytes = bytes.len(), "Successfully synthesized audio");

        Ok(bytes)
    }
}
