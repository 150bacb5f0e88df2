//! Integration tests for the pipeline orchestration
//!
//! These tests verify:
//! - Stage gating (a failed stage prevents all later stages)
//! - Object key selection per environment
//! - Local artifact handling on upload success and failure
//! - End-to-end run against an in-memory object store
//!
//! Polly and S3 are replaced by in-process doubles, so no AWS credentials are needed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore};
use tempfile::TempDir;

use polly_pipeline::{
    AudioUploader, ObjectMetadata, ObjectStoreUploader, Pipeline, PipelineConfig, PipelineError,
    PollyEngine, PollyOutputFormat, SpeechSynthesizer, SynthesisError, SynthesisRequest,
    SynthesisResult, TextError, UploadError, UploadResult,
};

// =============================================================================
// Test Doubles
// =============================================================================

/// Synthesizer that records every request and returns a canned outcome.
struct MockSynthesizer {
    outcome: fn() -> SynthesisResult<Bytes>,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl MockSynthesizer {
    fn returning(outcome: fn() -> SynthesisResult<Bytes>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn ok() -> Self {
        Self::returning(|| Ok(Bytes::from_static(b"ID3-mock-audio")))
    }

    fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult<Bytes> {
        self.requests.lock().unwrap().push(request.clone());
        (self.outcome)()
    }
}

#[derive(Debug, Clone)]
struct UploadCall {
    local_path: PathBuf,
    key: String,
    metadata: ObjectMetadata,
    local_existed: bool,
}

/// Uploader that records calls and optionally fails.
struct MockUploader {
    fail: bool,
    calls: Mutex<Vec<UploadCall>>,
}

impl MockUploader {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<UploadCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioUploader for MockUploader {
    fn bucket(&self) -> &str {
        "test-bucket"
    }

    async fn upload(
        &self,
        local_path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> UploadResult<()> {
        self.calls.lock().unwrap().push(UploadCall {
            local_path: local_path.to_path_buf(),
            key: key.to_string(),
            metadata: metadata.clone(),
            local_existed: local_path.exists(),
        });

        if self.fail {
            return Err(UploadError::ReadLocal {
                path: local_path.to_path_buf(),
                source: std::io::Error::other("simulated upload failure"),
            });
        }
        Ok(())
    }
}

fn config_for(temp_dir: &TempDir, environment: Option<&str>) -> PipelineConfig {
    let environment = environment.map(str::to_string);
    PipelineConfig::from_lookup(move |key| match key {
        "S3_BUCKET_NAME" => Some("test-bucket".to_string()),
        "ENVIRONMENT" => environment.clone(),
        _ => None,
    })
    .unwrap()
    .with_input_path(temp_dir.path().join("speech.txt"))
    .with_output_path(temp_dir.path().join("output.mp3"))
}

fn attribute<'a>(attributes: &'a Attributes, key: &Attribute) -> Option<&'a str> {
    attributes.get(key).map(|value| value.as_ref())
}

fn write_input(temp_dir: &TempDir, text: &str) {
    fs::write(temp_dir.path().join("speech.txt"), text).unwrap();
}

// =============================================================================
// End-to-end
// =============================================================================

#[tokio::test]
async fn test_end_to_end_prod() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "Hello world");
    let config = config_for(&temp_dir, Some("prod"));

    let synth = MockSynthesizer::ok();
    let uploader = MockUploader::new(false);

    let report = Pipeline::new(&config, &synth, &uploader).run().await.unwrap();

    let requests = synth.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "Hello world");
    assert_eq!(requests[0].voice, "Joanna");
    assert_eq!(requests[0].engine, PollyEngine::Neural);
    assert_eq!(requests[0].output_format, PollyOutputFormat::Mp3);

    let calls = uploader.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].key, "polly-audio/prod.mp3");
    assert_eq!(calls[0].metadata.content_type, "audio/mpeg");
    assert_eq!(calls[0].local_path, config.output_path());
    assert!(calls[0].local_existed);

    assert!(!config.output_path().exists());
    assert!(report.cleaned_up);
    assert_eq!(report.characters, 11);
    assert_eq!(report.audio_bytes, 14);
    assert_eq!(report.object_url(), "s3://test-bucket/polly-audio/prod.mp3");
}

#[tokio::test]
async fn test_end_to_end_with_in_memory_store() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "  Hello world\n");
    let config = config_for(&temp_dir, Some("beta"));

    let store = Arc::new(InMemory::new());
    let uploader = ObjectStoreUploader::new("test-bucket", store.clone());
    let synth = MockSynthesizer::ok();

    Pipeline::new(&config, &synth, &uploader).run().await.unwrap();

    let result = store
        .get(&ObjectPath::from("polly-audio/beta.mp3"))
        .await
        .unwrap();
    assert_eq!(
        attribute(&result.attributes, &Attribute::ContentType),
        Some("audio/mpeg")
    );
    assert_eq!(
        attribute(&result.attributes, &Attribute::Metadata("source".into())),
        Some("polly-pipeline")
    );
    assert_eq!(result.bytes().await.unwrap().as_ref(), b"ID3-mock-audio");
    assert!(!config.output_path().exists());
}

// =============================================================================
// Object keys
// =============================================================================

#[tokio::test]
async fn test_object_key_per_environment() {
    let cases = [
        (None, "polly-audio/dev.mp3"),
        (Some("dev"), "polly-audio/dev.mp3"),
        (Some("beta"), "polly-audio/beta.mp3"),
        (Some("prod"), "polly-audio/prod.mp3"),
        (Some("staging"), "polly-audio/dev.mp3"),
    ];

    for (environment, expected) in cases {
        let temp_dir = TempDir::new().unwrap();
        write_input(&temp_dir, "Hello");
        let config = config_for(&temp_dir, environment);

        let synth = MockSynthesizer::ok();
        let uploader = MockUploader::new(false);
        Pipeline::new(&config, &synth, &uploader).run().await.unwrap();

        assert_eq!(uploader.calls()[0].key, expected, "environment {:?}", environment);
    }
}

// =============================================================================
// Stage gating
// =============================================================================

#[test]
fn test_missing_bucket_fails_before_any_io() {
    let result = PipelineConfig::from_lookup(|_| None);
    let err: PipelineError = result.unwrap_err().into();
    assert_eq!(err.stage(), "validate");
}

#[tokio::test]
async fn test_whitespace_input_skips_synthesis() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "   \n\t  ");
    let config = config_for(&temp_dir, None);

    let synth = MockSynthesizer::ok();
    let uploader = MockUploader::new(false);

    let err = Pipeline::new(&config, &synth, &uploader)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Text(TextError::Empty { .. })));
    assert!(synth.requests().is_empty());
    assert!(uploader.calls().is_empty());
}

#[tokio::test]
async fn test_missing_input_skips_synthesis() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&temp_dir, None);

    let synth = MockSynthesizer::ok();
    let uploader = MockUploader::new(false);

    let err = Pipeline::new(&config, &synth, &uploader)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Text(TextError::NotFound { .. })));
    assert!(synth.requests().is_empty());
}

#[tokio::test]
async fn test_no_audio_stream_skips_upload() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "Hello world");
    let config = config_for(&temp_dir, None);

    let synth = MockSynthesizer::returning(|| Err(SynthesisError::NoAudioStream));
    let uploader = MockUploader::new(false);

    let err = Pipeline::new(&config, &synth, &uploader)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Synthesis(SynthesisError::NoAudioStream)
    ));
    assert_eq!(synth.requests().len(), 1);
    assert!(uploader.calls().is_empty());
}

#[tokio::test]
async fn test_empty_audio_payload_skips_upload() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "Hello world");
    let config = config_for(&temp_dir, None);

    let synth = MockSynthesizer::returning(|| Ok(Bytes::new()));
    let uploader = MockUploader::new(false);

    let err = Pipeline::new(&config, &synth, &uploader)
        .run()
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "synthesize");
    assert!(uploader.calls().is_empty());
}

#[tokio::test]
async fn test_provider_error_skips_upload() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "Hello world");
    let config = config_for(&temp_dir, None);

    let synth =
        MockSynthesizer::returning(|| Err(SynthesisError::Provider("throttled".to_string())));
    let uploader = MockUploader::new(false);

    let err = Pipeline::new(&config, &synth, &uploader)
        .run()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("throttled"));
    assert!(uploader.calls().is_empty());
}

#[tokio::test]
async fn test_failed_upload_keeps_local_file() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "Hello world");
    let config = config_for(&temp_dir, Some("prod"));

    let synth = MockSynthesizer::ok();
    let uploader = MockUploader::new(true);

    let err = Pipeline::new(&config, &synth, &uploader)
        .run()
        .await
        .unwrap_err();

    assert_eq!(err.stage(), "upload");
    assert_eq!(uploader.calls().len(), 1);
    assert!(config.output_path().exists());
    assert_eq!(fs::read(config.output_path()).unwrap(), b"ID3-mock-audio");
}
