pub mod aws;
pub mod storage;
pub mod text;
pub mod tts;

// Re-export commonly used types for convenience
pub use storage::{
    AudioUploader, METADATA_SOURCE, ObjectMetadata, ObjectStoreUploader, SdkCredentialProvider,
    UploadError, UploadResult, object_url,
};
pub use text::{TextError, TextResult, read_text_file};
pub use tts::{
    PollyEngine, PollyOutputFormat, PollySynthesizer, SpeechSynthesizer, SynthesisError,
    SynthesisRequest, SynthesisResult, synthesize_to_file,
};
