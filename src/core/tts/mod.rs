pub mod aws_polly;
mod base;

pub use aws_polly::{DEFAULT_VOICE, PollyEngine, PollyOutputFormat, PollySynthesizer};
pub use base::{
    SpeechSynthesizer, SynthesisError, SynthesisRequest, SynthesisResult, synthesize_to_file,
};
