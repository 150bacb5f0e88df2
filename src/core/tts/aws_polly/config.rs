//! Amazon Polly request parameters.
//!
//! The pipeline always synthesizes with the same voice, engine and output
//! format. They are modelled as types so the values sent to Polly and the
//! values recorded in object metadata come from a single place.

// =============================================================================
// Polly Engine
// =============================================================================

/// Amazon Polly synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollyEngine {
    /// Neural TTS engine
    #[default]
    Neural,
}

impl PollyEngine {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neural => "neural",
        }
    }
}

impl std::fmt::Display for PollyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Polly Output Format
// =============================================================================

/// Audio output format requested from Amazon Polly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollyOutputFormat {
    #[default]
    Mp3,
}

impl PollyOutputFormat {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }

    /// Get the MIME type for this format.
    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

impl std::fmt::Display for PollyOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voice used for every synthesis (US English, female, neural capable).
pub const DEFAULT_VOICE: &str = "Joanna";
